use callogd_types::{Cel, CallLog};

use crate::error::Result;

/// The CEL/call-log persistence contract consumed by `regenerate` (§6).
///
/// No implementation ships in this crate; the core never touches a
/// database directly, and neither does this orchestration layer — it only
/// calls through this trait.
pub trait CelStore: Send + Sync {
    fn fetch_by_linked_id(&self, linked_id: &str) -> Result<Vec<Cel>>;

    fn delete_call_logs_by_ids(&self, ids: &[i64]) -> Result<()>;

    fn insert_call_log(&self, call_log: &CallLog) -> Result<i64>;
}
