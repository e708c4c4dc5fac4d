use uuid::Uuid;

use crate::error::Result;
use crate::model::{ContextInfo, ParticipantInfo};

/// The narrow contract the external directory ("confd") exposes, per §6.
///
/// Implementations perform network I/O and may block; the generation
/// pipeline is the only thing that decides how lookups are cached and
/// whether a failure degrades a call log rather than failing it (§4.4,
/// §7). No implementation of this trait ships in this crate.
pub trait DirectoryClient: Send + Sync {
    fn find_participant_by_channel(&self, channel_name: &str) -> Result<Option<ParticipantInfo>>;

    fn find_participant_by_uuid(&self, user_uuid: Uuid) -> Result<Option<ParticipantInfo>>;

    fn list_contexts(&self, name: &str) -> Result<Vec<ContextInfo>>;
}
