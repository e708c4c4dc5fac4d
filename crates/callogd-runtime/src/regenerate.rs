use callogd_core::CallLogsGenerator;
use callogd_directory::DirectoryClient;

use crate::error::Result;
use crate::events::{call_log_created_payload, call_log_user_created_payloads, CallLogEventBus};
use crate::store::CelStore;

/// Composes `CelStore`, `CallLogsGenerator`, and `CallLogEventBus` behind
/// their trait interfaces, mirroring the shape of the out-of-scope bus
/// consumer that would trigger this on a `LINKEDID_END` message (§6).
///
/// This is the one place in the workspace that emits diagnostics directly
/// (§10.3): `callogd-core` reports skips and tenant contradictions as
/// plain data, and this function is the outermost layer that turns them
/// into `eprintln!` lines.
pub fn regenerate(
    linked_id: &str,
    generator: &CallLogsGenerator,
    store: &dyn CelStore,
    directory: &dyn DirectoryClient,
    bus: &dyn CallLogEventBus,
) -> Result<()> {
    let cels = store.fetch_by_linked_id(linked_id)?;
    let creation = generator.from_cel(cels, directory)?;

    for skipped in &creation.skipped {
        eprintln!("warn: skipping linked_id {}: {}", skipped.linked_id, skipped.reason);
    }
    for contradiction in &creation.tenant_contradictions {
        eprintln!(
            "warn: contradictory tenant uuid among participants for linked_id {}, last writer wins",
            contradiction.linked_id
        );
    }

    if !creation.call_log_ids_to_delete.is_empty() {
        let ids: Vec<i64> = creation.call_log_ids_to_delete.into_iter().collect();
        store.delete_call_logs_by_ids(&ids)?;
    }

    for call_log in creation.new_call_logs {
        let call_log_id = store.insert_call_log(&call_log)?;

        bus.publish_call_log_created(&call_log_created_payload(call_log_id, &call_log))?;
        for user_payload in call_log_user_created_payloads(call_log_id, &call_log) {
            bus.publish_call_log_user_created(&user_payload)?;
        }
    }

    Ok(())
}
