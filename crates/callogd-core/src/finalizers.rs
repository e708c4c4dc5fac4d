use std::collections::BTreeMap;

use callogd_directory::DirectoryCache;
use callogd_types::{protocol_interface_from_channel, RawCallLog, Role};
use uuid::Uuid;

/// Drops all but the lexicographically-last channel in each
/// `protocol/interface` equivalence class (§4.3). Telephony stacks re-fork
/// a channel on redirect, leaving parallel CEL streams for the same line;
/// only the most recent instance carries the final state.
pub fn remove_duplicate_participants(raw: &mut RawCallLog) {
    let mut kept: BTreeMap<&str, String> = BTreeMap::new();
    for channel_name in raw.raw_participants.keys() {
        let prefix = protocol_interface_from_channel(channel_name);
        match kept.get(prefix) {
            Some(existing) if existing.as_str() >= channel_name.as_str() => {}
            _ => {
                kept.insert(prefix, channel_name.clone());
            }
        }
    }

    let survivors: std::collections::BTreeSet<String> = kept.into_values().collect();
    raw.raw_participants.retain(|channel_name, _| survivors.contains(channel_name));
}

/// Fixes `raw.tenant_uuid` per §4.5: the distinct tenants seen among
/// `raw_participants`, falling back to a directory context lookup on
/// `requested_context`, falling back to the service-wide default.
///
/// Returns `true` when a contradiction was observed (more than one
/// distinct tenant among participants), so the caller can log it at warn
/// — per §7's `ContradictoryTenant`, this crate does not log itself
/// (§10.3); it surfaces the condition as a return value instead.
pub fn ensure_tenant_uuid(raw: &mut RawCallLog, cache: &DirectoryCache<'_>, service_tenant_uuid: Uuid) -> bool {
    let mut distinct: Vec<Uuid> = raw
        .raw_participants
        .values()
        .filter_map(|p| p.tenant_uuid)
        .collect();
    distinct.sort();
    distinct.dedup();

    if distinct.is_empty() {
        let resolved = raw
            .requested_context
            .as_deref()
            .and_then(|context| cache.list_contexts(context).into_iter().next())
            .map(|c| c.tenant_uuid)
            .unwrap_or(service_tenant_uuid);
        raw.set_tenant_uuid(resolved);
        return false;
    }

    let mut contradiction = false;
    for tenant_uuid in distinct {
        if raw.set_tenant_uuid(tenant_uuid) {
            contradiction = true;
        }
    }
    contradiction
}

/// Back-fills the `*_internal_exten`/`*_internal_context` pairs from
/// directory-resolved `main_extension`s (§4.6). First writer wins per
/// field: an interpretor-set value is never overwritten here.
pub fn fill_extensions_from_participants(raw: &mut RawCallLog) {
    for participant in raw.raw_participants.values() {
        let Some(main_extension) = &participant.main_extension else {
            continue;
        };
        match participant.role {
            Some(Role::Source) => {
                if raw.source_internal_exten.is_none() {
                    raw.source_internal_exten = Some(main_extension.exten.clone());
                    raw.source_internal_context = Some(main_extension.context.clone());
                }
            }
            Some(Role::Destination) => {
                if raw.destination_internal_exten.is_none() {
                    raw.destination_internal_exten = Some(main_extension.exten.clone());
                    raw.destination_internal_context = Some(main_extension.context.clone());
                }
                if raw.requested_internal_exten.is_none() {
                    raw.requested_internal_exten = Some(main_extension.exten.clone());
                    raw.requested_internal_context = Some(main_extension.context.clone());
                }
            }
            None => {}
        }
    }
}

/// Drops recordings missing either endpoint (§4.7).
pub fn remove_incomplete_recordings(raw: &mut RawCallLog) {
    raw.recordings.retain(|r| r.is_complete());
}
