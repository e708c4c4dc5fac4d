use std::collections::BTreeSet;
use std::time::Instant;

use callogd_directory::{DirectoryCache, DirectoryClient};
use callogd_types::{Cel, CallLog, RawCallLog};
use uuid::Uuid;

use crate::error::Error;
use crate::finalizers::{
    ensure_tenant_uuid, fill_extensions_from_participants, remove_duplicate_participants,
    remove_incomplete_recordings,
};
use crate::interpretors::{default_interpretors, Interpretor};
use crate::participants::ParticipantsProcessor;

/// Why a linked-id group did not yield a call log. Returned, never logged,
/// per §10.3: `callogd-core` reports diagnostics as data, leaving the
/// decision to log (and at what level) to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGroup {
    pub linked_id: String,
    pub reason: String,
}

/// A contradictory tenant observed while finalizing one linked-id group
/// (§4.5, §7). Reported alongside the generated call logs so the caller can
/// log it at warn, per §10.3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContradiction {
    pub linked_id: String,
}

/// The result of one `from_cel` invocation (§4.1, §6).
#[derive(Debug, Clone, PartialEq)]
pub struct CallLogsCreation {
    pub new_call_logs: Vec<CallLog>,
    pub call_log_ids_to_delete: BTreeSet<i64>,
    pub skipped: Vec<SkippedGroup>,
    pub tenant_contradictions: Vec<TenantContradiction>,
}

/// Picks the first interpretor in `interpretors` whose `can_interpret`
/// accepts `cels` (§4.1 step 4).
fn choose_interpretor<'a>(
    interpretors: &'a [Box<dyn Interpretor>],
    cels: &[Cel],
) -> Option<&'a dyn Interpretor> {
    interpretors
        .iter()
        .find(|i| i.can_interpret(cels))
        .map(|i| i.as_ref())
}

/// Groups CELs by `linked_id`, preserving each group's input order
/// (§4.1 step 2). Group order in the returned `Vec` follows first
/// appearance of each `linked_id`.
fn group_by_linked_id(cels: Vec<Cel>) -> Vec<(String, Vec<Cel>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: std::collections::HashMap<String, Vec<Cel>> = std::collections::HashMap::new();
    for cel in cels {
        if !groups.contains_key(&cel.linked_id) {
            order.push(cel.linked_id.clone());
        }
        groups.entry(cel.linked_id.clone()).or_default().push(cel);
    }
    order
        .into_iter()
        .map(|linked_id| {
            let group = groups.remove(&linked_id).unwrap_or_default();
            (linked_id, group)
        })
        .collect()
}

/// Orchestrates the full pipeline described in §4.1: groups CELs by
/// linked-id, dispatches each group to an interpretor, runs the finalizer
/// passes, and validates the result.
///
/// Constructed once per caller (the interpretor list is read-only state),
/// invoked once per batch of CELs via `from_cel`.
pub struct CallLogsGenerator {
    interpretors: Vec<Box<dyn Interpretor>>,
    service_tenant_uuid: Uuid,
}

impl CallLogsGenerator {
    pub fn new(service_tenant_uuid: Uuid) -> Self {
        CallLogsGenerator {
            interpretors: default_interpretors(),
            service_tenant_uuid,
        }
    }

    /// As `new`, but with an explicit deadline applied to every directory
    /// lookup performed while generating this batch (§5).
    pub fn from_cel(
        &self,
        cels: Vec<Cel>,
        directory: &dyn DirectoryClient,
    ) -> Result<CallLogsCreation, Error> {
        self.from_cel_with_deadline(cels, directory, None)
    }

    pub fn from_cel_with_deadline(
        &self,
        cels: Vec<Cel>,
        directory: &dyn DirectoryClient,
        deadline: Option<Instant>,
    ) -> Result<CallLogsCreation, Error> {
        let call_log_ids_to_delete: BTreeSet<i64> =
            cels.iter().filter_map(|c| c.call_log_id).collect();

        let mut new_call_logs = Vec::new();
        let mut skipped = Vec::new();
        let mut tenant_contradictions = Vec::new();

        let cache = match deadline {
            Some(deadline) => DirectoryCache::with_deadline(directory, deadline),
            None => DirectoryCache::new(directory),
        };

        for (linked_id, group) in group_by_linked_id(cels) {
            if group.is_empty() {
                return Err(Error::NoInterpretorMatched);
            }

            let interpretor = choose_interpretor(&self.interpretors, &group)
                .ok_or(Error::NoInterpretorMatched)?;

            let mut raw = RawCallLog::new();
            raw.cel_ids = group.iter().map(|c| c.id).collect();
            interpretor.interpret(&group, &mut raw);

            remove_duplicate_participants(&mut raw);

            ParticipantsProcessor::new(&cache).process(&mut raw);

            if ensure_tenant_uuid(&mut raw, &cache, self.service_tenant_uuid) {
                tenant_contradictions.push(TenantContradiction {
                    linked_id: linked_id.clone(),
                });
            }

            fill_extensions_from_participants(&mut raw);
            remove_incomplete_recordings(&mut raw);

            match raw.to_call_log() {
                Ok(call_log) => new_call_logs.push(call_log),
                Err(err) => skipped.push(SkippedGroup {
                    linked_id,
                    reason: err.to_string(),
                }),
            }
        }

        Ok(CallLogsCreation {
            new_call_logs,
            call_log_ids_to_delete,
            skipped,
            tenant_contradictions,
        })
    }
}
