use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::call_log::{CallLog, CallLogParticipant, Direction, LineId, MainExtension, Recording, Role};
use crate::error::{Error, Result};

/// The channel-keyed attribute bag an interpretor and the directory lookup
/// pass accumulate for one channel before it is reconciled into a
/// `CallLogParticipant`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawParticipant {
    pub role: Option<Role>,
    pub answered: bool,
    pub tenant_uuid: Option<Uuid>,
    pub main_extension: Option<MainExtension>,
    pub line_id: Option<LineId>,
    pub tags: Vec<String>,
}

impl RawParticipant {
    pub fn new(role: Role, answered: bool) -> Self {
        RawParticipant {
            role: Some(role),
            answered,
            tenant_uuid: None,
            main_extension: None,
            line_id: None,
            tags: Vec::new(),
        }
    }
}

/// A user identified a priori by the interpretor without a resolved
/// channel, e.g. a forwarding target pulled from `XIVO_USER_FWD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantInfoEntry {
    pub user_uuid: Uuid,
    pub role: Option<Role>,
    pub answered: bool,
}

/// Mutable, in-memory accumulator for one linked-id's worth of CELs.
///
/// Constructed fresh per linked-id group, mutated in place by the
/// interpretor and the finalizer passes, and converted exactly once into a
/// `CallLog` via `to_call_log`.
#[derive(Debug, Clone, Default)]
pub struct RawCallLog {
    pub cel_ids: BTreeSet<i64>,

    pub date: Option<DateTime<Utc>>,
    pub date_answer: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,

    pub source_name: String,
    pub source_exten: String,
    pub source_line: Option<LineId>,
    pub source_user_uuid: Option<Uuid>,

    pub destination_name: String,
    pub destination_exten: String,
    pub destination_line: Option<LineId>,
    pub destination_user_uuid: Option<Uuid>,

    pub requested_name: String,
    pub requested_exten: String,
    pub requested_context: Option<String>,

    pub source_internal_exten: Option<String>,
    pub source_internal_context: Option<String>,
    pub destination_internal_exten: Option<String>,
    pub destination_internal_context: Option<String>,
    pub requested_internal_exten: Option<String>,
    pub requested_internal_context: Option<String>,

    pub direction: Direction,
    pub tenant_uuid: Option<Uuid>,

    pub raw_participants: BTreeMap<String, RawParticipant>,
    pub participants_info: Vec<ParticipantInfoEntry>,
    pub participants: Vec<CallLogParticipant>,
    pub recordings: Vec<Recording>,
}

impl RawCallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the call's tenant. The first call wins; a later call with a
    /// *different* tenant is a contradiction (§4.5/§7's `ContradictoryTenant`)
    /// resolved by last-writer-wins. Returns `true` when this call
    /// overwrote a different, already-set tenant, so the caller can log the
    /// contradiction at warn.
    pub fn set_tenant_uuid(&mut self, tenant_uuid: Uuid) -> bool {
        let contradiction = matches!(self.tenant_uuid, Some(existing) if existing != tenant_uuid);
        self.tenant_uuid = Some(tenant_uuid);
        contradiction
    }

    /// Finalizes this accumulator into a persistable `CallLog`.
    ///
    /// Fails with `InvalidCallLog` when `date` is unset, both `source_exten`
    /// and `source_name` are empty, or `tenant_uuid` is still unset (the
    /// `ensure_tenant_uuid` pass should have fixed this before `to_call_log`
    /// is called).
    pub fn to_call_log(self) -> Result<CallLog> {
        let date = self
            .date
            .ok_or_else(|| Error::InvalidCallLog("missing date".to_string()))?;

        if self.source_exten.is_empty() && self.source_name.is_empty() {
            return Err(Error::InvalidCallLog(
                "both source_exten and source_name are empty".to_string(),
            ));
        }

        let tenant_uuid = self
            .tenant_uuid
            .ok_or_else(|| Error::InvalidCallLog("missing tenant_uuid".to_string()))?;

        Ok(CallLog {
            cel_ids: self.cel_ids.into_iter().collect(),
            date,
            date_answer: self.date_answer,
            date_end: self.date_end,
            source_name: self.source_name,
            source_exten: self.source_exten,
            source_line: self.source_line,
            source_user_uuid: self.source_user_uuid,
            destination_name: self.destination_name,
            destination_exten: self.destination_exten,
            destination_line: self.destination_line,
            destination_user_uuid: self.destination_user_uuid,
            requested_name: self.requested_name,
            requested_exten: self.requested_exten,
            requested_context: self.requested_context,
            source_internal_exten: self.source_internal_exten,
            source_internal_context: self.source_internal_context,
            destination_internal_exten: self.destination_internal_exten,
            destination_internal_context: self.destination_internal_context,
            requested_internal_exten: self.requested_internal_exten,
            requested_internal_context: self.requested_internal_context,
            direction: self.direction,
            tenant_uuid,
            participants: self.participants,
            recordings: self.recordings,
        })
    }
}
