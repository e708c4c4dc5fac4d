use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role a participant (or a raw channel) played in a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Source,
    Destination,
}

/// Which way a call crossed the tenant boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Internal,
    Inbound,
    Outbound,
}

/// A directory-known internal extension and the context it resolves in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainExtension {
    pub exten: String,
    pub context: String,
}

/// A directory line id, distinct from `unique_id`/`linked_id` channel
/// correlators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

/// A fully reconciled call participant, attached to a resolved directory
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogParticipant {
    pub user_uuid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<LineId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub answered: bool,
}

impl CallLogParticipant {
    pub fn new(user_uuid: Uuid) -> Self {
        CallLogParticipant {
            user_uuid,
            line_id: None,
            role: None,
            tags: Vec::new(),
            answered: false,
        }
    }
}

/// A MixMonitor recording window. `path` is the recording file path once
/// known; `start_time`/`end_time` are `None` until the corresponding
/// MixMonitor marker has been observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Recording {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Recording {
    pub fn is_complete(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }
}

/// The durable, emitted call log record.
///
/// Field-for-field this mirrors `RawCallLog` minus the channel-keyed
/// scratch maps, plus a surrogate `id` assigned by the persistence layer
/// the caller owns (this crate never assigns one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLog {
    pub cel_ids: Vec<i64>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_answer: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub source_exten: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<LineId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_user_uuid: Option<Uuid>,

    #[serde(default)]
    pub destination_name: String,
    #[serde(default)]
    pub destination_exten: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_line: Option<LineId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_user_uuid: Option<Uuid>,

    #[serde(default)]
    pub requested_name: String,
    #[serde(default)]
    pub requested_exten: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_internal_exten: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_internal_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_internal_exten: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_internal_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_internal_exten: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_internal_context: Option<String>,

    pub direction: Direction,
    pub tenant_uuid: Uuid,

    pub participants: Vec<CallLogParticipant>,
    pub recordings: Vec<Recording>,
}

impl CallLog {
    /// `(user_uuid, role, answered)` tuples for bus fan-out, per §6: one
    /// `call_log_user_created` event per entry.
    pub fn participant_notifications(&self) -> Vec<(Uuid, Option<Role>, bool)> {
        self.participants
            .iter()
            .map(|p| (p.user_uuid, p.role, p.answered))
            .collect()
    }
}
