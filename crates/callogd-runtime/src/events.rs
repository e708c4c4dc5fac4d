use callogd_types::{CallLog, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Payload for the aggregate `call_log_created` event (§6, §9). Carries
/// `tags`: the per-user event below deliberately does not, so the two
/// payloads are distinct structs rather than one with an optional field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogCreatedPayload {
    pub call_log_id: i64,
    pub tenant_uuid: Uuid,
    pub tags: Vec<String>,
}

/// Payload for a per-participant `call_log_user_created` event (§6, §9).
/// No `tags` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogUserCreatedPayload {
    pub call_log_id: i64,
    pub tenant_uuid: Uuid,
    pub user_uuid: Uuid,
    pub role: Option<Role>,
    pub answered: bool,
}

impl CallLogUserCreatedPayload {
    /// `call_log.user.{user_uuid}.created`, per §6.
    pub fn topic(&self) -> String {
        format!("call_log.user.{}.created", self.user_uuid)
    }

    /// `events.call_log.user.{user_uuid}.created`, per §6.
    pub fn required_acl(&self) -> String {
        format!("events.{}", self.topic())
    }
}

/// The event-bus contract consumed by `regenerate` (§6). No transport
/// implementation ships in this crate.
pub trait CallLogEventBus: Send + Sync {
    fn publish_call_log_created(&self, payload: &CallLogCreatedPayload) -> Result<()>;

    fn publish_call_log_user_created(&self, payload: &CallLogUserCreatedPayload) -> Result<()>;
}

/// Builds the aggregate event payload for one persisted call log, tagged
/// with the union of its participants' tags.
pub fn call_log_created_payload(call_log_id: i64, call_log: &CallLog) -> CallLogCreatedPayload {
    let mut tags: Vec<String> = call_log
        .participants
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();

    CallLogCreatedPayload {
        call_log_id,
        tenant_uuid: call_log.tenant_uuid,
        tags,
    }
}

/// Builds one per-participant event payload for every entry in
/// `CallLog::participant_notifications` (§6).
pub fn call_log_user_created_payloads(call_log_id: i64, call_log: &CallLog) -> Vec<CallLogUserCreatedPayload> {
    call_log
        .participant_notifications()
        .into_iter()
        .map(|(user_uuid, role, answered)| CallLogUserCreatedPayload {
            call_log_id,
            tenant_uuid: call_log.tenant_uuid,
            user_uuid,
            role,
            answered,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_created_topic_and_acl_are_formatted_per_spec() {
        let user_uuid = Uuid::new_v4();
        let payload = CallLogUserCreatedPayload {
            call_log_id: 1,
            tenant_uuid: Uuid::new_v4(),
            user_uuid,
            role: Some(Role::Source),
            answered: true,
        };

        assert_eq!(payload.topic(), format!("call_log.user.{}.created", user_uuid));
        assert_eq!(
            payload.required_acl(),
            format!("events.call_log.user.{}.created", user_uuid)
        );
    }

    #[test]
    fn user_created_payload_serializes_without_tags_key() {
        let payload = CallLogUserCreatedPayload {
            call_log_id: 1,
            tenant_uuid: Uuid::new_v4(),
            user_uuid: Uuid::new_v4(),
            role: None,
            answered: false,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("tags"));
    }
}
