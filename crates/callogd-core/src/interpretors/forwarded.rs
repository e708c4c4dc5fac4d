use callogd_types::{Cel, EventType, ParticipantInfoEntry, RawCallLog, Role};
use uuid::Uuid;

use super::common::interpret_base;
use super::Interpretor;

/// Matches a group carrying an XIVO_USER_FWD marker: a call that reached a
/// user through forwarding. The forwarding target is identified a priori
/// by uuid (carried in the CEL's `app_data`) and recorded in
/// `participants_info` rather than `raw_participants`, since it may have no
/// channel of its own (§3, §9's "`participants_info` vs `raw_participants`").
///
/// Tried before `IncomingInterpretor`/`OutgoingInterpretor` so a forwarded
/// inbound or outbound call is not misclassified as a plain one (§4.2).
pub struct ForwardedInterpretor;

impl Interpretor for ForwardedInterpretor {
    fn name(&self) -> &'static str {
        "forwarded"
    }

    fn can_interpret(&self, cels: &[Cel]) -> bool {
        cels.iter().any(|c| c.event_type == EventType::XivoUserFwd)
    }

    fn interpret(&self, cels: &[Cel], raw: &mut RawCallLog) {
        interpret_base(cels, raw);

        let answered = raw.date_answer.is_some();
        for cel in cels {
            if cel.event_type != EventType::XivoUserFwd {
                continue;
            }
            let Some(app_data) = &cel.app_data else {
                continue;
            };
            let Ok(user_uuid) = Uuid::parse_str(app_data) else {
                continue;
            };
            if raw.participants_info.iter().any(|p| p.user_uuid == user_uuid) {
                continue;
            }
            raw.participants_info.push(ParticipantInfoEntry {
                user_uuid,
                role: Some(Role::Destination),
                answered,
            });
        }
    }
}
