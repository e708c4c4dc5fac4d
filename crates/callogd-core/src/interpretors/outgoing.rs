use callogd_types::{Cel, EventType, RawCallLog};

use super::common::interpret_base;
use super::Interpretor;

/// Matches a group carrying an XIVO_OUTCALL marker and neither an
/// XIVO_INCALL nor an XIVO_USER_FWD (both tried first).
pub struct OutgoingInterpretor;

impl Interpretor for OutgoingInterpretor {
    fn name(&self) -> &'static str {
        "outgoing"
    }

    fn can_interpret(&self, cels: &[Cel]) -> bool {
        cels.iter().any(|c| c.event_type == EventType::XivoOutcall)
            && !cels
                .iter()
                .any(|c| matches!(c.event_type, EventType::XivoIncall | EventType::XivoUserFwd))
    }

    fn interpret(&self, cels: &[Cel], raw: &mut RawCallLog) {
        interpret_base(cels, raw);
    }
}
