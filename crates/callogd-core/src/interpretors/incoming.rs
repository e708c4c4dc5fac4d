use callogd_types::{Cel, EventType, RawCallLog};

use super::common::interpret_base;
use super::Interpretor;

/// Matches a group carrying an XIVO_INCALL marker and no XIVO_USER_FWD
/// (those are handled by `ForwardedInterpretor`, which is tried first).
pub struct IncomingInterpretor;

impl Interpretor for IncomingInterpretor {
    fn name(&self) -> &'static str {
        "incoming"
    }

    fn can_interpret(&self, cels: &[Cel]) -> bool {
        cels.iter().any(|c| c.event_type == EventType::XivoIncall)
            && !cels.iter().any(|c| c.event_type == EventType::XivoUserFwd)
    }

    fn interpret(&self, cels: &[Cel], raw: &mut RawCallLog) {
        interpret_base(cels, raw);
    }
}
