use callogd_types::{Cel, RawCallLog};

use super::common::interpret_base;
use super::Interpretor;

/// Catch-all interpretor for calls with neither an XIVO_INCALL, an
/// XIVO_OUTCALL, nor an XIVO_USER_FWD marker: internal, line-to-line
/// calls. Must stay last in `default_interpretors` so every non-empty
/// group is accepted by something (§4.2, §9).
pub struct InternalInterpretor;

impl Interpretor for InternalInterpretor {
    fn name(&self) -> &'static str {
        "internal"
    }

    fn can_interpret(&self, cels: &[Cel]) -> bool {
        !cels.is_empty()
    }

    fn interpret(&self, cels: &[Cel], raw: &mut RawCallLog) {
        interpret_base(cels, raw);
    }
}
