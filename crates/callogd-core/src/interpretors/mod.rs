//! The interpretor set: an ordered, closed collection of call-shape
//! classifiers dispatched first-match-wins (§4.2, §9).

mod common;
mod forwarded;
mod incoming;
mod internal;
mod outgoing;

use callogd_types::{Cel, RawCallLog};

/// A deterministic classifier over an ordered CEL group.
///
/// `can_interpret` decides whether this interpretor accepts the group;
/// `interpret` then mutates `raw` in place and must satisfy every bullet of
/// the interpretor contract in §4.2.
pub trait Interpretor: Send + Sync {
    fn name(&self) -> &'static str;
    fn can_interpret(&self, cels: &[Cel]) -> bool;
    fn interpret(&self, cels: &[Cel], raw: &mut RawCallLog);
}

/// The production interpretor list, in first-match-wins order (§4.2):
/// forwarded calls are checked before plain incoming/outgoing, and the
/// internal interpretor is the catch-all and must stay last.
pub fn default_interpretors() -> Vec<Box<dyn Interpretor>> {
    vec![
        Box::new(forwarded::ForwardedInterpretor),
        Box::new(incoming::IncomingInterpretor),
        Box::new(outgoing::OutgoingInterpretor),
        Box::new(internal::InternalInterpretor),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use callogd_types::EventType;
    use chrono::{TimeZone, Utc};

    fn mk_cel(id: i64, event_type: EventType, channel_name: &str) -> Cel {
        Cel {
            id,
            event_type,
            event_time: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
            channel_name: channel_name.to_string(),
            unique_id: format!("{}.{}", channel_name, id),
            linked_id: "1.0".to_string(),
            cid_name: String::new(),
            cid_num: String::new(),
            exten: None,
            context: None,
            app_data: None,
            user_field: None,
            call_log_id: None,
        }
    }

    #[test]
    fn first_match_wins_in_declared_order() {
        let interpretors = default_interpretors();
        let cels = vec![
            mk_cel(1, EventType::ChanStart, "SIP/a-1"),
            mk_cel(2, EventType::XivoIncall, "SIP/a-1"),
            mk_cel(3, EventType::XivoOutcall, "SIP/a-1"),
        ];
        let chosen = interpretors.iter().find(|i| i.can_interpret(&cels)).unwrap();
        assert_eq!(chosen.name(), "incoming");
    }

    #[test]
    fn internal_interpretor_accepts_anything_non_empty() {
        let interpretors = default_interpretors();
        let cels = vec![mk_cel(1, EventType::ChanStart, "SIP/a-1")];
        let chosen = interpretors.iter().find(|i| i.can_interpret(&cels)).unwrap();
        assert_eq!(chosen.name(), "internal");
    }

    #[test]
    fn forwarded_takes_precedence_over_incoming() {
        let interpretors = default_interpretors();
        let cels = vec![
            mk_cel(1, EventType::XivoIncall, "SIP/a-1"),
            mk_cel(2, EventType::XivoUserFwd, "SIP/a-1"),
        ];
        let chosen = interpretors.iter().find(|i| i.can_interpret(&cels)).unwrap();
        assert_eq!(chosen.name(), "forwarded");
    }
}
