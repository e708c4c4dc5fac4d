use std::collections::BTreeMap;

use callogd_types::{Cel, Direction, EventType, RawCallLog, RawParticipant, Recording, Role};
use chrono::{DateTime, Utc};

/// Per-channel state tracked while scanning a CEL group, used to decide
/// which channels answered and which bridged to the originating channel
/// (§4.2).
#[derive(Debug, Default, Clone)]
struct ChannelTimeline {
    answered_at: Option<DateTime<Utc>>,
    bridged_after_answer_at: Option<DateTime<Utc>>,
}

fn build_channel_timelines(cels: &[Cel]) -> BTreeMap<String, ChannelTimeline> {
    let mut timelines: BTreeMap<String, ChannelTimeline> = BTreeMap::new();
    for cel in cels {
        let timeline = timelines.entry(cel.channel_name.clone()).or_default();
        match cel.event_type {
            EventType::Answer => {
                if timeline.answered_at.is_none() {
                    timeline.answered_at = Some(cel.event_time);
                }
            }
            EventType::BridgeEnter => {
                if timeline.answered_at.is_some() && timeline.bridged_after_answer_at.is_none() {
                    timeline.bridged_after_answer_at = Some(cel.event_time);
                }
            }
            _ => {}
        }
    }
    timelines
}

/// The channel of the first `CHAN_START` CEL in input order, per §4.2's
/// "originating channel".
pub fn source_channel_name(cels: &[Cel]) -> Option<&str> {
    cels.iter()
        .find(|c| c.event_type == EventType::ChanStart)
        .map(|c| c.channel_name.as_str())
}

/// `raw.date`: the first `CHAN_START`'s time, falling back to the first
/// event in the group.
pub fn call_start_time(cels: &[Cel]) -> Option<DateTime<Utc>> {
    cels.iter()
        .find(|c| c.event_type == EventType::ChanStart)
        .or_else(|| cels.first())
        .map(|c| c.event_time)
}

/// `raw.date_end`: `LINKEDID_END`, falling back to the last `CHAN_END`.
pub fn call_end_time(cels: &[Cel]) -> Option<DateTime<Utc>> {
    cels.iter()
        .find(|c| c.event_type == EventType::LinkedidEnd)
        .map(|c| c.event_time)
        .or_else(|| {
            cels.iter()
                .rev()
                .find(|c| c.event_type == EventType::ChanEnd)
                .map(|c| c.event_time)
        })
}

/// Channels other than `source_channel` that answered and then bridged to
/// it, in the tie-break order specified by §4.2 (earliest `BRIDGE_ENTER`
/// first, channel name breaking remaining ties).
fn answered_destination_channels(cels: &[Cel], source_channel: &str) -> Vec<(String, DateTime<Utc>, DateTime<Utc>)> {
    let timelines = build_channel_timelines(cels);
    let mut out: Vec<(String, DateTime<Utc>, DateTime<Utc>)> = timelines
        .into_iter()
        .filter(|(name, _)| name != source_channel)
        .filter_map(|(name, t)| match (t.answered_at, t.bridged_after_answer_at) {
            (Some(answered_at), Some(bridged_at)) => Some((name, answered_at, bridged_at)),
            _ => None,
        })
        .collect();
    out.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Populates `raw_participants` with the source channel and every answered
/// destination channel, and returns `date_answer` (the earliest `ANSWER`
/// among bridged destination channels) plus the tie-break-chosen "the"
/// destination channel used for the scalar `destination_*` fields.
fn populate_participants(
    cels: &[Cel],
    source_channel: Option<&str>,
    raw: &mut RawCallLog,
) -> (Option<DateTime<Utc>>, Option<String>) {
    if let Some(source_channel) = source_channel {
        raw.raw_participants
            .entry(source_channel.to_string())
            .or_insert_with(|| RawParticipant::new(Role::Source, false));
    }

    let destinations = source_channel
        .map(|s| answered_destination_channels(cels, s))
        .unwrap_or_default();

    for (channel, _, _) in &destinations {
        raw.raw_participants
            .insert(channel.clone(), RawParticipant::new(Role::Destination, true));
    }

    let date_answer = destinations.iter().map(|(_, answered_at, _)| *answered_at).min();
    let chosen_destination = destinations.into_iter().next().map(|(name, _, _)| name);

    (date_answer, chosen_destination)
}

fn last_chan_start_cid(cels: &[Cel], channel: &str) -> (String, String) {
    cels.iter()
        .find(|c| c.channel_name == channel && c.event_type == EventType::ChanStart)
        .map(|c| (c.cid_name.clone(), c.cid_num.clone()))
        .unwrap_or_default()
}

/// Applies the §4.2 XIVO_INCALL caller-id rewrite: the last XIVO_INCALL
/// carrying a non-empty `cid_num` wins over the originating channel's own
/// caller id.
fn apply_incall_cid_rewrite(cels: &[Cel], mut cid_num: String) -> String {
    for cel in cels {
        if cel.event_type == EventType::XivoIncall && !cel.cid_num.is_empty() {
            cid_num = cel.cid_num.clone();
        }
    }
    cid_num
}

fn first_app_start_exten(cels: &[Cel]) -> Option<String> {
    cels.iter()
        .find(|c| c.event_type == EventType::AppStart)
        .and_then(|c| c.exten.clone())
        .filter(|e| !e.is_empty())
}

/// Pairs MixMonitor markers by recording path (§4.2). Entries missing
/// either endpoint are still returned here; `remove_incomplete_recordings`
/// prunes them later.
fn extract_recordings(cels: &[Cel]) -> Vec<Recording> {
    let mut by_path: BTreeMap<String, Recording> = BTreeMap::new();
    let mut order: Vec<String> = Vec::new();

    for cel in cels {
        let path = match cel.event_type {
            EventType::MixmonitorStart | EventType::MixmonitorEnd => {
                cel.user_field.clone().unwrap_or_default()
            }
            _ => continue,
        };

        if !by_path.contains_key(&path) {
            order.push(path.clone());
        }
        let entry = by_path.entry(path.clone()).or_default();
        entry.path = Some(path);

        match cel.event_type {
            EventType::MixmonitorStart if entry.start_time.is_none() => {
                entry.start_time = Some(cel.event_time);
            }
            EventType::MixmonitorEnd if entry.end_time.is_none() => {
                entry.end_time = Some(cel.event_time);
            }
            _ => {}
        }
    }

    order
        .into_iter()
        .filter_map(|path| by_path.remove(&path))
        .collect()
}

/// Direction is derived purely from which trunk markers are present in the
/// group (§4.2): `XIVO_INCALL` -> inbound, `XIVO_OUTCALL` -> outbound,
/// neither -> internal. This is independent of which interpretor matched.
pub fn resolve_direction(cels: &[Cel]) -> Direction {
    if cels.iter().any(|c| c.event_type == EventType::XivoIncall) {
        Direction::Inbound
    } else if cels.iter().any(|c| c.event_type == EventType::XivoOutcall) {
        Direction::Outbound
    } else {
        Direction::Internal
    }
}

/// Shared base of the interpretor contract (§4.2), run by every concrete
/// interpretor before it layers on its own specifics (e.g. the forwarded
/// user in `ForwardedInterpretor`).
pub fn interpret_base(cels: &[Cel], raw: &mut RawCallLog) {
    raw.date = call_start_time(cels);
    raw.date_end = call_end_time(cels);
    raw.direction = resolve_direction(cels);
    raw.recordings = extract_recordings(cels);

    let source_channel = source_channel_name(cels);
    let (date_answer, destination_channel) = populate_participants(cels, source_channel, raw);
    raw.date_answer = date_answer;

    if let Some(source_channel) = source_channel {
        let (cid_name, cid_num) = last_chan_start_cid(cels, source_channel);
        raw.source_name = cid_name;
        raw.source_exten = apply_incall_cid_rewrite(cels, cid_num);
    }

    if let Some(exten) = first_app_start_exten(cels) {
        raw.destination_exten = exten;
    } else if let Some(destination_channel) = &destination_channel {
        let (cid_name, cid_num) = last_chan_start_cid(cels, destination_channel);
        if !cid_num.is_empty() {
            raw.destination_exten = cid_num;
        }
        if !cid_name.is_empty() {
            raw.destination_name = cid_name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mk_cel(id: i64, event_type: EventType, channel_name: &str, offset_secs: i64) -> Cel {
        Cel {
            id,
            event_type,
            event_time: Utc.timestamp_opt(1_700_000_000 + offset_secs, 0).unwrap(),
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
    fn recordings_pair_by_path_in_first_seen_order() {
        let mut start = mk_cel(1, EventType::MixmonitorStart, "SIP/a-1", 0);
        start.user_field = Some("rec1.wav".to_string());
        let mut end = mk_cel(2, EventType::MixmonitorEnd, "SIP/a-1", 1);
        end.user_field = Some("rec1.wav".to_string());
        let cels = vec![start, end];

        let mut raw = RawCallLog::new();
        interpret_base(&cels, &mut raw);
        assert_eq!(raw.recordings.len(), 1);
        assert!(raw.recordings[0].is_complete());
    }

    #[test]
    fn unpaired_recording_has_null_endpoint() {
        let mut start = mk_cel(1, EventType::MixmonitorStart, "SIP/a-1", 0);
        start.user_field = Some("rec1.wav".to_string());
        let cels = vec![start];

        let mut raw = RawCallLog::new();
        interpret_base(&cels, &mut raw);
        assert_eq!(raw.recordings.len(), 1);
        assert!(!raw.recordings[0].is_complete());
    }

    #[test]
    fn source_and_destination_resolved_from_bridged_channels() {
        let cels = vec![
            mk_cel(1, EventType::ChanStart, "SIP/src-1", 0),
            mk_cel(2, EventType::ChanStart, "SIP/dst-1", 1),
            mk_cel(3, EventType::Answer, "SIP/dst-1", 2),
            mk_cel(4, EventType::BridgeEnter, "SIP/src-1", 3),
            mk_cel(5, EventType::BridgeEnter, "SIP/dst-1", 3),
        ];
        let mut raw = RawCallLog::new();
        interpret_base(&cels, &mut raw);

        assert!(raw.raw_participants.contains_key("SIP/src-1"));
        assert!(raw.raw_participants.contains_key("SIP/dst-1"));
        assert_eq!(
            raw.raw_participants["SIP/dst-1"].role,
            Some(Role::Destination)
        );
        assert!(raw.date_answer.is_some());
    }
}
