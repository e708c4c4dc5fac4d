use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single low-level event emitted by the telephony switch for one channel.
///
/// CELs are immutable once stored; the generation pipeline only ever reads
/// them. See the data model notes for the per-`linked_id` and per-`unique_id`
/// invariants this type is expected to satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cel {
    /// Monotonic id within the CEL store.
    pub id: i64,
    pub event_type: EventType,
    pub event_time: DateTime<Utc>,
    pub channel_name: String,
    pub unique_id: String,
    pub linked_id: String,
    #[serde(default)]
    pub cid_name: String,
    #[serde(default)]
    pub cid_num: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exten: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_data: Option<String>,
    /// Carries the recording path for `MixmonitorStart`/`MixmonitorEnd` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_field: Option<String>,
    /// Set when this CEL was already attributed to a previously generated
    /// call log. A non-null value here means that call log is superseded by
    /// whatever this generation run produces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_log_id: Option<i64>,
}

/// Event types produced by the switch.
///
/// `Other` is the escape hatch for switch-specific or future event types
/// that no interpretor needs to special-case. Serializes as the bare
/// `SCREAMING_SNAKE_CASE` event name the switch itself uses, so an `Other`
/// round-trips through its original string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    ChanStart,
    ChanEnd,
    Answer,
    AppStart,
    BridgeEnter,
    BridgeExit,
    Hangup,
    LinkedidEnd,
    XivoIncall,
    XivoOutcall,
    XivoUserFwd,
    MixmonitorStart,
    MixmonitorEnd,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::ChanStart => "CHAN_START",
            EventType::ChanEnd => "CHAN_END",
            EventType::Answer => "ANSWER",
            EventType::AppStart => "APP_START",
            EventType::BridgeEnter => "BRIDGE_ENTER",
            EventType::BridgeExit => "BRIDGE_EXIT",
            EventType::Hangup => "HANGUP",
            EventType::LinkedidEnd => "LINKEDID_END",
            EventType::XivoIncall => "XIVO_INCALL",
            EventType::XivoOutcall => "XIVO_OUTCALL",
            EventType::XivoUserFwd => "XIVO_USER_FWD",
            EventType::MixmonitorStart => "MIXMONITOR_START",
            EventType::MixmonitorEnd => "MIXMONITOR_END",
            EventType::Other(raw) => raw,
        }
    }
}

impl From<&str> for EventType {
    fn from(raw: &str) -> Self {
        match raw {
            "CHAN_START" => EventType::ChanStart,
            "CHAN_END" => EventType::ChanEnd,
            "ANSWER" => EventType::Answer,
            "APP_START" => EventType::AppStart,
            "BRIDGE_ENTER" => EventType::BridgeEnter,
            "BRIDGE_EXIT" => EventType::BridgeExit,
            "HANGUP" => EventType::Hangup,
            "LINKEDID_END" => EventType::LinkedidEnd,
            "XIVO_INCALL" => EventType::XivoIncall,
            "XIVO_OUTCALL" => EventType::XivoOutcall,
            "XIVO_USER_FWD" => EventType::XivoUserFwd,
            "MIXMONITOR_START" => EventType::MixmonitorStart,
            "MIXMONITOR_END" => EventType::MixmonitorEnd,
            other => EventType::Other(other.to_string()),
        }
    }
}

impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(EventType::from(raw.as_str()))
    }
}

/// Splits a channel name into its `protocol/interface` prefix and instance
/// suffix, e.g. `PJSIP/rgcZLNGE-00000028` -> (`PJSIP/rgcZLNGE`, `00000028`).
///
/// Channels with no `-` separator have no instance suffix; the whole name is
/// the prefix.
pub fn protocol_interface_from_channel(channel_name: &str) -> &str {
    match channel_name.rfind('-') {
        Some(idx) => &channel_name[..idx],
        None => channel_name,
    }
}
