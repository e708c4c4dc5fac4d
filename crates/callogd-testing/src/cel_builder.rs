use callogd_types::{Cel, EventType};
use chrono::{DateTime, TimeZone, Utc};

/// Builds a chronologically ordered CEL sequence for one linked-id, for
/// the scenarios described in §8. Each `.push_*` call appends one CEL with
/// a strictly increasing `id` and `event_time`, so assertions about
/// ordering stay meaningful without the test author tracking counters by
/// hand.
pub struct CelBuilder {
    linked_id: String,
    next_id: i64,
    base_time: DateTime<Utc>,
    cels: Vec<Cel>,
}

impl CelBuilder {
    pub fn new(linked_id: &str) -> Self {
        CelBuilder {
            linked_id: linked_id.to_string(),
            next_id: 1,
            base_time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            cels: Vec::new(),
        }
    }

    fn push(&mut self, event_type: EventType, channel_name: &str) -> &mut Cel {
        let id = self.next_id;
        self.next_id += 1;
        let event_time = self.base_time + chrono::Duration::seconds(id);
        self.cels.push(Cel {
            id,
            event_type,
            event_time,
            channel_name: channel_name.to_string(),
            unique_id: format!("{}.{}", channel_name, id),
            linked_id: self.linked_id.clone(),
            cid_name: String::new(),
            cid_num: String::new(),
            exten: None,
            context: None,
            app_data: None,
            user_field: None,
            call_log_id: None,
        });
        self.cels.last_mut().unwrap()
    }

    pub fn chan_start(mut self, channel_name: &str, cid_name: &str, cid_num: &str) -> Self {
        let cel = self.push(EventType::ChanStart, channel_name);
        cel.cid_name = cid_name.to_string();
        cel.cid_num = cid_num.to_string();
        self
    }

    pub fn xivo_incall(mut self, channel_name: &str, cid_num: &str) -> Self {
        let cel = self.push(EventType::XivoIncall, channel_name);
        cel.cid_num = cid_num.to_string();
        self
    }

    pub fn xivo_outcall(mut self, channel_name: &str) -> Self {
        self.push(EventType::XivoOutcall, channel_name);
        self
    }

    pub fn xivo_user_fwd(mut self, channel_name: &str, forwarded_user_uuid: &str) -> Self {
        let cel = self.push(EventType::XivoUserFwd, channel_name);
        cel.app_data = Some(forwarded_user_uuid.to_string());
        self
    }

    pub fn app_start(mut self, channel_name: &str, exten: &str) -> Self {
        let cel = self.push(EventType::AppStart, channel_name);
        cel.exten = Some(exten.to_string());
        self
    }

    pub fn answer(mut self, channel_name: &str) -> Self {
        self.push(EventType::Answer, channel_name);
        self
    }

    pub fn bridge_enter(mut self, channel_name: &str) -> Self {
        self.push(EventType::BridgeEnter, channel_name);
        self
    }

    pub fn bridge_exit(mut self, channel_name: &str) -> Self {
        self.push(EventType::BridgeExit, channel_name);
        self
    }

    pub fn hangup(mut self, channel_name: &str) -> Self {
        self.push(EventType::Hangup, channel_name);
        self
    }

    pub fn chan_end(mut self, channel_name: &str) -> Self {
        self.push(EventType::ChanEnd, channel_name);
        self
    }

    pub fn linkedid_end(mut self, channel_name: &str) -> Self {
        self.push(EventType::LinkedidEnd, channel_name);
        self
    }

    pub fn mixmonitor_start(mut self, channel_name: &str, recording_path: &str) -> Self {
        let cel = self.push(EventType::MixmonitorStart, channel_name);
        cel.user_field = Some(recording_path.to_string());
        self
    }

    pub fn mixmonitor_end(mut self, channel_name: &str, recording_path: &str) -> Self {
        let cel = self.push(EventType::MixmonitorEnd, channel_name);
        cel.user_field = Some(recording_path.to_string());
        self
    }

    /// Sets `call_log_id` on the most recently pushed CEL, marking it as
    /// already attributed to a previously generated call log.
    pub fn superseding(mut self, call_log_id: i64) -> Self {
        if let Some(cel) = self.cels.last_mut() {
            cel.call_log_id = Some(call_log_id);
        }
        self
    }

    pub fn build(self) -> Vec<Cel> {
        self.cels
    }
}
