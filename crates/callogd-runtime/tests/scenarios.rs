use std::collections::HashMap;
use std::sync::Mutex;

use callogd_core::CallLogsGenerator;
use callogd_runtime::{
    regenerate, CallLogCreatedPayload, CallLogEventBus, CallLogUserCreatedPayload, CelStore,
};
use callogd_testing::{known_user, known_user_with_extension, CelBuilder, FakeDirectoryClient};
use callogd_types::{Cel, CallLog, Direction};
use uuid::Uuid;

struct InMemoryStore {
    cels: HashMap<String, Vec<Cel>>,
    inserted: Mutex<Vec<CallLog>>,
    deleted: Mutex<Vec<i64>>,
}

impl InMemoryStore {
    fn new(linked_id: &str, cels: Vec<Cel>) -> Self {
        let mut map = HashMap::new();
        map.insert(linked_id.to_string(), cels);
        InMemoryStore {
            cels: map,
            inserted: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }
}

impl CelStore for InMemoryStore {
    fn fetch_by_linked_id(&self, linked_id: &str) -> callogd_runtime::Result<Vec<Cel>> {
        Ok(self.cels.get(linked_id).cloned().unwrap_or_default())
    }

    fn delete_call_logs_by_ids(&self, ids: &[i64]) -> callogd_runtime::Result<()> {
        self.deleted.lock().unwrap().extend_from_slice(ids);
        Ok(())
    }

    fn insert_call_log(&self, call_log: &CallLog) -> callogd_runtime::Result<i64> {
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(call_log.clone());
        Ok(inserted.len() as i64)
    }
}

#[derive(Default)]
struct RecordingBus {
    created: Mutex<Vec<CallLogCreatedPayload>>,
    user_created: Mutex<Vec<CallLogUserCreatedPayload>>,
}

impl CallLogEventBus for RecordingBus {
    fn publish_call_log_created(&self, payload: &CallLogCreatedPayload) -> callogd_runtime::Result<()> {
        self.created.lock().unwrap().push(payload.clone());
        Ok(())
    }

    fn publish_call_log_user_created(&self, payload: &CallLogUserCreatedPayload) -> callogd_runtime::Result<()> {
        self.user_created.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

fn incoming_call_skeleton() -> Vec<Cel> {
    CelBuilder::new("1510326428.26")
        .chan_start("SIP/trunk-00000001", "", "042302")
        .xivo_incall("SIP/trunk-00000001", "42302")
        .app_start("SIP/trunk-00000001", "42302")
        .chan_start("SIP/as2mkq-00000001", "", "")
        .answer("SIP/as2mkq-00000001")
        .bridge_enter("SIP/trunk-00000001")
        .bridge_enter("SIP/as2mkq-00000001")
        .bridge_exit("SIP/trunk-00000001")
        .bridge_exit("SIP/as2mkq-00000001")
        .hangup("SIP/trunk-00000001")
        .hangup("SIP/as2mkq-00000001")
        .chan_end("SIP/trunk-00000001")
        .chan_end("SIP/as2mkq-00000001")
        .linkedid_end("SIP/trunk-00000001")
        .build()
}

#[test]
fn s1_incoming_call_rewritten_cid_no_known_users() {
    let service_tenant_uuid = Uuid::new_v4();
    let generator = CallLogsGenerator::new(service_tenant_uuid);
    let directory = FakeDirectoryClient::new();

    let creation = generator.from_cel(incoming_call_skeleton(), &directory).unwrap();

    assert_eq!(creation.new_call_logs.len(), 1);
    let call_log = &creation.new_call_logs[0];
    assert_eq!(call_log.source_name, "");
    assert_eq!(call_log.source_exten, "42302");
    assert_eq!(call_log.direction, Direction::Inbound);
    assert!(call_log.participants.is_empty());
    assert_eq!(call_log.tenant_uuid, service_tenant_uuid);
}

#[test]
fn s2_unknown_lines_emit_created_event_without_user_events() {
    let service_tenant_uuid = Uuid::new_v4();
    let generator = CallLogsGenerator::new(service_tenant_uuid);
    let store = InMemoryStore::new("1510326428.26", incoming_call_skeleton());
    let directory = FakeDirectoryClient::new();
    let bus = RecordingBus::default();

    regenerate("1510326428.26", &generator, &store, &directory, &bus).unwrap();

    assert_eq!(bus.created.lock().unwrap().len(), 1);
    assert!(bus.user_created.lock().unwrap().is_empty());
    assert_eq!(store.inserted.lock().unwrap().len(), 1);
}

#[test]
fn s3_known_lines_emit_one_user_created_event_each() {
    let service_tenant_uuid = Uuid::new_v4();
    let tenant_uuid = Uuid::new_v4();
    let user_1 = Uuid::new_v4();
    let user_2 = Uuid::new_v4();

    let generator = CallLogsGenerator::new(service_tenant_uuid);
    let store = InMemoryStore::new("1510326428.26", incoming_call_skeleton());
    let directory = FakeDirectoryClient::new()
        .with_channel("SIP/trunk-00000001", known_user(user_1, 1, tenant_uuid))
        .with_channel("SIP/as2mkq-00000001", known_user(user_2, 2, tenant_uuid));
    let bus = RecordingBus::default();

    regenerate("1510326428.26", &generator, &store, &directory, &bus).unwrap();

    let user_events = bus.user_created.lock().unwrap();
    assert_eq!(user_events.len(), 2);
    let uuids: Vec<Uuid> = user_events.iter().map(|p| p.user_uuid).collect();
    assert!(uuids.contains(&user_1));
    assert!(uuids.contains(&user_2));

    for payload in user_events.iter() {
        assert_eq!(payload.required_acl(), format!("events.call_log.user.{}.created", payload.user_uuid));
    }

    let created = bus.created.lock().unwrap();
    assert_eq!(created.len(), 1);
}

#[test]
fn s4_incomplete_recording_is_dropped_call_log_still_emitted() {
    let generator = CallLogsGenerator::new(Uuid::new_v4());
    let directory = FakeDirectoryClient::new();

    let mut cels = incoming_call_skeleton();
    cels.push(Cel {
        id: 9001,
        event_type: callogd_types::EventType::MixmonitorStart,
        event_time: cels.last().unwrap().event_time,
        channel_name: "SIP/trunk-00000001".to_string(),
        unique_id: "SIP/trunk-00000001.9001".to_string(),
        linked_id: "1510326428.26".to_string(),
        cid_name: String::new(),
        cid_num: String::new(),
        exten: None,
        context: None,
        app_data: None,
        user_field: Some("rec1.wav".to_string()),
        call_log_id: None,
    });

    let creation = generator.from_cel(cels, &directory).unwrap();

    assert_eq!(creation.new_call_logs.len(), 1);
    assert!(creation.new_call_logs[0].recordings.is_empty());
}

#[test]
fn s6_invalid_group_is_skipped_valid_group_still_emitted() {
    let generator = CallLogsGenerator::new(Uuid::new_v4());
    let directory = FakeDirectoryClient::new();

    let mut invalid = CelBuilder::new("2.0").hangup("SIP/a-1").build();
    // No ChanStart and no caller-id, so `to_call_log` rejects it for
    // missing source identity.
    invalid[0].cid_num.clear();

    let mut cels = incoming_call_skeleton();
    cels.extend(invalid);

    let creation = generator.from_cel(cels, &directory).unwrap();

    assert_eq!(creation.new_call_logs.len(), 1);
    assert_eq!(creation.skipped.len(), 1);
    assert_eq!(creation.skipped[0].linked_id, "2.0");
}

#[test]
fn supersession_deletes_previous_call_log_ids() {
    let generator = CallLogsGenerator::new(Uuid::new_v4());
    let directory = FakeDirectoryClient::new();
    let mut cels = incoming_call_skeleton();
    cels[0].call_log_id = Some(77);

    let creation = generator.from_cel(cels, &directory).unwrap();

    assert_eq!(
        creation.call_log_ids_to_delete,
        std::collections::BTreeSet::from([77])
    );
}

#[test]
fn known_user_with_extension_backfills_internal_extension() {
    let generator = CallLogsGenerator::new(Uuid::new_v4());
    let tenant_uuid = Uuid::new_v4();
    let user_uuid = Uuid::new_v4();
    let directory = FakeDirectoryClient::new().with_channel(
        "SIP/trunk-00000001",
        known_user_with_extension(user_uuid, 1, tenant_uuid, "1000", "default"),
    );

    let creation = generator.from_cel(incoming_call_skeleton(), &directory).unwrap();

    let call_log = &creation.new_call_logs[0];
    assert_eq!(call_log.source_internal_exten.as_deref(), Some("1000"));
    assert_eq!(call_log.source_internal_context.as_deref(), Some("default"));
}
