use std::collections::HashMap;
use std::sync::Mutex;

use callogd_directory::{ContextInfo, DirectoryClient, ParticipantInfo};
use callogd_types::{LineId, MainExtension};
use uuid::Uuid;

/// An in-memory `DirectoryClient` for deterministic tests (§10.5).
///
/// Every lookup method records how many times it was called, so tests can
/// assert on the `ParticipantsProcessor`'s memoization behavior as well as
/// its resolution logic.
#[derive(Default)]
pub struct FakeDirectoryClient {
    by_channel: HashMap<String, ParticipantInfo>,
    by_uuid: HashMap<Uuid, ParticipantInfo>,
    contexts: HashMap<String, ContextInfo>,
    channel_lookup_count: Mutex<u32>,
    uuid_lookup_count: Mutex<u32>,
}

impl FakeDirectoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel_name: &str, info: ParticipantInfo) -> Self {
        self.by_uuid.insert(info.uuid, info.clone());
        self.by_channel.insert(channel_name.to_string(), info);
        self
    }

    pub fn with_context(mut self, name: &str, tenant_uuid: Uuid) -> Self {
        self.contexts.insert(
            name.to_string(),
            ContextInfo {
                name: name.to_string(),
                tenant_uuid,
            },
        );
        self
    }

    pub fn channel_lookup_count(&self) -> u32 {
        *self.channel_lookup_count.lock().unwrap()
    }

    pub fn uuid_lookup_count(&self) -> u32 {
        *self.uuid_lookup_count.lock().unwrap()
    }
}

/// Builds a `ParticipantInfo` for a known user with no tags and no main
/// extension, the common case in the §8 scenarios.
pub fn known_user(user_uuid: Uuid, line_id: u32, tenant_uuid: Uuid) -> ParticipantInfo {
    ParticipantInfo {
        uuid: user_uuid,
        line_id: LineId(line_id),
        tags: Vec::new(),
        tenant_uuid,
        main_extension: None,
    }
}

pub fn known_user_with_extension(
    user_uuid: Uuid,
    line_id: u32,
    tenant_uuid: Uuid,
    exten: &str,
    context: &str,
) -> ParticipantInfo {
    ParticipantInfo {
        uuid: user_uuid,
        line_id: LineId(line_id),
        tags: Vec::new(),
        tenant_uuid,
        main_extension: Some(MainExtension {
            exten: exten.to_string(),
            context: context.to_string(),
        }),
    }
}

impl DirectoryClient for FakeDirectoryClient {
    fn find_participant_by_channel(
        &self,
        channel_name: &str,
    ) -> callogd_directory::Result<Option<ParticipantInfo>> {
        *self.channel_lookup_count.lock().unwrap() += 1;
        Ok(self.by_channel.get(channel_name).cloned())
    }

    fn find_participant_by_uuid(&self, user_uuid: Uuid) -> callogd_directory::Result<Option<ParticipantInfo>> {
        *self.uuid_lookup_count.lock().unwrap() += 1;
        Ok(self.by_uuid.get(&user_uuid).cloned())
    }

    fn list_contexts(&self, name: &str) -> callogd_directory::Result<Vec<ContextInfo>> {
        Ok(self.contexts.get(name).cloned().into_iter().collect())
    }
}
