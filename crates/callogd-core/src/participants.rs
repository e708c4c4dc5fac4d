use std::collections::{HashMap, HashSet};

use callogd_directory::{DirectoryCache, Lookup};
use callogd_types::{CallLogParticipant, RawCallLog, Role};
use uuid::Uuid;

/// Reconciles `raw_participants` (channel-keyed) and `participants_info`
/// (user-keyed) against the directory, producing `raw.participants` (§4.4).
///
/// Holds only a borrowed `DirectoryCache`, so it carries no state of its
/// own between calls to `process` — the cache is what is memoized, not
/// this struct.
pub struct ParticipantsProcessor<'a, 'b> {
    cache: &'a DirectoryCache<'b>,
}

impl<'a, 'b> ParticipantsProcessor<'a, 'b> {
    pub fn new(cache: &'a DirectoryCache<'b>) -> Self {
        ParticipantsProcessor { cache }
    }

    pub fn process(&self, raw: &mut RawCallLog) {
        for entry in raw.participants_info.drain(..) {
            let mut participant = CallLogParticipant::new(entry.user_uuid);
            participant.role = entry.role;
            participant.answered = entry.answered;
            raw.participants.push(participant);
        }

        let mut index_by_uuid: HashMap<Uuid, usize> = raw
            .participants
            .iter()
            .enumerate()
            .map(|(i, p)| (p.user_uuid, i))
            .collect();
        let mut touched: HashSet<Uuid> = HashSet::new();

        let channel_names: Vec<String> = raw.raw_participants.keys().cloned().collect();
        for channel_name in channel_names {
            let info = match self.cache.find_participant_by_channel(&channel_name) {
                Lookup::Found(info) => info,
                Lookup::NotFound | Lookup::Unavailable => continue,
            };
            touched.insert(info.uuid);

            let idx = *index_by_uuid.entry(info.uuid).or_insert_with(|| {
                raw.participants.push(CallLogParticipant::new(info.uuid));
                raw.participants.len() - 1
            });

            let attrs = raw.raw_participants.get(&channel_name).cloned().unwrap_or_default();
            let participant = &mut raw.participants[idx];
            participant.line_id = Some(info.line_id);
            participant.tags = info.tags.clone();
            if let Some(role) = attrs.role {
                participant.role = Some(role);
            }
            participant.answered = attrs.answered;

            if let Some(rp) = raw.raw_participants.get_mut(&channel_name) {
                rp.tenant_uuid = Some(info.tenant_uuid);
                rp.main_extension = info.main_extension;
                rp.line_id = Some(info.line_id);
                rp.tags = info.tags;
            }
        }

        let remaining: Vec<(Uuid, usize)> = index_by_uuid
            .iter()
            .filter(|(uuid, _)| !touched.contains(uuid))
            .map(|(uuid, idx)| (*uuid, *idx))
            .collect();

        for (uuid, idx) in remaining {
            let info = match self.cache.find_participant_by_uuid(uuid) {
                Lookup::Found(info) => info,
                Lookup::NotFound | Lookup::Unavailable => continue,
            };
            let participant = &mut raw.participants[idx];
            participant.line_id = Some(info.line_id);
            participant.tags = info.tags;
            if participant.role.is_none() {
                if Some(uuid) == raw.source_user_uuid {
                    participant.role = Some(Role::Source);
                } else if Some(uuid) == raw.destination_user_uuid {
                    participant.role = Some(Role::Destination);
                }
            }
        }
    }
}
