use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Instant;

use uuid::Uuid;

use crate::client::DirectoryClient;
use crate::model::{ContextInfo, ParticipantInfo};

/// Outcome of a single directory lookup, distinguishing a confirmed miss
/// from a transient failure even though the generation pipeline treats
/// both as "not found" for the affected entity (§4.4, §7). Keeping them
/// distinct lets a caller log the right diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(ParticipantInfo),
    NotFound,
    Unavailable,
}

impl Lookup {
    pub fn into_option(self) -> Option<ParticipantInfo> {
        match self {
            Lookup::Found(info) => Some(info),
            Lookup::NotFound | Lookup::Unavailable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// A per-invocation, memoizing wrapper around a `DirectoryClient`.
///
/// One instance is created at the start of a `from_cel` call and discarded
/// at its end (§5, §9): it must never be promoted to a process-wide cache.
/// It also honors an optional deadline — once elapsed, further lookups are
/// treated as not-found without touching the underlying client (§5's
/// "Directory lookups must honor a deadline passed by the caller").
pub struct DirectoryCache<'a> {
    client: &'a dyn DirectoryClient,
    deadline: Option<Instant>,
    by_channel: RefCell<HashMap<String, Lookup>>,
    by_uuid: RefCell<HashMap<Uuid, Lookup>>,
}

impl<'a> DirectoryCache<'a> {
    pub fn new(client: &'a dyn DirectoryClient) -> Self {
        DirectoryCache {
            client,
            deadline: None,
            by_channel: RefCell::new(HashMap::new()),
            by_uuid: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_deadline(client: &'a dyn DirectoryClient, deadline: Instant) -> Self {
        DirectoryCache {
            client,
            deadline: Some(deadline),
            by_channel: RefCell::new(HashMap::new()),
            by_uuid: RefCell::new(HashMap::new()),
        }
    }

    fn deadline_exceeded(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn find_participant_by_channel(&self, channel_name: &str) -> Lookup {
        if let Some(cached) = self.by_channel.borrow().get(channel_name) {
            return cached.clone();
        }

        let outcome = if self.deadline_exceeded() {
            Lookup::Unavailable
        } else {
            match self.client.find_participant_by_channel(channel_name) {
                Ok(Some(info)) => Lookup::Found(info),
                Ok(None) => Lookup::NotFound,
                Err(_) => Lookup::Unavailable,
            }
        };

        self.by_channel
            .borrow_mut()
            .insert(channel_name.to_string(), outcome.clone());
        outcome
    }

    pub fn find_participant_by_uuid(&self, user_uuid: Uuid) -> Lookup {
        if let Some(cached) = self.by_uuid.borrow().get(&user_uuid) {
            return cached.clone();
        }

        let outcome = if self.deadline_exceeded() {
            Lookup::Unavailable
        } else {
            match self.client.find_participant_by_uuid(user_uuid) {
                Ok(Some(info)) => Lookup::Found(info),
                Ok(None) => Lookup::NotFound,
                Err(_) => Lookup::Unavailable,
            }
        };

        self.by_uuid.borrow_mut().insert(user_uuid, outcome.clone());
        outcome
    }

    /// Not memoized: `ensure_tenant_uuid` calls this at most once per
    /// `from_cel` invocation (only when no participant carried a tenant).
    pub fn list_contexts(&self, name: &str) -> Vec<ContextInfo> {
        if self.deadline_exceeded() {
            return Vec::new();
        }
        self.client.list_contexts(name).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct CountingClient {
        calls: AtomicU32,
        response: Option<ParticipantInfo>,
    }

    impl DirectoryClient for CountingClient {
        fn find_participant_by_channel(&self, _channel_name: &str) -> Result<Option<ParticipantInfo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }

        fn find_participant_by_uuid(&self, _user_uuid: Uuid) -> Result<Option<ParticipantInfo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }

        fn list_contexts(&self, _name: &str) -> Result<Vec<ContextInfo>> {
            Ok(Vec::new())
        }
    }

    struct FailingClient;

    impl DirectoryClient for FailingClient {
        fn find_participant_by_channel(&self, _channel_name: &str) -> Result<Option<ParticipantInfo>> {
            Err(Error::Unavailable("timeout".to_string()))
        }

        fn find_participant_by_uuid(&self, _user_uuid: Uuid) -> Result<Option<ParticipantInfo>> {
            Err(Error::Unavailable("timeout".to_string()))
        }

        fn list_contexts(&self, _name: &str) -> Result<Vec<ContextInfo>> {
            Err(Error::Unavailable("timeout".to_string()))
        }
    }

    #[test]
    fn memoizes_repeat_lookups_for_the_same_channel() {
        let client = CountingClient {
            calls: AtomicU32::new(0),
            response: None,
        };
        let cache = DirectoryCache::new(&client);

        cache.find_participant_by_channel("PJSIP/abc-1");
        cache.find_participant_by_channel("PJSIP/abc-1");

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failure_degrades_to_unavailable_not_found() {
        let cache = DirectoryCache::new(&FailingClient);
        let lookup = cache.find_participant_by_channel("PJSIP/abc-1");
        assert_eq!(lookup, Lookup::Unavailable);
        assert_eq!(lookup.into_option(), None);
    }

    #[test]
    fn elapsed_deadline_short_circuits_without_calling_client() {
        let client = CountingClient {
            calls: AtomicU32::new(0),
            response: None,
        };
        let past = Instant::now() - Duration::from_secs(1);
        let cache = DirectoryCache::with_deadline(&client, past);

        let lookup = cache.find_participant_by_channel("PJSIP/abc-1");

        assert_eq!(lookup, Lookup::Unavailable);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }
}
