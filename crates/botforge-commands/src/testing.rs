//! Test support: a recording in-memory [`CommandPlatform`].

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use botforge_platform::{
    CommandPayload, CommandPlatform, DestinationHandle, PlatformError, Result,
};

/// In-memory platform that records every call it receives.
///
/// `fetch_destination` succeeds for ids added via [`Self::with_destination`]
/// and fails with [`PlatformError::DestinationNotFound`] otherwise.
#[derive(Default)]
pub struct MockPlatform {
    ready: bool,
    known: HashSet<String>,
    cache: Mutex<HashMap<String, DestinationHandle>>,
    pub global_calls: Mutex<Vec<Vec<CommandPayload>>>,
    pub destination_calls: Mutex<Vec<(String, Vec<CommandPayload>)>>,
    pub fetches: AtomicUsize,
}

impl MockPlatform {
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    pub fn not_ready() -> Self {
        Self::default()
    }

    /// Make `id` resolvable by remote fetch.
    pub fn with_destination(mut self, id: &str) -> Self {
        self.known.insert(id.to_owned());
        self
    }

    /// Pre-populate the local cache for `id`.
    pub fn with_cached_destination(self, id: &str) -> Self {
        self.cache.lock().unwrap().insert(
            id.to_owned(),
            DestinationHandle {
                id: id.to_owned(),
                name: None,
            },
        );
        self
    }

    pub fn global_call_count(&self) -> usize {
        self.global_calls.lock().unwrap().len()
    }

    pub fn destination_ids_called(&self) -> Vec<String> {
        self.destination_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[async_trait]
impl CommandPlatform for MockPlatform {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn replace_global_commands(&self, commands: &[CommandPayload]) -> Result<()> {
        self.global_calls.lock().unwrap().push(commands.to_vec());
        Ok(())
    }

    async fn replace_destination_commands(
        &self,
        destination: &DestinationHandle,
        commands: &[CommandPayload],
    ) -> Result<()> {
        self.destination_calls
            .lock()
            .unwrap()
            .push((destination.id.clone(), commands.to_vec()));
        Ok(())
    }

    fn cached_destination(&self, id: &str) -> Option<DestinationHandle> {
        self.cache.lock().unwrap().get(id).cloned()
    }

    async fn fetch_destination(&self, id: &str) -> Result<DestinationHandle> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.known.contains(id) {
            return Err(PlatformError::DestinationNotFound { id: id.to_owned() });
        }
        let handle = DestinationHandle {
            id: id.to_owned(),
            name: Some(format!("destination {id}")),
        };
        self.cache
            .lock()
            .unwrap()
            .insert(id.to_owned(), handle.clone());
        Ok(handle)
    }
}
