use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use mre_core::ports::{ObjectUrlError, ObjectUrlPort};
use mre_core::{DocumentPayload, ObjectUrl};

/// Process-local object URL table.
///
/// Payloads stay in memory until their handle is released. The counters
/// let callers check that every acquire was matched by a release.
#[derive(Default)]
pub struct InMemoryObjectUrlRegistry {
    live: Mutex<HashMap<ObjectUrl, DocumentPayload>>,
    acquired: AtomicU64,
    released: AtomicU64,
}

impl InMemoryObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.entries().len()
    }

    pub fn acquired_total(&self) -> u64 {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released_total(&self) -> u64 {
        self.released.load(Ordering::SeqCst)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ObjectUrl, DocumentPayload>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ObjectUrlPort for InMemoryObjectUrlRegistry {
    fn acquire(&self, payload: DocumentPayload) -> ObjectUrl {
        let url = ObjectUrl::new();
        let size = payload.len();
        self.entries().insert(url.clone(), payload);
        self.acquired.fetch_add(1, Ordering::SeqCst);
        debug!(url = %url, size, "object url created");
        url
    }

    fn release(&self, url: &ObjectUrl) -> Result<(), ObjectUrlError> {
        match self.entries().remove(url) {
            Some(_) => {
                self.released.fetch_add(1, Ordering::SeqCst);
                debug!(url = %url, "object url revoked");
                Ok(())
            }
            None => {
                warn!(url = %url, "revoking an object url that is not live");
                Err(ObjectUrlError::UnknownHandle(url.to_string()))
            }
        }
    }

    fn resolve(&self, url: &ObjectUrl) -> Option<DocumentPayload> {
        self.entries().get(url).cloned()
    }
}
