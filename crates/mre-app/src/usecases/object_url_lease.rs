use std::fmt;
use std::sync::Arc;

use mre_core::ports::{ObjectUrlError, ObjectUrlPort};
use mre_core::{DocumentPayload, ObjectUrl};
use tracing::{debug, warn};

/// Scoped ownership of one live object URL.
///
/// The handle is released exactly once: either through [`ObjectUrlLease::release`]
/// or when the lease is dropped.
pub struct ObjectUrlLease {
    url: ObjectUrl,
    port: Arc<dyn ObjectUrlPort>,
    released: bool,
}

impl ObjectUrlLease {
    /// Wraps `payload` in a new handle owned by the returned lease.
    pub fn acquire(port: Arc<dyn ObjectUrlPort>, payload: DocumentPayload) -> Self {
        let url = port.acquire(payload);
        debug!(url = %url, "object url acquired");
        Self {
            url,
            port,
            released: false,
        }
    }

    pub fn url(&self) -> &ObjectUrl {
        &self.url
    }

    /// Releases the handle now and reports bookkeeping errors.
    pub fn release(mut self) -> Result<(), ObjectUrlError> {
        self.released = true;
        let result = self.port.release(&self.url);
        debug!(url = %self.url, ok = result.is_ok(), "object url released");
        result
    }
}

impl fmt::Debug for ObjectUrlLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectUrlLease")
            .field("url", &self.url)
            .field("released", &self.released)
            .finish()
    }
}

impl Drop for ObjectUrlLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.port.release(&self.url) {
            warn!(url = %self.url, error = %err, "object url release on drop failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingPort {
        live: Mutex<HashMap<ObjectUrl, DocumentPayload>>,
        released: Mutex<usize>,
    }

    impl ObjectUrlPort for CountingPort {
        fn acquire(&self, payload: DocumentPayload) -> ObjectUrl {
            let url = ObjectUrl::new();
            self.live.lock().unwrap().insert(url.clone(), payload);
            url
        }

        fn release(&self, url: &ObjectUrl) -> Result<(), ObjectUrlError> {
            *self.released.lock().unwrap() += 1;
            self.live
                .lock()
                .unwrap()
                .remove(url)
                .map(|_| ())
                .ok_or_else(|| ObjectUrlError::UnknownHandle(url.to_string()))
        }

        fn resolve(&self, url: &ObjectUrl) -> Option<DocumentPayload> {
            self.live.lock().unwrap().get(url).cloned()
        }
    }

    fn payload() -> DocumentPayload {
        DocumentPayload::new(b"%PDF-1.7".to_vec(), "application/pdf")
    }

    #[test]
    fn dropping_lease_releases_handle() {
        let port = Arc::new(CountingPort::default());
        let lease = ObjectUrlLease::acquire(port.clone(), payload());
        assert!(port.resolve(lease.url()).is_some());

        drop(lease);

        assert_eq!(*port.released.lock().unwrap(), 1);
        assert!(port.live.lock().unwrap().is_empty());
    }

    #[test]
    fn explicit_release_does_not_release_again_on_drop() {
        let port = Arc::new(CountingPort::default());
        let lease = ObjectUrlLease::acquire(port.clone(), payload());

        lease.release().expect("release live handle");

        assert_eq!(*port.released.lock().unwrap(), 1);
    }
}
