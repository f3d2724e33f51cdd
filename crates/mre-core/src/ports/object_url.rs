use crate::document::{DocumentPayload, ObjectUrl};
use crate::ports::ObjectUrlError;

/// Turns payloads into displayable handles and takes them back.
///
/// Every successful `acquire` must be matched by exactly one `release`.
pub trait ObjectUrlPort: Send + Sync {
    fn acquire(&self, payload: DocumentPayload) -> ObjectUrl;

    fn release(&self, url: &ObjectUrl) -> Result<(), ObjectUrlError>;

    /// Payload behind a live handle.
    fn resolve(&self, url: &ObjectUrl) -> Option<DocumentPayload>;
}
