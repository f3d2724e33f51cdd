use std::sync::Arc;

use async_trait::async_trait;

use crate::document::{DocumentPayload, DocumentReference};
use crate::ports::FetchError;

/// Retrieves the binary content of a remote document.
///
/// Implementations always request a binary response and never retry; the
/// caller decides what a failure means.
#[async_trait]
pub trait DocumentFetchPort: Send + Sync {
    async fn fetch_document(
        &self,
        reference: &DocumentReference,
    ) -> Result<DocumentPayload, FetchError>;
}

#[async_trait]
impl<T: DocumentFetchPort + ?Sized> DocumentFetchPort for Arc<T> {
    async fn fetch_document(
        &self,
        reference: &DocumentReference,
    ) -> Result<DocumentPayload, FetchError> {
        (**self).fetch_document(reference).await
    }
}
