//! Message ids of user-facing texts in the translation catalogs.

/// Shown when a document cannot be fetched, whatever the cause.
pub const DOCUMENT_NOT_FOUND: &str = "document-not-found";

/// Shown when a fetched document cannot be written locally.
pub const CANNOT_SAVE_DOCUMENT: &str = "cannot-save-document";
