use thiserror::Error;

/// Why a document could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The reference carries no usable identifier; no request was made.
    #[error("document reference has no usable identifier")]
    InvalidReference,

    /// The document is absent or not accessible to the caller.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Network failure, timeout or unexpected status.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Object URL bookkeeping violations.
///
/// These mark leaks or double releases and are never shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectUrlError {
    #[error("object url {0} is not live (already released or never acquired)")]
    UnknownHandle(String),
}

/// Why a document could not be written to local storage.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid file name: {0:?}")]
    InvalidFilename(String),

    #[error("no download directory available")]
    NoDownloadDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
