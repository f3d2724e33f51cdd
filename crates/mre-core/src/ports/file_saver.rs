use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::ports::SaveError;

/// Saves binary content locally under a given file name.
#[async_trait]
pub trait FileSaverPort: Send + Sync {
    /// Returns where the file ended up.
    async fn save_as(&self, bytes: Bytes, filename: &str) -> Result<PathBuf, SaveError>;
}
