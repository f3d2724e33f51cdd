use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use mre_core::ports::{FileSaverPort, SaveError};

/// Writes documents into a download directory.
///
/// An existing file is never overwritten: like a browser download, the new
/// file gets a ` (n)` suffix before its extension.
pub struct DownloadDirFileSaver {
    dir: PathBuf,
}

impl DownloadDirFileSaver {
    /// Create a saver rooted at `dir`; the directory is created on first save.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Saver for the configured directory, or the platform download directory.
    pub fn from_config(download_dir: Option<PathBuf>) -> Result<Self, SaveError> {
        download_dir
            .or_else(dirs::download_dir)
            .map(Self::new)
            .ok_or(SaveError::NoDownloadDir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the first free `name`, `name (1)`, `name (2)`, ... file.
    ///
    /// Existence check and creation are one `create_new` open, so
    /// concurrent saves of the same name never share a path.
    async fn create_free(&self, filename: &str) -> Result<(PathBuf, fs::File), SaveError> {
        let (stem, extension) = match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (filename, None),
        };

        let mut n = 0u32;
        loop {
            let name = match (n, extension) {
                (0, _) => filename.to_string(),
                (n, Some(ext)) => format!("{stem} ({n}).{ext}"),
                (n, None) => format!("{stem} ({n})"),
            };
            let candidate = self.dir.join(name);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => return Ok((candidate, file)),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => n += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Keeps `filename` inside the download directory.
fn sanitize_filename(filename: &str) -> Result<String, SaveError> {
    let cleaned: String = filename
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return Err(SaveError::InvalidFilename(filename.to_string()));
    }
    Ok(cleaned)
}

#[async_trait]
impl FileSaverPort for DownloadDirFileSaver {
    async fn save_as(&self, bytes: Bytes, filename: &str) -> Result<PathBuf, SaveError> {
        let filename = sanitize_filename(filename)?;
        fs::create_dir_all(&self.dir).await?;

        let (path, mut file) = self.create_free(&filename).await?;
        let written = async {
            file.write_all(&bytes).await?;
            file.flush().await
        }
        .await;
        if let Err(err) = written {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(err.into());
        }
        debug!(path = %path.display(), size = bytes.len(), "file saved");
        Ok(path)
    }
}
