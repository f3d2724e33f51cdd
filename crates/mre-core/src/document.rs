//! Document identity and payload models.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content type used when the server does not report one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Where a remote document lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentLocator {
    /// API path (`/docs/123`) or absolute URL.
    Url(String),
    /// Documents endpoint keyed by resource type, owner and term,
    /// e.g. `invoice / <tenant id> / 202401`.
    Composite {
        resource_type: String,
        owner_id: String,
        term: String,
    },
}

impl DocumentLocator {
    /// Whether the locator identifies anything at all.
    ///
    /// Blank URLs and composite keys with a blank component are not usable.
    pub fn is_usable(&self) -> bool {
        match self {
            DocumentLocator::Url(url) => !url.trim().is_empty(),
            DocumentLocator::Composite {
                resource_type,
                owner_id,
                term,
            } => [resource_type, owner_id, term]
                .iter()
                .all(|part| !part.trim().is_empty()),
        }
    }

    /// Resolves the locator into a request path.
    ///
    /// URL locators are returned untouched; composite keys are appended to
    /// `documents_path` as `<documents_path>/<resource_type>/<owner_id>/<term>`
    /// without percent-encoding, so this is a lookup key rather than a URL.
    pub fn request_path(&self, documents_path: &str) -> String {
        match self {
            DocumentLocator::Url(url) => url.trim().to_string(),
            DocumentLocator::Composite {
                resource_type,
                owner_id,
                term,
            } => format!(
                "{}/{}/{}/{}",
                documents_path.trim_end_matches('/'),
                resource_type.trim(),
                owner_id.trim(),
                term.trim()
            ),
        }
    }
}

impl fmt::Display for DocumentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentLocator::Url(url) => write!(f, "{url}"),
            DocumentLocator::Composite {
                resource_type,
                owner_id,
                term,
            } => write!(f, "{resource_type}:{owner_id}:{term}"),
        }
    }
}

/// Identifies a remote document plus the name shown to the user.
///
/// Immutable once handed to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    locator: DocumentLocator,
    title: String,
}

impl DocumentReference {
    pub fn new(locator: DocumentLocator, title: impl Into<String>) -> Self {
        Self {
            locator,
            title: title.into(),
        }
    }

    /// Reference to a document addressed by URL or API path.
    pub fn from_url(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(DocumentLocator::Url(url.into()), title)
    }

    /// Reference to a document addressed by composite key.
    pub fn composite(
        resource_type: impl Into<String>,
        owner_id: impl Into<String>,
        term: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self::new(
            DocumentLocator::Composite {
                resource_type: resource_type.into(),
                owner_id: owner_id.into(),
                term: term.into(),
            },
            title,
        )
    }

    pub fn locator(&self) -> &DocumentLocator {
        &self.locator
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_usable(&self) -> bool {
        self.locator.is_usable()
    }
}

/// Raw document bytes plus their MIME type.
///
/// Lives only for the duration of a view or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPayload {
    bytes: Bytes,
    content_type: String,
}

impl DocumentPayload {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        let content_type = if content_type.trim().is_empty() {
            DEFAULT_CONTENT_TYPE.to_string()
        } else {
            content_type
        };
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension matching the MIME type, ignoring parameters such as `charset`.
    pub fn file_extension(&self) -> &'static str {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => "pdf",
            "text/html" => "html",
            "text/plain" => "txt",
            "image/png" => "png",
            "image/jpeg" => "jpg",
            _ => "bin",
        }
    }
}

/// Browser-style handle through which a payload can be displayed.
///
/// Rendered as `blob:mre/<uuid>`. Handles are only minted by an
/// `ObjectUrlPort` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectUrl(Uuid);

impl ObjectUrl {
    pub const SCHEME_PREFIX: &'static str = "blob:mre/";

    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }

    pub fn as_url(&self) -> String {
        format!("{}{}", Self::SCHEME_PREFIX, self.0)
    }
}

impl Default for ObjectUrl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::SCHEME_PREFIX, self.0)
    }
}
