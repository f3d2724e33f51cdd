//! Port interfaces for the application layer
//!
//! Ports define the contract between the document use cases and the
//! infrastructure implementations (HTTP, object URL registry, file system,
//! notification sink, translations). Use cases receive them through their
//! constructors; nothing here is ambient or global.

mod document_fetch;
pub mod errors;
mod file_saver;
mod notification;
mod object_url;
mod translator;

pub use document_fetch::DocumentFetchPort;
pub use errors::{FetchError, ObjectUrlError, SaveError};
pub use file_saver::FileSaverPort;
pub use notification::NotificationPort;
pub use object_url::ObjectUrlPort;
pub use translator::TranslatorPort;
