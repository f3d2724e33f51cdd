//! # Dependency Injection
//!
//! Builds the infra adapters from [`AppConfig`] and hands them to the use
//! cases as port trait objects. This is the only module that depends on
//! `mre-infra` and `mre-app` at the same time; it assembles, it does not
//! decide.

use std::sync::Arc;

use mre_app::{DocumentViewer, DownloadInvoice};
use mre_core::ports::{
    DocumentFetchPort, FileSaverPort, NotificationPort, ObjectUrlPort, TranslatorPort,
};
use mre_core::AppConfig;
use mre_infra::notify::Notification;
use mre_infra::{
    CatalogTranslator, ChannelNotifier, DownloadDirFileSaver, HttpDocumentClient,
    InMemoryObjectUrlRegistry,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

pub type WiringResult<T> = Result<T, WiringError>;

/// Adapter construction failures.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpInit(String),

    #[error("Translation catalog initialization failed: {0}")]
    CatalogInit(String),

    #[error("Download directory initialization failed: {0}")]
    DownloadDirInit(String),
}

/// Wired use cases plus the handles the UI layer consumes directly.
pub struct AppDeps {
    pub viewer: Arc<DocumentViewer>,
    pub invoices: Arc<DownloadInvoice>,

    /// Error notifications to render as toasts.
    pub notifications: UnboundedReceiver<Notification>,

    /// Object URL table the rendered documents are resolved against.
    pub object_urls: Arc<InMemoryObjectUrlRegistry>,
}

/// Build every adapter described by `config` and wire the use cases.
///
/// # Errors
///
/// Returns a [`WiringError`] naming the adapter that could not be built.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let fetcher: Arc<dyn DocumentFetchPort> = Arc::new(
        HttpDocumentClient::new(&config.api).map_err(|e| WiringError::HttpInit(e.to_string()))?,
    );

    let translator: Arc<dyn TranslatorPort> = Arc::new(
        CatalogTranslator::load(&config.i18n.locale, config.i18n.catalog_path.as_deref())
            .map_err(|e| WiringError::CatalogInit(e.to_string()))?,
    );

    let saver = DownloadDirFileSaver::from_config(config.storage.download_dir.clone())
        .map_err(|e| WiringError::DownloadDirInit(e.to_string()))?;
    info!(dir = %saver.dir().display(), "download directory resolved");
    let file_saver: Arc<dyn FileSaverPort> = Arc::new(saver);

    let (channel_notifier, notifications) = ChannelNotifier::new();
    let notifier: Arc<dyn NotificationPort> = Arc::new(channel_notifier);

    let registry = Arc::new(InMemoryObjectUrlRegistry::new());
    let object_urls: Arc<dyn ObjectUrlPort> = registry.clone();

    let viewer = DocumentViewer::from_ports(
        fetcher.clone(),
        object_urls,
        notifier.clone(),
        translator.clone(),
        file_saver.clone(),
    );
    let invoices = DownloadInvoice::from_ports(fetcher, file_saver, notifier, translator);

    Ok(AppDeps {
        viewer: Arc::new(viewer),
        invoices: Arc::new(invoices),
        notifications,
        object_urls: registry,
    })
}
