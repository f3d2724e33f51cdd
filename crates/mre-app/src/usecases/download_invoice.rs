use std::path::PathBuf;
use std::sync::Arc;

use mre_core::ports::{
    DocumentFetchPort, FetchError, FileSaverPort, NotificationPort, SaveError, TranslatorPort,
};
use mre_core::{invoice_filename, invoice_reference, TenantRef, INVOICE_LABEL_KEY};
use tracing::{info, warn};

use crate::usecases::messages::{CANNOT_SAVE_DOCUMENT, DOCUMENT_NOT_FOUND};

/// Errors produced by the invoice download.
///
/// The user has already been notified when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("fetch invoice failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("save invoice failed: {0}")]
    Save(#[from] SaveError),
}

/// Use case behind the tenant's invoice download button.
///
/// Keeps no view state: fetch, then save under
/// `<tenant name>-<term>-<localized "invoice">.pdf`.
pub struct DownloadInvoice {
    fetcher: Arc<dyn DocumentFetchPort>,
    file_saver: Arc<dyn FileSaverPort>,
    notifier: Arc<dyn NotificationPort>,
    translator: Arc<dyn TranslatorPort>,
}

impl DownloadInvoice {
    pub fn from_ports(
        fetcher: Arc<dyn DocumentFetchPort>,
        file_saver: Arc<dyn FileSaverPort>,
        notifier: Arc<dyn NotificationPort>,
        translator: Arc<dyn TranslatorPort>,
    ) -> Self {
        Self {
            fetcher,
            file_saver,
            notifier,
            translator,
        }
    }

    /// Filename the invoice of `tenant` for `term` is saved under.
    pub fn filename(&self, tenant: &TenantRef, term: &str) -> String {
        let label = self.translator.translate(INVOICE_LABEL_KEY);
        invoice_filename(&tenant.name, term, &label)
    }

    /// Downloads the invoice of `tenant` for `term` and saves it locally.
    ///
    /// Nothing is written when the fetch fails. Every failure sends exactly
    /// one notification before being returned.
    #[tracing::instrument(
        name = "usecase.download_invoice.execute",
        skip(self, tenant),
        fields(tenant_id = %tenant.id, term = %term)
    )]
    pub async fn execute(&self, tenant: &TenantRef, term: &str) -> Result<PathBuf, DownloadError> {
        let filename = self.filename(tenant, term);
        let reference = invoice_reference(tenant, term, &filename);

        let payload = match self.fetcher.fetch_document(&reference).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "invoice fetch failed");
                self.notifier
                    .notify_error(&self.translator.translate(DOCUMENT_NOT_FOUND));
                return Err(err.into());
            }
        };

        match self
            .file_saver
            .save_as(payload.bytes().clone(), &filename)
            .await
        {
            Ok(path) => {
                info!(path = %path.display(), bytes = payload.len(), "invoice saved");
                Ok(path)
            }
            Err(err) => {
                warn!(error = %err, filename = %filename, "invoice save failed");
                self.notifier
                    .notify_error(&self.translator.translate(CANNOT_SAVE_DOCUMENT));
                Err(err.into())
            }
        }
    }
}
