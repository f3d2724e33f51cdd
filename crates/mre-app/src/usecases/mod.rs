//! Document use cases
//!
//! [user opens a document]
//!         ↓
//! DocumentViewer  → fetch → ObjectUrlLease → ViewerView (UI)
//!         ↓ (ready)
//! DocumentViewer::download → FileSaverPort
//! ---------------------------------
//! [user clicks the invoice download button]
//!         ↓
//! DownloadInvoice → fetch → FileSaverPort

pub mod document_viewer;
pub mod download_invoice;
pub mod messages;
pub mod object_url_lease;

pub use document_viewer::{DocumentViewer, ViewerView};
pub use download_invoice::{DownloadError, DownloadInvoice};
pub use object_url_lease::ObjectUrlLease;
