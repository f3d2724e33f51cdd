//! MicroRealEstate document use cases
//!
//! This crate orchestrates the document viewer container and the invoice
//! download flow on top of the ports defined in `mre-core`.

pub mod usecases;

pub use usecases::{
    DocumentViewer, DownloadError, DownloadInvoice, ObjectUrlLease, ViewerView,
};
