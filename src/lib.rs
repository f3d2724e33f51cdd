//! MicroRealEstate document workflow
//!
//! Composition root: loads the config, installs tracing and wires the
//! document viewer and invoice download use cases to their adapters.

pub mod bootstrap;

pub use bootstrap::{init_tracing_subscriber, load_config, wire_dependencies, AppDeps};
pub use mre_app::{DocumentViewer, DownloadInvoice, ViewerView};
pub use mre_core::{AppConfig, DocumentReference, TenantRef};
