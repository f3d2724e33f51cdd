//! # mre-core
//!
//! Core domain models and ports for the MicroRealEstate document workflow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod document;
pub mod invoice;
pub mod ports;
pub mod viewer;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use document::{DocumentLocator, DocumentPayload, DocumentReference, ObjectUrl};
pub use invoice::{invoice_filename, invoice_reference, TenantRef, INVOICE_LABEL_KEY};
pub use viewer::{FetchTicket, ViewerAction, ViewerEvent, ViewerState, ViewerStateMachine};
