//! Invoice documents addressed by tenant and term.

use serde::{Deserialize, Serialize};

use crate::document::DocumentReference;

/// Resource type of invoices on the documents endpoint.
pub const INVOICE_RESOURCE_TYPE: &str = "invoice";

/// Translation key of the document-type label used in invoice filenames.
pub const INVOICE_LABEL_KEY: &str = "invoice";

/// The tenant an invoice belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRef {
    pub id: String,
    pub name: String,
}

impl TenantRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Reference to the invoice of `tenant` for `term` (e.g. `202401`).
pub fn invoice_reference(tenant: &TenantRef, term: &str, title: &str) -> DocumentReference {
    DocumentReference::composite(INVOICE_RESOURCE_TYPE, tenant.id.as_str(), term, title)
}

/// Deterministic filename `<owner>-<term>-<label>.pdf`.
///
/// `label` is the already localized document-type label.
pub fn invoice_filename(owner_name: &str, term: &str, label: &str) -> String {
    format!("{owner_name}-{term}-{label}.pdf")
}
