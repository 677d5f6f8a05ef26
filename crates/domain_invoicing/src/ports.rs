//! Invoicing Domain Ports
//!
//! Port interfaces for everything the invoicing domain needs from the
//! outside world, enabling swappable implementations (Postgres store,
//! reqwest gateways, in-memory stubs for tests).
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_invoicing::ports::InvoiceStore;
//! use std::sync::Arc;
//!
//! pub struct InvoiceAccessService {
//!     store: Arc<dyn InvoiceStore>,
//! }
//! ```
//!
//! Adapters are wired at application startup; the domain only ever sees
//! the traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, InvoiceId, PortError};

use crate::events::EventQuery;
use crate::invoice::Invoice;
use crate::partner::PartnerRecord;

/// Durable collection of invoice records
///
/// Rows are write-once-then-status-mutated; `update` exists solely so the
/// pay operation can persist a status transition.
#[async_trait]
pub trait InvoiceStore: DomainPort {
    /// Persists a newly-issued invoice
    async fn insert(&self, invoice: &Invoice) -> Result<(), PortError>;

    /// Fetches an invoice by id; `PortError::NotFound` when absent
    async fn find_by_id(&self, id: InvoiceId) -> Result<Invoice, PortError>;

    /// Persists a status mutation of an existing invoice
    async fn update(&self, invoice: &Invoice) -> Result<(), PortError>;

    /// Returns every stored invoice (non-core read surface)
    async fn find_all(&self) -> Result<Vec<Invoice>, PortError>;
}

/// Read access to the external partner roster
#[async_trait]
pub trait PartnerDirectory: DomainPort {
    /// Returns the current roster, possibly empty
    async fn roster(&self) -> Result<Vec<PartnerRecord>, PortError>;
}

/// Count queries against the external event service
///
/// Every call is a fresh query; implementations must not cache.
#[async_trait]
pub trait EventSource: DomainPort {
    /// Returns the number of events matching the query
    async fn count_events(&self, query: &EventQuery) -> Result<u64, PortError>;
}

/// Payload forwarded to the external broadcast service when an invoice is
/// emailed to a partner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceEmailRequest {
    pub invoice_id: InvoiceId,
    pub recipient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl InvoiceEmailRequest {
    pub fn new(invoice_id: InvoiceId, recipient: impl Into<String>) -> Self {
        Self {
            invoice_id,
            recipient: recipient.into(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Outbound notification dispatch
#[async_trait]
pub trait NotificationSender: DomainPort {
    /// Forwards the email request and returns the broadcast response body
    ///
    /// Implementations return the `data` field verbatim when the payload is
    /// structurally present; semantic validation (an empty body is a
    /// failure) belongs to the access service.
    async fn send_invoice_email(&self, request: &InvoiceEmailRequest) -> Result<String, PortError>;
}
