//! Invoicing domain errors

use thiserror::Error;

use core_kernel::{InvoiceId, Money, PortError, TemporalError};

use crate::invoice::InvoiceStatus;

/// Errors that can occur in the invoicing domain
#[derive(Debug, Error)]
pub enum InvoicingError {
    /// Requested invoice id does not exist
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// The requested status change is not a legal transition
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    /// Invoice amounts are invariantly non-negative
    #[error("Invoice amount must be non-negative, got {0}")]
    NegativeAmount(Money),

    /// The broadcast service returned an absent or empty response body
    #[error("Notification dispatch failed: {0}")]
    NotificationFailed(String),

    /// Due-date derivation failed
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// The invoice store failed for a reason other than a missing record
    #[error("Invoice store error: {0}")]
    Store(PortError),
}

impl InvoicingError {
    /// Maps a store-port failure on a specific invoice, turning
    /// `PortError::NotFound` into the domain's `InvoiceNotFound`.
    pub fn from_store(err: PortError, id: InvoiceId) -> Self {
        if err.is_not_found() {
            InvoicingError::InvoiceNotFound(id)
        } else {
            InvoicingError::Store(err)
        }
    }
}
