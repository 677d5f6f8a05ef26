//! Invoice access operations
//!
//! Thin pass-through service over the invoice store and the notification
//! sender: get-by-id, mark-paid, email-notify. Not part of the billing
//! core; there is no branching logic here beyond error mapping and the
//! validated pay transition.

use std::sync::Arc;

use tracing::error;

use core_kernel::InvoiceId;

use crate::error::InvoicingError;
use crate::invoice::Invoice;
use crate::ports::{InvoiceEmailRequest, InvoiceStore, NotificationSender};

/// Read/pay/email operations on persisted invoices
pub struct InvoiceAccessService {
    store: Arc<dyn InvoiceStore>,
    notifier: Arc<dyn NotificationSender>,
}

impl InvoiceAccessService {
    pub fn new(store: Arc<dyn InvoiceStore>, notifier: Arc<dyn NotificationSender>) -> Self {
        Self { store, notifier }
    }

    /// Returns the invoice with the given id
    pub async fn get(&self, id: InvoiceId) -> Result<Invoice, InvoicingError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|err| InvoicingError::from_store(err, id))
    }

    /// Returns every stored invoice
    pub async fn list(&self) -> Result<Vec<Invoice>, InvoicingError> {
        self.store.find_all().await.map_err(InvoicingError::Store)
    }

    /// Marks an invoice as paid
    ///
    /// A targeted `Pending → Paid` transition validated against the stored
    /// state. The existence check happens before any write; paying an
    /// already-paid invoice is rejected.
    pub async fn mark_paid(&self, id: InvoiceId) -> Result<Invoice, InvoicingError> {
        let mut invoice = self
            .store
            .find_by_id(id)
            .await
            .map_err(|err| InvoicingError::from_store(err, id))?;

        invoice.mark_paid()?;

        self.store
            .update(&invoice)
            .await
            .map_err(|err| InvoicingError::from_store(err, id))?;
        Ok(invoice)
    }

    /// Emails an invoice through the external broadcast service
    ///
    /// An absent or empty response body is a failure signalled to the
    /// caller; the service never hands back an unusable value.
    pub async fn email_invoice(
        &self,
        request: &InvoiceEmailRequest,
    ) -> Result<String, InvoicingError> {
        let body = match self.notifier.send_invoice_email(request).await {
            Ok(body) => body,
            Err(err) => {
                error!(invoice = %request.invoice_id, %err, "invoice email dispatch failed");
                return Err(InvoicingError::NotificationFailed(err.to_string()));
            }
        };

        if body.trim().is_empty() {
            error!(invoice = %request.invoice_id, "broadcast service returned an empty body");
            return Err(InvoicingError::NotificationFailed(
                "broadcast response body was empty".to_string(),
            ));
        }

        Ok(body)
    }
}
