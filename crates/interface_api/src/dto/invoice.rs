//! Invoice DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::InvoiceId;
use domain_invoicing::{BillingRunSummary, Invoice, InvoiceEmailRequest};

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub id: InvoiceId,
    pub partner_id: String,
    /// Total amount in minor units of `currency`
    pub amount_minor: i64,
    pub currency: String,
    pub line_item: String,
    pub status: String,
    pub issued_at: DateTime<Utc>,
    pub due_date: NaiveDate,
}

impl InvoiceResponse {
    /// Maps a domain invoice to its wire shape
    ///
    /// Amounts in this system are always whole multiples of the minor
    /// unit; a non-representable amount would indicate store corruption
    /// and is surfaced by the caller as an internal error.
    pub fn try_from_invoice(invoice: &Invoice) -> Result<Self, String> {
        let amount_minor = invoice.amount.as_minor().map_err(|e| e.to_string())?;
        Ok(Self {
            id: invoice.id,
            partner_id: invoice.partner_id.as_str().to_string(),
            amount_minor,
            currency: invoice.amount.currency().code().to_string(),
            line_item: invoice.line_item.clone(),
            status: invoice.status.as_str().to_string(),
            issued_at: invoice.issued_at,
            due_date: invoice.due_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailInvoiceRequest {
    pub invoice_id: InvoiceId,
    pub recipient: String,
    pub subject: Option<String>,
}

impl EmailInvoiceRequest {
    pub fn into_domain(self) -> InvoiceEmailRequest {
        let request = InvoiceEmailRequest::new(self.invoice_id, self.recipient);
        match self.subject {
            Some(subject) => request.with_subject(subject),
            None => request,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailInvoiceResponse {
    pub invoice_id: InvoiceId,
    /// Broadcast response body, never empty
    pub broadcast: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BillingRunResponse {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub partners_discovered: usize,
    pub partners_active: usize,
    pub invoices_written: usize,
    pub degraded_event_queries: usize,
    pub store_failures: usize,
    pub clean: bool,
}

impl From<&BillingRunSummary> for BillingRunResponse {
    fn from(summary: &BillingRunSummary) -> Self {
        Self {
            run_id: summary.run_id.to_string(),
            started_at: summary.started_at,
            partners_discovered: summary.partners_discovered,
            partners_active: summary.partners_active,
            invoices_written: summary.invoices_written,
            degraded_event_queries: summary.degraded_event_queries,
            store_failures: summary.store_failures,
            clean: summary.is_clean(),
        }
    }
}
