//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults,
//! letting tests specify only the fields they care about.

use chrono::{DateTime, Utc};

use core_kernel::{due_date_after, InvoiceId, Money, PartnerId};
use domain_invoicing::{Invoice, InvoiceStatus, PARTNER_BILL_LINE_ITEM};

use crate::fixtures::{MoneyFixtures, TemporalFixtures};

/// Builder for constructing test invoices
///
/// Bypasses `Invoice::issue` so tests can put an invoice into any state,
/// including ones issue-time validation would reject.
pub struct InvoiceBuilder {
    id: InvoiceId,
    partner_id: PartnerId,
    amount: Money,
    line_item: String,
    status: InvoiceStatus,
    issued_at: DateTime<Utc>,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: InvoiceId::new_v7(),
            partner_id: PartnerId::new("P1"),
            amount: MoneyFixtures::usd_40(),
            line_item: PARTNER_BILL_LINE_ITEM.to_string(),
            status: InvoiceStatus::Pending,
            issued_at: TemporalFixtures::run_instant(),
        }
    }

    /// Sets the invoice ID
    pub fn with_id(mut self, id: InvoiceId) -> Self {
        self.id = id;
        self
    }

    /// Sets the billed partner
    pub fn with_partner(mut self, partner: &str) -> Self {
        self.partner_id = PartnerId::new(partner);
        self
    }

    /// Sets the total amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the line item label
    pub fn with_line_item(mut self, line_item: impl Into<String>) -> Self {
        self.line_item = line_item.into();
        self
    }

    /// Sets the payment status
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    /// Marks the invoice as already paid
    pub fn paid(self) -> Self {
        self.with_status(InvoiceStatus::Paid)
    }

    /// Sets the issue instant; the due date follows it
    pub fn issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }

    /// Builds the invoice
    ///
    /// # Panics
    ///
    /// Panics if the due date is not derivable from the issue instant,
    /// which cannot happen for any realistic test date.
    pub fn build(self) -> Invoice {
        let due_date = due_date_after(self.issued_at).unwrap();
        Invoice {
            id: self.id,
            partner_id: self.partner_id,
            amount: self.amount,
            line_item: self.line_item,
            status: self.status,
            issued_at: self.issued_at,
            due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn defaults_build_a_pending_partner_bill() {
        let invoice = InvoiceBuilder::new().build();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.line_item, PARTNER_BILL_LINE_ITEM);
        assert_eq!(
            invoice.due_date,
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
    }

    #[test]
    fn paid_builder_skips_the_pending_state() {
        let invoice = InvoiceBuilder::new().paid().build();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }
}
