//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more
//! meaningful error messages than standard assertions.

use chrono::Months;

use core_kernel::Money;
use domain_invoicing::{Invoice, InvoiceStatus, PARTNER_BILL_LINE_ITEM};

/// Asserts that an invoice carries the fixed partner-bill shape
///
/// # Panics
///
/// Panics if the line item or pending status differ from what a fresh
/// billing run produces.
pub fn assert_freshly_issued(invoice: &Invoice) {
    assert_eq!(
        invoice.line_item, PARTNER_BILL_LINE_ITEM,
        "unexpected line item: {}",
        invoice.line_item
    );
    assert_eq!(
        invoice.status,
        InvoiceStatus::Pending,
        "freshly issued invoice is not pending"
    );
}

/// Asserts that the due date is one calendar month after the issue date,
/// allowing for month-end clamping
pub fn assert_due_one_month_later(invoice: &Invoice) {
    let issued = invoice.issued_at.date_naive();
    let expected = issued
        .checked_add_months(Months::new(1))
        .unwrap_or_else(|| panic!("no due date derivable from {}", issued));
    assert_eq!(
        invoice.due_date, expected,
        "due date {} is not one month after {}",
        invoice.due_date, issued
    );
}

/// Asserts that two Money values are equal with a currency-aware message
pub fn assert_money_eq(actual: Money, expected: Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "amounts differ: actual={}, expected={}",
        actual,
        expected
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::InvoiceBuilder;
    use crate::fixtures::TemporalFixtures;

    #[test]
    fn freshly_issued_accepts_a_default_invoice() {
        assert_freshly_issued(&InvoiceBuilder::new().build());
    }

    #[test]
    fn due_one_month_later_handles_month_end() {
        let invoice = InvoiceBuilder::new()
            .issued_at(TemporalFixtures::month_end_instant())
            .build();
        assert_due_one_month_later(&invoice);
    }

    #[test]
    #[should_panic]
    fn freshly_issued_rejects_a_paid_invoice() {
        assert_freshly_issued(&InvoiceBuilder::new().paid().build());
    }
}
