//! Billing calendar arithmetic
//!
//! Due dates in this system are derived, never stored ahead of time: an
//! invoice issued at instant T is due one calendar month after T's date,
//! clamped to the end of the target month (Jan 31 → Feb 28/29). The clock
//! itself is a port so the billing run can be driven by a fixed instant in
//! tests.

use chrono::{DateTime, Months, NaiveDate, Utc};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Date arithmetic overflow for {0}")]
    DateOverflow(NaiveDate),
}

/// Returns the due date for an invoice issued at the given instant:
/// the issue date plus one calendar month, clamped at month end.
pub fn due_date_after(issued_at: DateTime<Utc>) -> Result<NaiveDate, TemporalError> {
    let issue_date = issued_at.date_naive();
    issue_date
        .checked_add_months(Months::new(1))
        .ok_or(TemporalError::DateOverflow(issue_date))
}

/// Source of "now" for billing operations
///
/// The orchestrator captures the clock once per partner iteration; both the
/// event-count queries and the due-date derivation for that partner observe
/// the same instant.
pub trait BillingClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl BillingClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
