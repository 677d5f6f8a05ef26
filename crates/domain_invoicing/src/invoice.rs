//! Invoice aggregate
//!
//! One invoice per (partner, billing run). An invoice is immutable after
//! issue except for its status, which moves through exactly one validated
//! transition: `Pending → Paid`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{due_date_after, InvoiceId, Money, PartnerId};

use crate::error::InvoicingError;

/// The fixed line-item label carried by every partner bill
pub const PARTNER_BILL_LINE_ITEM: &str = "Partner Bill";

/// Invoice payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Issued and awaiting payment
    Pending,
    /// Settled by the pay operation
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

}

/// A stored status string that is neither `pending` nor `paid`
#[derive(Debug, Error)]
#[error("unknown invoice status '{0}'")]
pub struct UnknownStatus(String);

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// An invoice for one partner's billable usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier, assigned at issue time
    pub id: InvoiceId,
    /// The billed partner; identity is owned by the external directory
    pub partner_id: PartnerId,
    /// Total amount, sum of count × rate over the rate table
    pub amount: Money,
    /// Fixed descriptive label for this billing category
    pub line_item: String,
    /// Payment status
    pub status: InvoiceStatus,
    /// Instant the invoice was generated
    pub issued_at: DateTime<Utc>,
    /// Issue date plus one calendar month, clamped at month end
    pub due_date: NaiveDate,
}

impl Invoice {
    /// Issues a new pending invoice for a partner
    ///
    /// The due date is derived from `issued_at`, which the billing run
    /// captures once per partner iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or the due date is not
    /// derivable (date overflow).
    pub fn issue(
        partner_id: PartnerId,
        amount: Money,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, InvoicingError> {
        if amount.is_negative() {
            return Err(InvoicingError::NegativeAmount(amount));
        }

        Ok(Self {
            id: InvoiceId::new_v7(),
            partner_id,
            amount,
            line_item: PARTNER_BILL_LINE_ITEM.to_string(),
            status: InvoiceStatus::Pending,
            issued_at,
            due_date: due_date_after(issued_at)?,
        })
    }

    /// Marks the invoice as paid
    ///
    /// This is a targeted status transition, not a record replacement:
    /// only a `Pending` invoice can move to `Paid`, and no other field is
    /// ever rewritten.
    pub fn mark_paid(&mut self) -> Result<(), InvoicingError> {
        match self.status {
            InvoiceStatus::Pending => {
                self.status = InvoiceStatus::Paid;
                Ok(())
            }
            from => Err(InvoicingError::InvalidStatusTransition {
                from,
                to: InvoiceStatus::Paid,
            }),
        }
    }

    /// Returns true if the invoice is still awaiting payment
    pub fn is_pending(&self) -> bool {
        self.status == InvoiceStatus::Pending
    }
}
