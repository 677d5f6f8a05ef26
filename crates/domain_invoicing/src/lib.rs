//! Invoicing Domain - Partner Billing Runs and Invoice Access
//!
//! This crate implements the billable heart of the incentive platform:
//! a scheduled billing run that discovers active partners, aggregates their
//! billable events from an external event service, converts the counts into
//! a monetary amount through a fixed rate table, and persists one due
//! invoice per partner per run.
//!
//! # Fail-soft policy
//!
//! The billing run degrades instead of aborting:
//! - an unavailable partner directory turns the run into a logged no-op,
//! - an unavailable event count contributes zero for that event type only,
//! - a failed invoice write is logged and the remaining partners still bill.
//!
//! Nothing in the run ever propagates an error to the scheduler.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_invoicing::{BillingRunService, RateTable};
//!
//! let service = BillingRunService::new(partners, events, store, RateTable::standard(), clock);
//! let summary = service.execute().await;
//! tracing::info!(invoices = summary.invoices_written, "billing run complete");
//! ```

pub mod invoice;
pub mod rates;
pub mod partner;
pub mod events;
pub mod ports;
pub mod billing_run;
pub mod access;
pub mod error;

pub use invoice::{Invoice, InvoiceStatus, UnknownStatus, PARTNER_BILL_LINE_ITEM};
pub use rates::{EventType, RateTable};
pub use partner::PartnerRecord;
pub use events::EventQuery;
pub use ports::{
    EventSource, InvoiceEmailRequest, InvoiceStore, NotificationSender, PartnerDirectory,
};
pub use billing_run::{BillingRunService, BillingRunSummary};
pub use access::InvoiceAccessService;
pub use error::InvoicingError;
