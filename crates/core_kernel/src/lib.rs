//! Core Kernel - Foundational types and utilities for the partner invoicing system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic, minor-unit oriented
//! - Billing-calendar arithmetic (due-date derivation, injectable clock)
//! - Common identifiers and value objects
//! - Port infrastructure shared by internal and external adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{due_date_after, BillingClock, SystemClock, TemporalError};
pub use identifiers::{InvoiceId, BillingRunId, NotificationId, PartnerId};
pub use ports::{
    PortError, DomainPort, GatewayConfig,
    HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
