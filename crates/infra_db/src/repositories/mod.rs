//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! domain types. Queries use the runtime SQLx API so the crate builds
//! without a live database.

pub mod invoice;

pub use invoice::PgInvoiceStore;
