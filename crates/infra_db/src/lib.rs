//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the invoicing system, built on SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `PgInvoiceStore` implements
//! the domain's `InvoiceStore` port, hiding all SQL behind the trait so
//! the billing run and access services never see the database.
//!
//! Monetary amounts are stored as integer minor units alongside their
//! currency code; every amount the billing run produces is a whole
//! multiple of the minor unit, so the representation is lossless.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PgInvoiceStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/invoicing")).await?;
//! let store = PgInvoiceStore::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::PgInvoiceStore;
