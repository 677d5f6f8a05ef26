//! Invoice repository implementation
//!
//! Rows are write-once-then-status-mutated: `insert` creates them,
//! `update` exists solely so the pay operation can persist a status
//! transition.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, Currency, DomainPort, HealthCheckResult, HealthCheckable, InvoiceId, Money,
    PartnerId, PortError,
};
use domain_invoicing::{Invoice, InvoiceStatus, InvoiceStore};

use crate::error::{classify_sqlx_error, DatabaseError};

/// Database row shape of an invoice
#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: Uuid,
    partner_id: String,
    amount_minor: i64,
    currency: String,
    line_item: String,
    status: String,
    issued_at: DateTime<Utc>,
    due_date: NaiveDate,
}

impl InvoiceRow {
    fn into_invoice(self) -> Result<Invoice, DatabaseError> {
        let currency: Currency = self
            .currency
            .parse()
            .map_err(|_| DatabaseError::RowMapping(format!("unknown currency '{}'", self.currency)))?;

        Ok(Invoice {
            id: InvoiceId::from_uuid(self.id),
            partner_id: PartnerId::new(self.partner_id),
            amount: Money::from_minor(self.amount_minor, currency),
            line_item: self.line_item,
            status: self.status.parse().map_err(|_| {
                DatabaseError::RowMapping(format!("unknown invoice status '{}'", self.status))
            })?,
            issued_at: self.issued_at,
            due_date: self.due_date,
        })
    }
}

fn amount_minor(invoice: &Invoice) -> Result<i64, DatabaseError> {
    invoice
        .amount
        .as_minor()
        .map_err(|e| DatabaseError::RowMapping(e.to_string()))
}

/// PostgreSQL implementation of the invoice store port
#[derive(Debug, Clone)]
pub struct PgInvoiceStore {
    pool: PgPool,
}

impl PgInvoiceStore {
    /// Creates a new store backed by the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgInvoiceStore {}

#[async_trait]
impl HealthCheckable for PgInvoiceStore {
    async fn health_check(&self) -> HealthCheckResult {
        let started = std::time::Instant::now();
        let result = sqlx::query("SELECT 1").execute(&self.pool).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "pg_invoice_store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "pg_invoice_store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(e.to_string()),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    async fn insert(&self, invoice: &Invoice) -> Result<(), PortError> {
        let minor = amount_minor(invoice)?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, partner_id, amount_minor, currency,
                line_item, status, issued_at, due_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::from(invoice.id))
        .bind(invoice.partner_id.as_str())
        .bind(minor)
        .bind(invoice.amount.currency().code())
        .bind(&invoice.line_item)
        .bind(invoice.status.as_str())
        .bind(invoice.issued_at)
        .bind(invoice.due_date)
        .execute(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        let row: Option<InvoiceRow> = sqlx::query_as(
            r#"
            SELECT id, partner_id, amount_minor, currency,
                   line_item, status, issued_at, due_date
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        match row {
            Some(row) => Ok(row.into_invoice()?),
            None => Err(DatabaseError::not_found("Invoice", id).into()),
        }
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), PortError> {
        let minor = amount_minor(invoice)?;

        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET partner_id = $2, amount_minor = $3, currency = $4,
                line_item = $5, status = $6, issued_at = $7, due_date = $8
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(invoice.id))
        .bind(invoice.partner_id.as_str())
        .bind(minor)
        .bind(invoice.amount.currency().code())
        .bind(&invoice.line_item)
        .bind(invoice.status.as_str())
        .bind(invoice.issued_at)
        .bind(invoice.due_date)
        .execute(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Invoice", invoice.id).into());
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Invoice>, PortError> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(
            r#"
            SELECT id, partner_id, amount_minor, currency,
                   line_item, status, issued_at, due_date
            FROM invoices
            ORDER BY issued_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        rows.into_iter()
            .map(|row| row.into_invoice().map_err(PortError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_row() -> InvoiceRow {
        InvoiceRow {
            id: Uuid::new_v4(),
            partner_id: "P1".to_string(),
            amount_minor: 40,
            currency: "USD".to_string(),
            line_item: "Partner Bill".to_string(),
            status: "pending".to_string(),
            issued_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        }
    }

    #[test]
    fn row_maps_to_domain_invoice() {
        let row = sample_row();
        let invoice = row.into_invoice().unwrap();

        assert_eq!(invoice.partner_id.as_str(), "P1");
        assert_eq!(invoice.amount, Money::from_minor(40, Currency::USD));
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(
            invoice.due_date,
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
    }

    #[test]
    fn unknown_currency_is_a_mapping_error() {
        let mut row = sample_row();
        row.currency = "XYZ".to_string();
        assert!(matches!(
            row.into_invoice(),
            Err(DatabaseError::RowMapping(_))
        ));
    }

    #[test]
    fn unknown_status_is_a_mapping_error() {
        let mut row = sample_row();
        row.status = "garbled".to_string();
        assert!(matches!(
            row.into_invoice(),
            Err(DatabaseError::RowMapping(_))
        ));
    }

    #[test]
    fn paid_status_round_trips() {
        let mut row = sample_row();
        row.status = "paid".to_string();
        assert_eq!(row.into_invoice().unwrap().status, InvoiceStatus::Paid);
    }
}
