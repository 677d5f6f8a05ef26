//! Invoice handlers
//!
//! Thin pass-through over the access service plus the manual billing-run
//! trigger; all branching beyond error mapping lives in the domain.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use core_kernel::InvoiceId;

use crate::dto::invoice::{
    BillingRunResponse, EmailInvoiceRequest, EmailInvoiceResponse, InvoiceResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Gets an invoice by ID
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state.access.get(id).await?;
    let response = InvoiceResponse::try_from_invoice(&invoice).map_err(ApiError::Internal)?;
    Ok(Json(response))
}

/// Lists all invoices
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.access.list().await?;
    let responses = invoices
        .iter()
        .map(InvoiceResponse::try_from_invoice)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::Internal)?;
    Ok(Json(responses))
}

/// Marks an invoice as paid
pub async fn pay_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state.access.mark_paid(id).await?;
    info!(invoice = %id, "invoice marked paid");
    let response = InvoiceResponse::try_from_invoice(&invoice).map_err(ApiError::Internal)?;
    Ok(Json(response))
}

/// Emails an invoice to a partner through the broadcast service
pub async fn email_invoice(
    State(state): State<AppState>,
    Json(request): Json<EmailInvoiceRequest>,
) -> Result<Json<EmailInvoiceResponse>, ApiError> {
    let invoice_id = request.invoice_id;

    // The invoice must exist before anything is dispatched
    state.access.get(invoice_id).await?;

    let broadcast = state.access.email_invoice(&request.into_domain()).await?;
    Ok(Json(EmailInvoiceResponse {
        invoice_id,
        broadcast,
    }))
}

/// Triggers a billing run outside the schedule
pub async fn trigger_billing_run(
    State(state): State<AppState>,
) -> Result<Json<BillingRunResponse>, ApiError> {
    let summary = state.billing.execute().await;
    info!(
        run_id = %summary.run_id,
        invoices_written = summary.invoices_written,
        "manual billing run completed"
    );
    Ok(Json(BillingRunResponse::from(&summary)))
}
