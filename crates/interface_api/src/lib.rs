//! HTTP API Layer
//!
//! REST surface and scheduled billing runner for the invoicing system,
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Invoice read/pay/email plus the manual run trigger
//! - **Scheduler**: Cron-driven task firing the billing run
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod scheduler;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_invoicing::{BillingRunService, InvoiceAccessService};

use crate::handlers::{health, invoices};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub access: Arc<InvoiceAccessService>,
    pub billing: Arc<BillingRunService>,
    pub store_health: Arc<dyn HealthCheckable>,
}

impl AppState {
    pub fn new(
        access: Arc<InvoiceAccessService>,
        billing: Arc<BillingRunService>,
        store_health: Arc<dyn HealthCheckable>,
    ) -> Self {
        Self {
            access,
            billing,
            store_health,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Invoice routes
    let invoice_routes = Router::new()
        .route("/", get(invoices::list_invoices))
        .route("/email", post(invoices::email_invoice))
        .route("/:id", get(invoices::get_invoice))
        .route("/:id/pay", post(invoices::pay_invoice));

    let api_routes = Router::new()
        .nest("/invoices", invoice_routes)
        .route("/billing-runs", post(invoices::trigger_billing_run));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
