//! Partner Invoicing - API Server Binary
//!
//! Starts the HTTP API and the scheduled billing runner.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin invoicing-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 API_DATABASE_URL=postgres://... cargo run --bin invoicing-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_PARTNER_DIRECTORY_URL` - Partner roster endpoint
//! * `API_EVENT_SOURCE_URL` - Event aggregator endpoint
//! * `API_NOTIFICATION_URL` - Broadcast service endpoint
//! * `API_BILLING_SCHEDULE` - Cron expression for the billing run
//! * `API_UPSTREAM_TIMEOUT_SECS` - Gateway request timeout (default: 10)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::SystemClock;
use domain_invoicing::{BillingRunService, InvoiceAccessService, RateTable};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PgInvoiceStore};
use infra_gateway::{EventCountGateway, NotificationGateway, PartnerDirectoryGateway};
use interface_api::config::ApiConfig;
use interface_api::scheduler::{parse_schedule, run_on_schedule};
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Partner Invoicing API Server"
    );

    // Schedule is validated before anything else is wired
    let schedule = parse_schedule(&config.billing_schedule)?;

    let pool = create_pool(DatabaseConfig::new(&config.database_url)).await?;
    run_migrations(&pool).await?;

    let store = Arc::new(PgInvoiceStore::new(pool));
    let partners = Arc::new(PartnerDirectoryGateway::new(config.partner_directory())?);
    let events = Arc::new(EventCountGateway::new(config.event_source())?);
    let notifier = Arc::new(NotificationGateway::new(config.notification())?);

    let billing = Arc::new(BillingRunService::new(
        partners,
        events,
        store.clone(),
        RateTable::standard(),
        Arc::new(SystemClock),
    ));
    let access = Arc::new(InvoiceAccessService::new(store.clone(), notifier));

    let scheduler = tokio::spawn(run_on_schedule(schedule, billing.clone()));

    let state = AppState::new(access, billing, store);
    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.abort();
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables, falling back to
/// individual variables and defaults
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("API_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            partner_directory_url: std::env::var("API_PARTNER_DIRECTORY_URL")
                .unwrap_or(defaults.partner_directory_url),
            event_source_url: std::env::var("API_EVENT_SOURCE_URL")
                .unwrap_or(defaults.event_source_url),
            notification_url: std::env::var("API_NOTIFICATION_URL")
                .unwrap_or(defaults.notification_url),
            billing_schedule: std::env::var("API_BILLING_SCHEDULE")
                .unwrap_or(defaults.billing_schedule),
            upstream_timeout_secs: std::env::var("API_UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.upstream_timeout_secs),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
        }
    })
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
