//! Cron-driven billing runner
//!
//! A single tokio task that sleeps until the next cron tick, fires the
//! billing run, and awaits its completion before arming the next tick, so
//! runs never overlap from this task's perspective. The run itself never
//! errors; a failed run is visible only through logs and summary counters.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use cron::Schedule;
use thiserror::Error;
use tracing::{info, warn};

use domain_invoicing::BillingRunService;

/// Errors raised while setting up the schedule
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Invalid cron expression '{expression}': {message}")]
    InvalidExpression { expression: String, message: String },
}

/// Parses a cron expression into a schedule
pub fn parse_schedule(expression: &str) -> Result<Schedule, SchedulerError> {
    Schedule::from_str(expression).map_err(|e| SchedulerError::InvalidExpression {
        expression: expression.to_string(),
        message: e.to_string(),
    })
}

/// Runs billing on the given schedule until the task is dropped
///
/// Ticks that pass while a run is still executing are skipped, not queued:
/// after each run the task arms the next upcoming instant.
pub async fn run_on_schedule(schedule: Schedule, billing: Arc<BillingRunService>) {
    info!("billing scheduler started");

    loop {
        let Some(next) = schedule.upcoming(Utc).next() else {
            warn!("schedule has no upcoming ticks, stopping billing scheduler");
            return;
        };

        let wait = (next - Utc::now()).to_std().unwrap_or_default();
        info!(next_run = %next, "billing scheduler armed");
        tokio::time::sleep(wait).await;

        let summary = billing.execute().await;
        info!(
            run_id = %summary.run_id,
            invoices_written = summary.invoices_written,
            degraded_event_queries = summary.degraded_event_queries,
            store_failures = summary.store_failures,
            "scheduled billing run completed"
        );
    }
}
