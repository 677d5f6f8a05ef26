//! The billing run orchestrator
//!
//! Produces one pending invoice per active partner per run. The run is
//! deliberately fail-soft: upstream failures degrade the affected slice of
//! work (one event type, one partner, or the whole roster) and are surfaced
//! through logs and the run summary, never as an error to the scheduler.
//!
//! Partner processing is sequential within a run; each partner's invoice
//! write is an independent unit of work with no cross-partner rollup or
//! transaction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use core_kernel::{BillingClock, BillingRunId, Money, PartnerId};

use crate::events::EventQuery;
use crate::invoice::Invoice;
use crate::ports::{EventSource, InvoiceStore, PartnerDirectory};
use crate::rates::RateTable;

/// Outcome counters for one billing run, for operators and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingRunSummary {
    pub run_id: BillingRunId,
    pub started_at: DateTime<Utc>,
    /// Partners returned by the directory, active or not
    pub partners_discovered: usize,
    /// Partners that passed the activity filter
    pub partners_active: usize,
    /// Invoices successfully persisted
    pub invoices_written: usize,
    /// Event-count queries that failed and degraded to zero
    pub degraded_event_queries: usize,
    /// Invoice writes (or builds) that failed and were skipped
    pub store_failures: usize,
}

impl BillingRunSummary {
    fn begin(started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: BillingRunId::new(),
            started_at,
            partners_discovered: 0,
            partners_active: 0,
            invoices_written: 0,
            degraded_event_queries: 0,
            store_failures: 0,
        }
    }

    /// True when every active partner got an invoice and no event query
    /// degraded to zero
    pub fn is_clean(&self) -> bool {
        self.degraded_event_queries == 0
            && self.store_failures == 0
            && self.invoices_written == self.partners_active
    }
}

/// Orchestrates the scheduled invoice-generation workflow
///
/// Collaborators are injected as ports so the run can execute against the
/// real HTTP gateways and Postgres in production and against in-memory
/// stubs in tests. The clock is a port too: the instant captured per
/// partner drives both the event queries and the due date.
pub struct BillingRunService {
    partners: Arc<dyn PartnerDirectory>,
    events: Arc<dyn EventSource>,
    store: Arc<dyn InvoiceStore>,
    rates: RateTable,
    clock: Arc<dyn BillingClock>,
}

impl BillingRunService {
    pub fn new(
        partners: Arc<dyn PartnerDirectory>,
        events: Arc<dyn EventSource>,
        store: Arc<dyn InvoiceStore>,
        rates: RateTable,
        clock: Arc<dyn BillingClock>,
    ) -> Self {
        Self {
            partners,
            events,
            store,
            rates,
            clock,
        }
    }

    /// Executes one billing run across all active partners
    ///
    /// Fail-soft at every stage:
    /// 1. An unavailable or empty roster completes the run as a no-op.
    /// 2. Inactive partners are filtered out.
    /// 3. Per partner: capture `now`, query a count for every rate-table
    ///    entry (a failed query contributes zero), sum count × rate, and
    ///    persist a pending invoice due one calendar month out.
    ///
    /// Never returns an error; the summary carries the degradation
    /// counters. Not idempotent: running twice bills every active partner
    /// twice.
    pub async fn execute(&self) -> BillingRunSummary {
        let mut summary = BillingRunSummary::begin(self.clock.now());
        info!(run_id = %summary.run_id, "billing run started");

        let roster = match self.partners.roster().await {
            Ok(roster) => roster,
            Err(err) => {
                warn!(run_id = %summary.run_id, %err, "partner roster unavailable, completing run as no-op");
                return summary;
            }
        };

        summary.partners_discovered = roster.len();
        if roster.is_empty() {
            warn!(run_id = %summary.run_id, "partner roster is empty, nothing to bill");
            return summary;
        }

        let active: Vec<PartnerId> = roster
            .into_iter()
            .filter(|record| record.is_active())
            .map(|record| record.partner_id)
            .collect();
        summary.partners_active = active.len();

        for partner_id in active {
            self.bill_partner(&partner_id, &mut summary).await;
        }

        info!(
            run_id = %summary.run_id,
            discovered = summary.partners_discovered,
            active = summary.partners_active,
            written = summary.invoices_written,
            degraded = summary.degraded_event_queries,
            failed = summary.store_failures,
            "billing run finished"
        );
        summary
    }

    /// Bills a single partner: one amount, one invoice, one store write
    async fn bill_partner(&self, partner_id: &PartnerId, summary: &mut BillingRunSummary) {
        // One instant per partner; both event-type queries and the due
        // date observe it.
        let now = self.clock.now();
        let mut amount = Money::zero(self.rates.currency());

        for (event_type, rate) in self.rates.iter() {
            let query = EventQuery::new(event_type, partner_id.clone(), now);
            let count = match self.events.count_events(&query).await {
                Ok(count) => count,
                Err(err) => {
                    warn!(
                        partner = %partner_id,
                        event_type = %event_type,
                        %err,
                        "event count unavailable, billing zero for this event type"
                    );
                    summary.degraded_event_queries += 1;
                    0
                }
            };
            amount = amount + rate.times(count);
        }

        let invoice = match Invoice::issue(partner_id.clone(), amount, now) {
            Ok(invoice) => invoice,
            Err(err) => {
                error!(partner = %partner_id, %err, "failed to build invoice, skipping partner");
                summary.store_failures += 1;
                return;
            }
        };

        match self.store.insert(&invoice).await {
            Ok(()) => {
                info!(
                    partner = %partner_id,
                    invoice = %invoice.id,
                    amount = %invoice.amount,
                    due = %invoice.due_date,
                    "invoice persisted"
                );
                summary.invoices_written += 1;
            }
            Err(err) => {
                error!(partner = %partner_id, %err, "invoice write failed, continuing with remaining partners");
                summary.store_failures += 1;
            }
        }
    }
}
