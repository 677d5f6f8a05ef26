//! In-memory port implementations
//!
//! Swappable stand-ins for the Postgres store and the three HTTP gateways,
//! so services can be wired end to end without any infrastructure.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{
    AdapterHealth, BillingClock, DomainPort, HealthCheckResult, HealthCheckable, InvoiceId,
    PortError,
};
use domain_invoicing::{
    EventQuery, EventSource, EventType, Invoice, InvoiceEmailRequest, InvoiceStore,
    NotificationSender, PartnerDirectory, PartnerRecord,
};

/// Clock pinned to a single instant
pub struct FixedClock(pub DateTime<Utc>);

impl BillingClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// In-memory invoice store
///
/// Thread-safe and shareable; tests keep a handle to inspect what the
/// service under test wrote.
#[derive(Default)]
pub struct MemoryInvoiceStore {
    invoices: Mutex<HashMap<InvoiceId, Invoice>>,
    fail_writes: Mutex<bool>,
}

impl MemoryInvoiceStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Pre-populates the store with the given invoices
    pub fn with_invoices(invoices: Vec<Invoice>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut map = store.invoices.lock().unwrap();
            for invoice in invoices {
                map.insert(invoice.id, invoice);
            }
        }
        Arc::new(store)
    }

    /// Makes every subsequent write fail with a connection error
    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    /// Returns every stored invoice
    pub fn all(&self) -> Vec<Invoice> {
        self.invoices.lock().unwrap().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.invoices.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> Result<(), PortError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(PortError::connection("store unavailable"));
        }
        Ok(())
    }
}

impl DomainPort for MemoryInvoiceStore {}

#[async_trait]
impl HealthCheckable for MemoryInvoiceStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "memory_invoice_store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: None,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl InvoiceStore for MemoryInvoiceStore {
    async fn insert(&self, invoice: &Invoice) -> Result<(), PortError> {
        self.check_writable()?;
        self.invoices
            .lock()
            .unwrap()
            .insert(invoice.id, invoice.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        self.invoices
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("invoice", id))
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), PortError> {
        self.check_writable()?;
        let mut map = self.invoices.lock().unwrap();
        if !map.contains_key(&invoice.id) {
            return Err(PortError::not_found("invoice", invoice.id));
        }
        map.insert(invoice.id, invoice.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Invoice>, PortError> {
        let mut all = self.all();
        all.sort_by_key(|i| i.issued_at);
        Ok(all)
    }
}

/// Partner directory with a fixed roster
pub struct StaticPartnerDirectory {
    roster: Vec<PartnerRecord>,
    unavailable: bool,
}

impl StaticPartnerDirectory {
    pub fn with_roster(roster: Vec<PartnerRecord>) -> Arc<Self> {
        Arc::new(Self {
            roster,
            unavailable: false,
        })
    }

    /// Directory that fails every roster fetch
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            roster: vec![],
            unavailable: true,
        })
    }
}

impl DomainPort for StaticPartnerDirectory {}

#[async_trait]
impl PartnerDirectory for StaticPartnerDirectory {
    async fn roster(&self) -> Result<Vec<PartnerRecord>, PortError> {
        if self.unavailable {
            return Err(PortError::ServiceUnavailable {
                service: "partner-directory".to_string(),
            });
        }
        Ok(self.roster.clone())
    }
}

/// Event source that replays scripted counts per partner and event type
#[derive(Default)]
pub struct ScriptedEventSource {
    counts: HashMap<(EventType, String), u64>,
    queries: Mutex<Vec<EventQuery>>,
}

impl ScriptedEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a count for one partner and event type
    pub fn count(mut self, event_type: EventType, partner: &str, count: u64) -> Self {
        self.counts.insert((event_type, partner.to_string()), count);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns every query the service issued, in order
    pub fn queries(&self) -> Vec<EventQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl DomainPort for ScriptedEventSource {}

#[async_trait]
impl EventSource for ScriptedEventSource {
    async fn count_events(&self, query: &EventQuery) -> Result<u64, PortError> {
        self.queries.lock().unwrap().push(query.clone());
        let key = (query.event_type, query.partner_id.as_str().to_string());
        Ok(self.counts.get(&key).copied().unwrap_or(0))
    }
}

/// Notification sender that records requests and replies with a scripted body
pub struct RecordingNotifier {
    response: Result<String, String>,
    sent: Mutex<Vec<InvoiceEmailRequest>>,
}

impl RecordingNotifier {
    /// Replies to every send with the given broadcast body
    pub fn replying(body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(body.to_string()),
            sent: Mutex::new(vec![]),
        })
    }

    /// Fails every send with a connection error
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            sent: Mutex::new(vec![]),
        })
    }

    /// Returns every request forwarded to the broadcast service
    pub fn sent(&self) -> Vec<InvoiceEmailRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl DomainPort for RecordingNotifier {}

#[async_trait]
impl NotificationSender for RecordingNotifier {
    async fn send_invoice_email(&self, request: &InvoiceEmailRequest) -> Result<String, PortError> {
        self.sent.lock().unwrap().push(request.clone());
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(message) => Err(PortError::connection(message.clone())),
        }
    }
}
