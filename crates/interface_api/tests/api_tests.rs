//! API surface tests
//!
//! Wires the router against in-memory stub ports and exercises the HTTP
//! contract end to end: status codes, JSON bodies, and error mapping.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use domain_invoicing::{BillingRunService, EventType, InvoiceAccessService, RateTable};
use interface_api::dto::invoice::{BillingRunResponse, EmailInvoiceResponse, InvoiceResponse};
use interface_api::{create_router, AppState};
use test_utils::{
    FixedClock, InvoiceBuilder, MemoryInvoiceStore, PartnerFixtures, RecordingNotifier,
    ScriptedEventSource, StaticPartnerDirectory, TemporalFixtures,
};

struct TestApp {
    server: TestServer,
    store: Arc<MemoryInvoiceStore>,
    notifier: Arc<RecordingNotifier>,
}

fn app_with(store: Arc<MemoryInvoiceStore>, notifier: Arc<RecordingNotifier>) -> TestApp {
    let partners = StaticPartnerDirectory::with_roster(PartnerFixtures::mixed_roster());
    let events = ScriptedEventSource::new()
        .count(EventType::OfferCreated, "P1", 3)
        .count(EventType::OrderOptimized, "P1", 2)
        .into_arc();
    let clock = Arc::new(FixedClock(TemporalFixtures::run_instant()));

    let billing = Arc::new(BillingRunService::new(
        partners,
        events,
        store.clone(),
        RateTable::standard(),
        clock,
    ));
    let access = Arc::new(InvoiceAccessService::new(store.clone(), notifier.clone()));

    let state = AppState::new(access, billing, store.clone());
    let server = TestServer::new(create_router(state)).unwrap();

    TestApp {
        server,
        store,
        notifier,
    }
}

fn default_app() -> TestApp {
    app_with(MemoryInvoiceStore::new(), RecordingNotifier::replying("ok"))
}

// ============================================================================
// Health
// ============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = default_app();
        let response = app.server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn readiness_checks_the_store() {
        let app = default_app();
        let response = app.server.get("/health/ready").await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["status"], "ready");
    }
}

// ============================================================================
// Invoice reads
// ============================================================================

mod reads {
    use super::*;

    #[tokio::test]
    async fn get_returns_the_stored_invoice() {
        let invoice = InvoiceBuilder::new().with_partner("P7").build();
        let app = app_with(
            MemoryInvoiceStore::with_invoices(vec![invoice.clone()]),
            RecordingNotifier::replying("ok"),
        );

        let response = app
            .server
            .get(&format!("/api/v1/invoices/{}", invoice.id.as_uuid()))
            .await;
        response.assert_status_ok();

        let body: InvoiceResponse = response.json();
        assert_eq!(body.partner_id, "P7");
        assert_eq!(body.amount_minor, 40);
        assert_eq!(body.status, "pending");
        assert_eq!(body.line_item, "Partner Bill");
    }

    #[tokio::test]
    async fn get_unknown_invoice_is_404() {
        let app = default_app();
        let response = app
            .server
            .get(&format!("/api/v1/invoices/{}", uuid::Uuid::new_v4()))
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<serde_json::Value>()["error"], "not_found");
    }

    #[tokio::test]
    async fn list_returns_every_invoice() {
        let app = app_with(
            MemoryInvoiceStore::with_invoices(vec![
                InvoiceBuilder::new().with_partner("A").build(),
                InvoiceBuilder::new().with_partner("B").build(),
            ]),
            RecordingNotifier::replying("ok"),
        );

        let response = app.server.get("/api/v1/invoices").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<InvoiceResponse>>().len(), 2);
    }
}

// ============================================================================
// Pay
// ============================================================================

mod pay {
    use super::*;

    #[tokio::test]
    async fn pay_transitions_pending_to_paid() {
        let invoice = InvoiceBuilder::new().build();
        let app = app_with(
            MemoryInvoiceStore::with_invoices(vec![invoice.clone()]),
            RecordingNotifier::replying("ok"),
        );

        let response = app
            .server
            .post(&format!("/api/v1/invoices/{}/pay", invoice.id.as_uuid()))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<InvoiceResponse>().status, "paid");

        // The transition persisted
        let stored = &app.store.all()[0];
        assert!(!stored.is_pending());
    }

    #[tokio::test]
    async fn paying_twice_is_a_conflict() {
        let invoice = InvoiceBuilder::new().paid().build();
        let app = app_with(
            MemoryInvoiceStore::with_invoices(vec![invoice.clone()]),
            RecordingNotifier::replying("ok"),
        );

        let response = app
            .server
            .post(&format!("/api/v1/invoices/{}/pay", invoice.id.as_uuid()))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<serde_json::Value>()["error"], "conflict");
    }

    #[tokio::test]
    async fn paying_an_unknown_invoice_is_404() {
        let app = default_app();
        let response = app
            .server
            .post(&format!("/api/v1/invoices/{}/pay", uuid::Uuid::new_v4()))
            .await;
        response.assert_status_not_found();
    }
}

// ============================================================================
// Email
// ============================================================================

mod email {
    use super::*;

    #[tokio::test]
    async fn email_forwards_to_the_broadcast_service() {
        let invoice = InvoiceBuilder::new().build();
        let app = app_with(
            MemoryInvoiceStore::with_invoices(vec![invoice.clone()]),
            RecordingNotifier::replying("broadcast accepted"),
        );

        let response = app
            .server
            .post("/api/v1/invoices/email")
            .json(&json!({
                "invoice_id": invoice.id.as_uuid(),
                "recipient": "partner@example.com",
                "subject": "January invoice"
            }))
            .await;
        response.assert_status_ok();

        let body: EmailInvoiceResponse = response.json();
        assert_eq!(body.broadcast, "broadcast accepted");

        let sent = app.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "partner@example.com");
        assert_eq!(sent[0].subject.as_deref(), Some("January invoice"));
    }

    #[tokio::test]
    async fn empty_broadcast_body_is_a_bad_gateway() {
        let invoice = InvoiceBuilder::new().build();
        let app = app_with(
            MemoryInvoiceStore::with_invoices(vec![invoice.clone()]),
            RecordingNotifier::replying("   "),
        );

        let response = app
            .server
            .post("/api/v1/invoices/email")
            .json(&json!({
                "invoice_id": invoice.id.as_uuid(),
                "recipient": "partner@example.com"
            }))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "upstream_failure"
        );
    }

    #[tokio::test]
    async fn transport_failure_is_a_bad_gateway() {
        let invoice = InvoiceBuilder::new().build();
        let app = app_with(
            MemoryInvoiceStore::with_invoices(vec![invoice.clone()]),
            RecordingNotifier::failing("connection refused"),
        );

        let response = app
            .server
            .post("/api/v1/invoices/email")
            .json(&json!({
                "invoice_id": invoice.id.as_uuid(),
                "recipient": "partner@example.com"
            }))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn emailing_an_unknown_invoice_is_404_and_sends_nothing() {
        let app = default_app();
        let response = app
            .server
            .post("/api/v1/invoices/email")
            .json(&json!({
                "invoice_id": uuid::Uuid::new_v4(),
                "recipient": "partner@example.com"
            }))
            .await;
        response.assert_status_not_found();
        assert!(app.notifier.sent().is_empty());
    }
}

// ============================================================================
// Manual billing run
// ============================================================================

mod billing_runs {
    use super::*;

    #[tokio::test]
    async fn trigger_bills_the_active_partner() {
        let app = default_app();

        let response = app.server.post("/api/v1/billing-runs").await;
        response.assert_status_ok();

        let body: BillingRunResponse = response.json();
        assert_eq!(body.partners_discovered, 2);
        assert_eq!(body.partners_active, 1);
        assert_eq!(body.invoices_written, 1);
        assert!(body.clean);

        // 3 offers * 10 + 2 orders * 5 = 40 minor units
        let invoices = app.store.all();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].amount.as_minor().unwrap(), 40);
    }

    #[tokio::test]
    async fn trigger_degrades_when_the_store_rejects_writes() {
        let store = MemoryInvoiceStore::new();
        store.fail_writes();
        let app = app_with(store, RecordingNotifier::replying("ok"));

        let response = app.server.post("/api/v1/billing-runs").await;
        response.assert_status_ok();

        let body: BillingRunResponse = response.json();
        assert_eq!(body.invoices_written, 0);
        assert_eq!(body.store_failures, 1);
        assert!(!body.clean);
        assert!(app.store.is_empty());
    }
}
