//! Notification broadcast gateway
//!
//! POST of the invoice email request as JSON with an
//! `Accept: application/json` header. The broadcast service replies
//! `{"data": string}`; the `data` field is returned verbatim when
//! structurally present. Whether an empty body constitutes a failure is
//! the access service's call, not this adapter's.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use core_kernel::{DomainPort, GatewayConfig, PortError};
use domain_invoicing::{InvoiceEmailRequest, NotificationSender};

use crate::http::{build_client, check_status, map_transport_error};

/// Wire shape of the broadcast response
#[derive(Debug, Deserialize)]
struct BroadcastResponse {
    data: Option<String>,
}

/// Reqwest adapter for the external broadcast service
#[derive(Debug, Clone)]
pub struct NotificationGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl NotificationGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, PortError> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }
}

impl DomainPort for NotificationGateway {}

#[async_trait]
impl NotificationSender for NotificationGateway {
    async fn send_invoice_email(
        &self,
        request: &InvoiceEmailRequest,
    ) -> Result<String, PortError> {
        let response = self
            .client
            .post(&self.config.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| map_transport_error(err, "send_invoice_email", self.config.timeout))?;

        let response = check_status(response, "send_invoice_email", "broadcast")?;

        let payload: BroadcastResponse = response
            .json()
            .await
            .map_err(|err| map_transport_error(err, "send_invoice_email", self.config.timeout))?;

        match payload.data {
            Some(data) => {
                debug!(invoice = %request.invoice_id, "broadcast accepted invoice email");
                Ok(data)
            }
            None => Err(PortError::transformation(
                "send_invoice_email: response carried no data field",
            )),
        }
    }
}
