//! Event aggregator gateway
//!
//! GET with `eventType`, `partnerId`, and `timestamp` (epoch millis) query
//! parameters. The upstream replies `{"eventEntity": [...]}`; the count is
//! the array length. No caching: every call is a fresh query.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use core_kernel::{DomainPort, GatewayConfig, PortError};
use domain_invoicing::{EventQuery, EventSource};

use crate::http::{build_client, check_status, map_transport_error};

/// Wire shape of the event aggregator response
#[derive(Debug, Deserialize)]
struct EventCountResponse {
    /// Matching events; only the length matters to billing
    #[serde(rename = "eventEntity")]
    event_entity: Option<Vec<serde_json::Value>>,
}

/// Reqwest adapter for the external event aggregation service
#[derive(Debug, Clone)]
pub struct EventCountGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl EventCountGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, PortError> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }
}

impl DomainPort for EventCountGateway {}

#[async_trait]
impl EventSource for EventCountGateway {
    async fn count_events(&self, query: &EventQuery) -> Result<u64, PortError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("eventType", query.event_type.as_str().to_string()),
                ("partnerId", query.partner_id.as_str().to_string()),
                ("timestamp", query.as_of_millis().to_string()),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| map_transport_error(err, "count_events", self.config.timeout))?;

        let response = check_status(response, "count_events", "event-aggregator")?;

        let payload: EventCountResponse = response
            .json()
            .await
            .map_err(|err| map_transport_error(err, "count_events", self.config.timeout))?;

        let count = match payload.event_entity {
            Some(events) => events.len() as u64,
            None => {
                return Err(PortError::transformation(
                    "count_events: response carried no eventEntity array",
                ));
            }
        };

        debug!(
            partner = %query.partner_id,
            event_type = %query.event_type,
            count,
            "fetched event count"
        );
        Ok(count)
    }
}
