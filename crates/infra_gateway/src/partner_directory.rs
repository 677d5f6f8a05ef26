//! Partner directory gateway
//!
//! GET against the configured roster URL; the response is a JSON array of
//! `{"partnerId": string, "isActive": 0|1}` records. An undecodable or
//! absent payload surfaces as a typed error which the billing run degrades
//! to an empty roster.

use async_trait::async_trait;
use tracing::debug;

use core_kernel::{DomainPort, GatewayConfig, PortError};
use domain_invoicing::{PartnerDirectory, PartnerRecord};

use crate::http::{build_client, check_status, map_transport_error};

/// Reqwest adapter for the external partner directory
#[derive(Debug, Clone)]
pub struct PartnerDirectoryGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl PartnerDirectoryGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, PortError> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

impl DomainPort for PartnerDirectoryGateway {}

#[async_trait]
impl PartnerDirectory for PartnerDirectoryGateway {
    async fn roster(&self) -> Result<Vec<PartnerRecord>, PortError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .send()
            .await
            .map_err(|err| map_transport_error(err, "roster", self.config.timeout))?;

        let response = check_status(response, "roster", "partner-directory")?;

        let roster: Vec<PartnerRecord> = response
            .json()
            .await
            .map_err(|err| map_transport_error(err, "roster", self.config.timeout))?;

        debug!(partners = roster.len(), "fetched partner roster");
        Ok(roster)
    }
}
