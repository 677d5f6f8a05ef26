//! API configuration

use std::time::Duration;

use serde::Deserialize;

use core_kernel::GatewayConfig;

/// API and billing runner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Partner directory endpoint
    pub partner_directory_url: String,
    /// Event aggregator endpoint
    pub event_source_url: String,
    /// Notification broadcast endpoint
    pub notification_url: String,
    /// Cron expression driving the billing run (seconds-resolution field set)
    pub billing_schedule: String,
    /// Per-request timeout for the upstream gateways, in seconds
    pub upstream_timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/invoicing".to_string(),
            partner_directory_url: "http://localhost:8081/api/partners".to_string(),
            event_source_url: "http://localhost:8082/api/events".to_string(),
            notification_url: "http://localhost:8083/api/broadcast".to_string(),
            // first day of every month at midnight UTC
            billing_schedule: "0 0 0 1 * *".to_string(),
            upstream_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Gateway configuration for the partner directory
    pub fn partner_directory(&self) -> GatewayConfig {
        self.gateway(&self.partner_directory_url)
    }

    /// Gateway configuration for the event aggregator
    pub fn event_source(&self) -> GatewayConfig {
        self.gateway(&self.event_source_url)
    }

    /// Gateway configuration for the notification broadcast service
    pub fn notification(&self) -> GatewayConfig {
        self.gateway(&self.notification_url)
    }

    fn gateway(&self, url: &str) -> GatewayConfig {
        GatewayConfig::new(url, Duration::from_secs(self.upstream_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateways_share_the_configured_timeout() {
        let config = ApiConfig {
            upstream_timeout_secs: 3,
            ..ApiConfig::default()
        };

        assert_eq!(
            config.partner_directory().timeout,
            Duration::from_secs(3)
        );
        assert_eq!(config.event_source().timeout, Duration::from_secs(3));
        assert_eq!(config.notification().timeout, Duration::from_secs(3));
    }

    #[test]
    fn default_schedule_parses_as_cron() {
        use std::str::FromStr;
        let config = ApiConfig::default();
        assert!(cron::Schedule::from_str(&config.billing_schedule).is_ok());
    }
}
