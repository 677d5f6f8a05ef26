//! Shared HTTP plumbing for the gateway adapters
//!
//! Error mapping:
//! - request timeout -> `PortError::Timeout`
//! - connect failure -> `PortError::Connection`
//! - HTTP 404 -> `PortError::NotFound`
//! - HTTP 5xx -> `PortError::ServiceUnavailable`
//! - undecodable or structurally absent payload -> `PortError::Transformation`
//! - anything else -> `PortError::Internal`

use std::time::Duration;

use core_kernel::{GatewayConfig, PortError};

/// Builds a reqwest client with the gateway's per-request timeout
pub fn build_client(config: &GatewayConfig) -> Result<reqwest::Client, PortError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| PortError::Internal {
            message: "failed to build HTTP client".to_string(),
            source: Some(Box::new(err)),
        })
}

/// Maps a reqwest transport error onto the port taxonomy
pub fn map_transport_error(err: reqwest::Error, operation: &str, timeout: Duration) -> PortError {
    if err.is_timeout() {
        return PortError::Timeout {
            operation: operation.to_string(),
            duration_ms: timeout.as_millis() as u64,
        };
    }
    if err.is_connect() {
        return PortError::Connection {
            message: format!("{operation}: connection failed"),
            source: Some(Box::new(err)),
        };
    }
    if err.is_decode() {
        return PortError::transformation(format!("{operation}: undecodable response payload"));
    }
    PortError::Internal {
        message: format!("{operation}: request failed"),
        source: Some(Box::new(err)),
    }
}

/// Rejects non-success statuses before payload decoding
pub fn check_status(
    response: reqwest::Response,
    operation: &str,
    service: &str,
) -> Result<reqwest::Response, PortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(PortError::not_found(service, operation));
    }
    if status.is_server_error() {
        return Err(PortError::ServiceUnavailable {
            service: service.to_string(),
        });
    }
    Err(PortError::internal(format!(
        "{operation}: unexpected status {status}"
    )))
}
