//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_invoicing::InvoicingError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::UpstreamFailure(msg) => {
                (StatusCode::BAD_GATEWAY, "upstream_failure", msg.clone())
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<InvoicingError> for ApiError {
    fn from(err: InvoicingError) -> Self {
        match err {
            InvoicingError::InvoiceNotFound(_) => ApiError::NotFound(err.to_string()),
            InvoicingError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            InvoicingError::NotificationFailed(_) => ApiError::UpstreamFailure(err.to_string()),
            InvoicingError::NegativeAmount(_) => ApiError::BadRequest(err.to_string()),
            InvoicingError::Temporal(_) | InvoicingError::Store(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::InvoiceId;

    #[test]
    fn not_found_maps_to_404() {
        let err: ApiError = InvoicingError::InvoiceNotFound(InvoiceId::new()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn failed_notification_maps_to_502() {
        let err: ApiError =
            InvoicingError::NotificationFailed("empty body".to_string()).into();
        assert!(matches!(err, ApiError::UpstreamFailure(_)));
    }
}
