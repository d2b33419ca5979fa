//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::ProtocolError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized".to_string()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "transfer_failed", msg.clone()),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "not_configured", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone()),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ProtocolError> for ApiError {
    fn from(err: ProtocolError) -> Self {
        let message = err.to_string();
        match err {
            ProtocolError::Unauthorized { .. } => ApiError::Forbidden(message),
            ProtocolError::PolicyMismatch { .. }
            | ProtocolError::Validation(_)
            | ProtocolError::Money(_) => ApiError::Validation(message),
            ProtocolError::UnknownCustomer(_)
            | ProtocolError::UnknownClaim(_)
            | ProtocolError::UnknownOrder(_) => ApiError::NotFound(message),
            ProtocolError::InvalidStateForPayment { .. }
            | ProtocolError::InvalidStatusTransition { .. }
            | ProtocolError::InsufficientFunds { .. } => ApiError::Conflict(message),
            ProtocolError::TransferFailed { .. } => ApiError::BadGateway(message),
            ProtocolError::NotConfigured(_) => ApiError::Unavailable(message),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, ClaimStatus, Identity};

    fn status_of(err: ProtocolError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_protocol_error_status_codes() {
        assert_eq!(
            status_of(ProtocolError::Unauthorized {
                caller: Identity::new(),
                required: "authority".to_string(),
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_of(ProtocolError::UnknownClaim(ClaimId::FIRST)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ProtocolError::InvalidStateForPayment {
                claim_id: ClaimId::FIRST,
                status: ClaimStatus::Rejected,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ProtocolError::TransferFailed {
                claim_id: ClaimId::FIRST,
                reason: "offline".to_string(),
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ProtocolError::NotConfigured("garage service")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(ProtocolError::validation("empty name")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
