//! Error types for the service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::api::middleware::current_request;
use crate::models::ErrorResponse;

// == Config Error Enum ==
/// Misconfiguration detected while building the service. Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The response cache cannot hold zero entries
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,

    /// Entries with a zero default TTL would never be served
    #[error("default cache TTL must be greater than zero")]
    ZeroTtl,

    /// A numeric setting that must be positive was zero
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    /// A required setting was empty
    #[error("missing required setting: {0}")]
    MissingRequired(&'static str),
}

// == Store Error Enum ==
/// Constraint violations raised by the in-memory tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another user already owns this email
    #[error("email: already in use")]
    EmailTaken(String),
}

// == API Error Enum ==
/// Error type surfaced by request handlers and middleware.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    /// Requested entity or route does not exist
    #[error("{0}")]
    NotFound(String),

    /// Missing, malformed or expired credentials
    #[error("{0}")]
    Unauthorized(String),

    /// The caller's organization exhausted its request window
    #[error("{0}")]
    RateLimited(String),

    /// Anything unexpected; the message is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Machine-readable code placed in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::RateLimited(_) => "RATE_LIMITED",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request = current_request();

        let message = match &self {
            ApiError::Internal(detail) => {
                error!(
                    request_id = request.as_ref().map(|r| r.id.as_str()),
                    detail = %detail,
                    "Unhandled error processing request"
                );
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse::new(self.code(), message, request.as_ref());
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("input: {}", rejection.body_text()))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
