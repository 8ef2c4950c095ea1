//! Response DTOs for the inventory API
//!
//! Defines the structure of outgoing HTTP response bodies. Item endpoints
//! return `Item` directly.

use serde::Serialize;

use crate::error::FieldErrors;

/// Plain confirmation body, e.g. for `DELETE /items/{id}/delete`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for `POST /login`
#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    /// Long-lived token accepted by `POST /token/refresh`
    pub refresh: String,
    /// Short-lived bearer token for the item endpoints
    pub access: String,
}

/// Response body for `POST /token/refresh`
#[derive(Debug, Clone, Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Per-field messages, present for validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }

    pub fn with_fields(error: impl Into<String>, fields: FieldErrors) -> Self {
        Self {
            error: error.into(),
            fields: Some(fields),
        }
    }
}
