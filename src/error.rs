//! Error types for the inventory API
//!
//! Provides unified error handling using thiserror. Backend-level errors
//! (`CacheError`, `StoreError`, `AuthError`) convert into the client-facing
//! `ApiError`, which renders a JSON body with a fixed, non-leaking message.

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::{ErrorResponse, ItemId};

/// Validation messages keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// == Api Error Enum ==
/// Client-facing error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing request fields
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Missing, invalid or expired credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Credentials are valid but not usable for this request
    #[error("{0}")]
    Forbidden(String),

    /// Anything else; the detail is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Builds a validation error carrying a single field message.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        ApiError::Validation(fields)
    }

    pub fn item_not_found() -> Self {
        ApiError::NotFound("Item not found".to_string())
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(fields) => ErrorResponse::with_fields("Validation failed", fields),
            ApiError::NotFound(msg) | ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) => {
                ErrorResponse::new(msg)
            }
            ApiError::Internal(detail) => {
                error!(%detail, "Request failed with internal error");
                ErrorResponse::new("Internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::field("body", rejection.body_text())
    }
}

// == Cache Error Enum ==
/// Errors raised by a cache backend.
///
/// These never reach clients: the item cache logs them and falls through
/// to the item store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is empty or exceeds the maximum length
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Value exceeds the maximum payload size
    #[error("Value exceeds maximum size of {0} bytes")]
    ValueTooLarge(usize),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Backend could not be reached or rejected the command
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Unavailable(err.to_string())
    }
}

// == Store Error Enum ==
/// Errors raised by the item store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Another item already uses this name
    #[error("An inventory item named '{0}' already exists")]
    DuplicateName(String),

    /// No item with this id
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// Storage backend failure
    #[error("Item store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(_) => {
                ApiError::field("name", "inventory item with this name already exists.")
            }
            StoreError::NotFound(_) => ApiError::item_not_found(),
            StoreError::Unavailable(msg) => ApiError::Internal(msg),
        }
    }
}

// == Auth Error Enum ==
/// Errors raised by the identity provider and the token service.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("A user with that username already exists.")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token is invalid or expired")]
    InvalidToken,

    #[error("Token has wrong type")]
    WrongTokenType,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateUsername => ApiError::field("username", err.to_string()),
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::WrongTokenType => ApiError::Forbidden(err.to_string()),
            AuthError::Hashing(_) | AuthError::Signing(_) => ApiError::Internal(err.to_string()),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
