//! Account endpoints and the bearer-token extractor

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    Json,
};
use tracing::{info, warn};

use crate::api::AppState;
use crate::auth::Claims;
use crate::error::{ApiError, Result};
use crate::models::{
    AccessTokenResponse, LoginRequest, MessageResponse, RefreshRequest, RegisterRequest,
    TokenPairResponse,
};

/// Extractor that requires a valid access token.
///
/// Reads `Authorization: Bearer <token>`; a missing or invalid token is
/// rejected with 401, a refresh token with 403.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.tokens.validate_access(token)?;
        Ok(AuthUser(claims))
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers.get(header::AUTHORIZATION).ok_or_else(|| {
        ApiError::Unauthorized("Authentication credentials were not provided.".to_string())
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header must be 'Bearer <token>'".to_string()))
}

/// Handler for POST /register
pub async fn register_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = body?;
    let registration = req.validate()?;

    let user = state
        .identity
        .register(
            &registration.username,
            &registration.email,
            &registration.password,
        )
        .await?;
    info!(username = %user.username, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully!")),
    ))
}

/// Handler for POST /login
pub async fn login_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenPairResponse>> {
    let Json(req) = body?;

    let user = match state.identity.authenticate(&req.username, &req.password).await {
        Ok(user) => user,
        Err(err) => {
            warn!(username = %req.username, "Failed login attempt");
            return Err(err.into());
        }
    };

    let tokens = state.tokens.issue(&user)?;
    info!(username = %user.username, "User logged in");

    Ok(Json(TokenPairResponse {
        refresh: tokens.refresh,
        access: tokens.access,
    }))
}

/// Handler for POST /token/refresh
pub async fn refresh_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>> {
    let Json(req) = body?;
    let access = state.tokens.refresh(&req.refresh)?;
    Ok(Json(AccessTokenResponse { access }))
}
