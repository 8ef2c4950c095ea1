//! Bearer token issuance and validation
//!
//! Access and refresh tokens are HS256 JWTs that differ only in their
//! `token_type` claim and lifetime.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::error::AuthError;

/// Upper bound on any token lifetime (ten years)
const MAX_LIFETIME_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Which endpoint a token is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims carried by both token kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    pub username: String,
    pub token_type: TokenKind,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

impl Claims {
    fn new(sub: String, username: String, token_type: TokenKind, lifetime_secs: u64) -> Self {
        let now = Utc::now();
        let lifetime = Duration::seconds(
            i64::try_from(lifetime_secs)
                .unwrap_or(MAX_LIFETIME_SECS)
                .min(MAX_LIFETIME_SECS),
        );

        Self {
            sub,
            username,
            token_type,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

/// Token pair handed out at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

// == Token Service ==
/// Issues and checks bearer tokens.
pub trait TokenService: Send + Sync {
    /// Issues an access/refresh pair for a freshly authenticated user.
    fn issue(&self, user: &User) -> Result<TokenPair, AuthError>;

    /// Checks an access token presented on an API request.
    ///
    /// A refresh token yields `WrongTokenType`.
    fn validate_access(&self, token: &str) -> Result<Claims, AuthError>;

    /// Exchanges a refresh token for a new access token.
    fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;
}

/// HMAC-signed JWT implementation of [`TokenService`].
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: u64,
    refresh_ttl: u64,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("keys", &"[hidden]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl JwtTokenService {
    /// Creates a service signing with `secret`; lifetimes are in seconds.
    pub fn new(secret: &str, access_ttl: u64, refresh_ttl: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn decode(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?
            .claims;

        if claims.token_type != expected {
            return Err(AuthError::WrongTokenType);
        }
        Ok(claims)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<TokenPair, AuthError> {
        let sub = user.id.to_string();
        let access = Claims::new(sub.clone(), user.username.clone(), TokenKind::Access, self.access_ttl);
        let refresh = Claims::new(sub, user.username.clone(), TokenKind::Refresh, self.refresh_ttl);

        Ok(TokenPair {
            access: self.sign(&access)?,
            refresh: self.sign(&refresh)?,
        })
    }

    fn validate_access(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode(token, TokenKind::Access)
    }

    fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let refresh = self.decode(refresh_token, TokenKind::Refresh)?;
        let access = Claims::new(refresh.sub, refresh.username, TokenKind::Access, self.access_ttl);
        self.sign(&access)
    }
}
