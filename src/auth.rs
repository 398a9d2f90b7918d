//! Bearer-token authentication
//!
//! Tokens are HS256 JWTs signed with the shared secret from [`JwtConfig`].
//! Handlers that need an authenticated caller take a [`Caller`] extractor;
//! its rejection is [`ApiError::Unauthorized`], so a missing or invalid
//! token short-circuits before the handler body runs.
//!
//! [`JwtConfig`]: crate::config::JwtConfig

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims carried by catalog tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the caller's user name
    pub sub: String,
    /// Optional role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

impl Claims {
    /// Claims for `sub` expiring `ttl` from now
    #[must_use]
    pub fn new(sub: impl Into<String>, role: Option<String>, ttl: Duration) -> Self {
        Self {
            sub: sub.into(),
            role,
            exp: (Utc::now() + ttl).timestamp(),
        }
    }
}

/// Sign a token with the shared secret
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and return its claims
pub fn verify_token(token: &str, jwt: &JwtConfig) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(issuer) = &jwt.issuer {
        validation.set_issuer(&[issuer]);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// Authenticated caller extracted from the `Authorization` header
#[derive(Debug, Clone)]
pub struct Caller {
    pub subject: String,
    pub role: Option<String>,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = bearer_token(header_value).ok_or(ApiError::Unauthorized)?;
        let claims = verify_token(token, &state.config.jwt)?;

        Ok(Self {
            subject: claims.sub,
            role: claims.role,
        })
    }
}

fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
