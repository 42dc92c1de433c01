//! JWT claim payloads and validation for both token kinds.
//!
//! Access and refresh tokens are signed with independent secrets so that
//! compromise of one cannot forge the other. Validation here checks
//! signature and expiry only; the identity service additionally compares a
//! presented refresh token against stored state before rotating it.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub username: String,
    pub access_token_exp: u64,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthTokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Access-token claims: user identity plus the display username the session
/// was opened with.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID (UUID string).
    pub sub: String,
    pub username: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Refresh-token claims carry the user identity only.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

fn validation() -> Validation {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> AuthTokenError {
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthTokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthTokenError::InvalidSignature,
        _ => AuthTokenError::Malformed,
    }
}

/// Validate an access token, returning parsed identity.
///
/// This is the primary public API for session validation: every
/// authenticated request goes through it via the [`crate::session::Session`]
/// extractor.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthTokenError> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(map_decode_error)?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthTokenError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        username: data.claims.username,
        access_token_exp: data.claims.exp,
    })
}

/// Validate a refresh token's signature and expiry, returning the user id it
/// was issued to. Storage-state comparison is the caller's job.
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Uuid, AuthTokenError> {
    let data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(map_decode_error)?;

    data.claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthTokenError::Malformed)
}
