use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use cliphub_auth_types::token::{AccessClaims, RefreshClaims, validate_refresh_token};

use crate::domain::repository::UserRepository;
use crate::domain::types::{TokenPair, User};
use crate::error::IdentityServiceError;

/// Signing material for both token kinds. Two independent secrets so that
/// compromise of one does not forge the other.
#[derive(Debug, Clone)]
pub struct TokenKeys {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_access_token(
    user: &User,
    keys: &TokenKeys,
) -> Result<(String, u64), IdentityServiceError> {
    let exp = now_secs() + keys.access_ttl_secs;
    let claims = AccessClaims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(keys.access_secret.as_bytes()),
    )
    .map_err(|e| IdentityServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

pub fn issue_refresh_token(user: &User, keys: &TokenKeys) -> Result<String, IdentityServiceError> {
    let exp = now_secs() + keys.refresh_ttl_secs;
    let claims = RefreshClaims {
        sub: user.id.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(keys.refresh_secret.as_bytes()),
    )
    .map_err(|e| IdentityServiceError::Internal(e.into()))
}

/// Issue a fresh access/refresh pair for `user`.
pub fn issue_pair(user: &User, keys: &TokenKeys) -> Result<TokenPair, IdentityServiceError> {
    let (access_token, access_token_exp) = issue_access_token(user, keys)?;
    let refresh_token = issue_refresh_token(user, keys)?;
    Ok(TokenPair {
        access_token,
        access_token_exp,
        refresh_token,
    })
}

/// Validate a refresh token's signature and expiry, returning the user id.
pub fn verify_refresh(token: &str, keys: &TokenKeys) -> Result<Uuid, IdentityServiceError> {
    validate_refresh_token(token, &keys.refresh_secret)
        .map_err(|_| IdentityServiceError::InvalidRefreshToken)
}

// ── RotateToken ──────────────────────────────────────────────────────────────

pub struct RotateTokenUseCase<U: UserRepository> {
    pub users: U,
    pub keys: TokenKeys,
}

impl<U: UserRepository> RotateTokenUseCase<U> {
    /// Single-use rotation: the presented token must both verify and equal
    /// the stored value, and the swap to the new token is conditional on the
    /// stored value still being the presented one at write time. A verified
    /// token that fails either comparison was already rotated or revoked —
    /// a reuse signal, reported as [`IdentityServiceError::RefreshTokenRevoked`].
    pub async fn execute(
        &self,
        presented_refresh_token: &str,
    ) -> Result<TokenPair, IdentityServiceError> {
        let user_id = verify_refresh(presented_refresh_token, &self.keys)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::InvalidRefreshToken)?;

        match user.refresh_token.as_deref() {
            Some(stored) if stored == presented_refresh_token => {}
            _ => return Err(IdentityServiceError::RefreshTokenRevoked),
        }

        let pair = issue_pair(&user, &self.keys)?;

        let swapped = self
            .users
            .swap_refresh_token(user.id, presented_refresh_token, &pair.refresh_token)
            .await?;
        if !swapped {
            // Concurrent rotation won the compare-and-swap.
            return Err(IdentityServiceError::RefreshTokenRevoked);
        }

        Ok(pair)
    }
}
