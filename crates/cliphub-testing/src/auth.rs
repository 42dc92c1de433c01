//! Session fixtures for tests.
//!
//! Mints real JWTs with well-known test secrets so use-case and extractor
//! tests exercise the production validation path instead of stubbing it.

use http::{HeaderMap, HeaderName, HeaderValue};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use cliphub_auth_types::token::{AccessClaims, RefreshClaims};

/// Access-token secret used by every test in the workspace.
pub const TEST_ACCESS_SECRET: &str = "test-access-secret-do-not-deploy";

/// Refresh-token secret used by every test in the workspace. Distinct from
/// the access secret so cross-kind validation failures stay observable.
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret-do-not-deploy";

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Mint an access token for `user_id` valid for 15 minutes.
pub fn mint_access_token(user_id: Uuid, username: &str) -> String {
    let claims = AccessClaims {
        sub: user_id.to_string(),
        username: username.to_owned(),
        exp: now_secs() + 900,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_ACCESS_SECRET.as_bytes()),
    )
    .expect("encode test access token")
}

/// Mint a refresh token for `user_id`. Pass a negative `ttl_offset_secs`
/// to produce an already-expired token.
pub fn mint_refresh_token(user_id: Uuid, ttl_offset_secs: i64) -> String {
    let claims = RefreshClaims {
        sub: user_id.to_string(),
        exp: now_secs().saturating_add_signed(ttl_offset_secs),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_REFRESH_SECRET.as_bytes()),
    )
    .expect("encode test refresh token")
}

/// Headers carrying the access token the way a browser would send it.
pub fn session_cookie_headers(user_id: Uuid, username: &str) -> HeaderMap {
    let token = mint_access_token(user_id, username);
    let mut map = HeaderMap::new();
    map.insert(
        HeaderName::from_static("cookie"),
        HeaderValue::from_str(&format!("accessToken={token}")).expect("cookie header"),
    );
    map
}
