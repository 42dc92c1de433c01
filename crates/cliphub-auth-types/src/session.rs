//! Authenticated-session extractors.
//!
//! [`Session`] validates the access token on every authenticated route;
//! [`OptionalSession`] is for routes whose response merely varies with the
//! viewer (channel profiles) and never rejects.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::cookie::ACCESS_TOKEN_COOKIE;
use crate::token::validate_access_token;

/// The access-token signing secret, provided by the service state via
/// `FromRef` so the extractors can validate tokens without knowing the
/// concrete state type.
#[derive(Debug, Clone)]
pub struct AccessTokenSecret(pub String);

/// Identity of the authenticated caller, taken from a validated access
/// token in the `accessToken` cookie or an `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
}

/// `Some(Session)` when a valid access token is presented, `None` otherwise.
/// Never rejects the request.
#[derive(Debug, Clone)]
pub struct OptionalSession(pub Option<Session>);

fn bearer_or_cookie(parts: &Parts) -> Option<String> {
    if let Some(value) = parts.headers.get(http::header::AUTHORIZATION) {
        if let Ok(s) = value.to_str() {
            if let Some(token) = s.strip_prefix("Bearer ") {
                return Some(token.trim().to_owned());
            }
        }
    }
    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
}

fn unauthorized_response() -> Response {
    let body = serde_json::json!({
        "status": StatusCode::UNAUTHORIZED.as_u16(),
        "data": null,
        "message": "unauthorized request",
    });
    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}

// axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
// In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
// causing E0195. Fix: extract values synchronously, return a 'static async move block.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    AccessTokenSecret: FromRef<S>,
{
    type Rejection = Response;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = AccessTokenSecret::from_ref(state);
        let token = bearer_or_cookie(parts);

        async move {
            let token = token.ok_or_else(unauthorized_response)?;
            let info = validate_access_token(&token, &secret.0)
                .map_err(|_| unauthorized_response())?;
            Ok(Self {
                user_id: info.user_id,
                username: info.username,
            })
        }
    }
}

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
    AccessTokenSecret: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = AccessTokenSecret::from_ref(state);
        let token = bearer_or_cookie(parts);

        async move {
            let session = token
                .and_then(|t| validate_access_token(&t, &secret.0).ok())
                .map(|info| Session {
                    user_id: info.user_id,
                    username: info.username,
                });
            Ok(Self(session))
        }
    }
}
