use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use cliphub_auth_types::cookie::{
    REFRESH_TOKEN_COOKIE, clear_session_cookies, set_access_token_cookie,
    set_refresh_token_cookie,
};
use cliphub_auth_types::session::Session;

use crate::domain::types::{TokenPair, User};
use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::auth::{
    ChangePasswordUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput,
    RegisterUseCase,
};
use crate::usecase::token::RotateTokenUseCase;

// ── Response types ───────────────────────────────────────────────────────────

/// Public projection of a user. Credentials never appear here: the type has
/// no password or refresh-token field at all.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(serialize_with = "cliphub_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cliphub_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            cover_image_url: user.cover_image_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn set_session_cookies(jar: CookieJar, tokens: &TokenPair, state: &AppState) -> CookieJar {
    let jar = set_access_token_cookie(
        jar,
        tokens.access_token.clone(),
        state.cookie_domain.clone(),
        state.keys.access_ttl_secs,
    );
    set_refresh_token_cookie(
        jar,
        tokens.refresh_token.clone(),
        state.cookie_domain.clone(),
        state.keys.refresh_ttl_secs,
    )
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
    pub cover_image: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), IdentityServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        media: state.media.clone(),
    };
    let user = usecase
        .execute(RegisterInput {
            full_name: body.full_name,
            username: body.username,
            email: body.email,
            password: body.password,
            avatar: body.avatar,
            cover_image: body.cover_image,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /users/login ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, IdentityServiceError> {
    let identifier = body
        .username
        .or(body.email)
        .ok_or(IdentityServiceError::MissingField)?;

    let usecase = LoginUseCase {
        users: state.user_repo(),
        keys: state.keys.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            identifier,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookies(jar, &out.tokens, &state);
    let body = LoginResponse {
        user: out.user.into(),
        access_token: out.tokens.access_token,
        refresh_token: out.tokens.refresh_token,
    };
    Ok((jar, Json(body)))
}

// ── POST /users/logout ───────────────────────────────────────────────────────

pub async fn logout(
    session: Session,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, IdentityServiceError> {
    let usecase = LogoutUseCase {
        users: state.user_repo(),
    };
    usecase.execute(session.user_id).await?;

    let jar = clear_session_cookies(jar, state.cookie_domain.clone());
    Ok((StatusCode::OK, jar))
}

// ── POST /users/refresh-token ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, IdentityServiceError> {
    let presented = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .or_else(|| body.and_then(|Json(b)| b.refresh_token))
        .ok_or(IdentityServiceError::Unauthorized)?;

    let usecase = RotateTokenUseCase {
        users: state.user_repo(),
        keys: state.keys.clone(),
    };
    let pair = usecase.execute(&presented).await?;

    let jar = set_session_cookies(jar, &pair, &state);
    let body = RefreshResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    };
    Ok((jar, Json(body)))
}

// ── POST /users/change-password ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(session.user_id, &body.old_password, &body.new_password)
        .await?;
    Ok(StatusCode::OK)
}
