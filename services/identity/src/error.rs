use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Identity service domain error variants.
///
/// `RefreshTokenRevoked` is reported to clients identically to
/// `InvalidRefreshToken` (401) but kept as its own variant: it means a
/// cryptographically valid token no longer matches stored state — the
/// reuse signal a future revocation/alerting hook needs.
#[derive(Debug, thiserror::Error)]
pub enum IdentityServiceError {
    #[error("all required fields must be provided")]
    MissingField,
    #[error("avatar image is required")]
    AvatarRequired,
    #[error("user with this username or email already exists")]
    UserAlreadyExists,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid user credentials")]
    InvalidCredentials,
    #[error("invalid old password")]
    InvalidOldPassword,
    #[error("unauthorized request")]
    Unauthorized,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("refresh token is expired or used")]
    RefreshTokenRevoked,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FIELD",
            Self::AvatarRequired => "AVATAR_REQUIRED",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOldPassword => "INVALID_OLD_PASSWORD",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::RefreshTokenRevoked => "REFRESH_TOKEN_REVOKED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField | Self::AvatarRequired | Self::InvalidOldPassword => {
                StatusCode::BAD_REQUEST
            }
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials
            | Self::Unauthorized
            | Self::InvalidRefreshToken
            | Self::RefreshTokenRevoked => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IdentityServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = self.kind(), "internal error");
        }
        let body = serde_json::json!({
            "status": status.as_u16(),
            "data": null,
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
