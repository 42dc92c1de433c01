use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cliphub_auth_types::session::Session;
use cliphub_domain::pagination::PageRequest;
use cliphub_domain::user::UserCard;

use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::history::{RecordWatchUseCase, WatchHistoryUseCase};

// ── GET /users/history ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct WatchHistoryResponse {
    pub video_id: String,
    pub title: String,
    pub owner: UserCard,
    #[serde(serialize_with = "cliphub_core::serde::to_rfc3339_ms")]
    pub watched_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_watch_history(
    session: Session,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<WatchHistoryResponse>>, IdentityServiceError> {
    let usecase = WatchHistoryUseCase {
        history: state.watch_history_repo(),
        videos: state.video_repo(),
        users: state.user_repo(),
    };
    let items = usecase.execute(session.user_id, page).await?;
    let body = items
        .into_iter()
        .map(|item| WatchHistoryResponse {
            video_id: item.video_id.to_string(),
            title: item.title,
            owner: item.owner,
            watched_at: item.watched_at,
        })
        .collect();
    Ok(Json(body))
}

// ── POST /users/history ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecordWatchRequest {
    pub video_id: Uuid,
}

pub async fn record_watch(
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<RecordWatchRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = RecordWatchUseCase {
        history: state.watch_history_repo(),
    };
    usecase.execute(session.user_id, body.video_id).await?;
    Ok(StatusCode::CREATED)
}
