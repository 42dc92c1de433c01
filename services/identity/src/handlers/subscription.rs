use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use uuid::Uuid;

use cliphub_auth_types::session::Session;
use cliphub_domain::user::UserCard;

use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::profile::{ChannelSubscribersUseCase, SubscribedChannelsUseCase};
use crate::usecase::subscription::ToggleSubscriptionUseCase;

// ── POST /subscriptions/{channel_id} ─────────────────────────────────────────

#[derive(Serialize)]
pub struct ToggleSubscriptionResponse {
    pub subscribed: bool,
}

pub async fn toggle_subscription(
    session: Session,
    State(state): State<AppState>,
    Path(channel_id): Path<Uuid>,
) -> Result<Json<ToggleSubscriptionResponse>, IdentityServiceError> {
    let usecase = ToggleSubscriptionUseCase {
        subscriptions: state.subscription_repo(),
    };
    let out = usecase.execute(session.user_id, channel_id).await?;
    Ok(Json(ToggleSubscriptionResponse {
        subscribed: out.subscribed,
    }))
}

// ── GET /subscriptions/{channel_id}/subscribers ──────────────────────────────

pub async fn channel_subscribers(
    State(state): State<AppState>,
    Path(channel_id): Path<Uuid>,
) -> Result<Json<Vec<UserCard>>, IdentityServiceError> {
    let usecase = ChannelSubscribersUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let cards = usecase.execute(channel_id).await?;
    Ok(Json(cards))
}

// ── GET /subscriptions/{user_id}/channels ────────────────────────────────────

pub async fn subscribed_channels(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<UserCard>>, IdentityServiceError> {
    let usecase = SubscribedChannelsUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let cards = usecase.execute(user_id).await?;
    Ok(Json(cards))
}
