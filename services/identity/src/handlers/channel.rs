use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use cliphub_auth_types::session::OptionalSession;

use crate::domain::types::ChannelProfile;
use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::profile::ChannelProfileUseCase;

// ── GET /channels/{username} ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ChannelProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub subscribers_count: u64,
    pub subscribed_to_count: u64,
    pub is_subscribed: bool,
}

impl From<ChannelProfile> for ChannelProfileResponse {
    fn from(profile: ChannelProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username,
            email: profile.email,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            cover_image_url: profile.cover_image_url,
            subscribers_count: profile.subscribers_count,
            subscribed_to_count: profile.subscribed_to_count,
            is_subscribed: profile.is_subscribed,
        }
    }
}

pub async fn channel_profile(
    OptionalSession(session): OptionalSession,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ChannelProfileResponse>, IdentityServiceError> {
    let usecase = ChannelProfileUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let profile = usecase
        .execute(&username, session.map(|s| s.user_id))
        .await?;
    Ok(Json(profile.into()))
}
