use chrono::{DateTime, Utc};
use uuid::Uuid;

use cliphub_domain::user::UserCard;

/// User credential and profile record owned by the identity service.
///
/// `password_hash` and `refresh_token` never leave the service; handlers
/// project to response types that omit them.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Always lowercase.
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub password_hash: String,
    /// `None` means no active session — distinct from any stored value.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Reduce to the public card used in listings.
    pub fn card(&self) -> UserCard {
        UserCard {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            avatar_url: self.avatar_url.clone(),
            cover_image_url: self.cover_image_url.clone(),
        }
    }
}

/// Video record as seen by this service: a join target with an owner.
#[derive(Debug, Clone)]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// One watch-history row. The UUIDv7 id carries insertion order.
#[derive(Debug, Clone)]
pub struct WatchEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub video_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A signed access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Aggregate channel view: public profile fields plus relationship stats
/// relative to the (optional) viewer.
#[derive(Debug, Clone)]
pub struct ChannelProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub subscribers_count: u64,
    pub subscribed_to_count: u64,
    pub is_subscribed: bool,
}

/// One enriched watch-history item: the video joined with its owner's card.
#[derive(Debug, Clone)]
pub struct WatchHistoryItem {
    pub video_id: Uuid,
    pub title: String,
    pub owner: UserCard,
    pub watched_at: DateTime<Utc>,
}
