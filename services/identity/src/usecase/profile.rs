use std::collections::HashMap;

use uuid::Uuid;

use cliphub_domain::user::UserCard;

use crate::domain::repository::{SubscriptionRepository, UserRepository};
use crate::domain::types::{ChannelProfile, User};
use crate::error::IdentityServiceError;

// ── ChannelProfile ───────────────────────────────────────────────────────────

pub struct ChannelProfileUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> ChannelProfileUseCase<U, S> {
    /// Resolve a channel by username and aggregate its relationship stats.
    /// `requesting` is the authenticated viewer, if any; anonymous viewers
    /// always see `is_subscribed = false`.
    pub async fn execute(
        &self,
        username: &str,
        requesting: Option<Uuid>,
    ) -> Result<ChannelProfile, IdentityServiceError> {
        let username = username.trim().to_lowercase();
        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;

        let subscribers_count = self.subscriptions.count_subscribers(user.id).await?;
        let subscribed_to_count = self.subscriptions.count_subscribed(user.id).await?;
        let is_subscribed = match requesting {
            Some(viewer) => self.subscriptions.exists(viewer, user.id).await?,
            None => false,
        };

        Ok(ChannelProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            cover_image_url: user.cover_image_url,
            subscribers_count,
            subscribed_to_count,
            is_subscribed,
        })
    }
}

// ── Listings ─────────────────────────────────────────────────────────────────

/// Join a sequence of user ids against the user store, preserving the input
/// order and dropping ids with no matching user.
async fn cards_in_order<U: UserRepository>(
    users: &U,
    ids: &[Uuid],
) -> Result<Vec<UserCard>, IdentityServiceError> {
    let found = users.find_by_ids(ids).await?;
    let by_id: HashMap<Uuid, &User> = found.iter().map(|u| (u.id, u)).collect();
    Ok(ids
        .iter()
        .filter_map(|id| by_id.get(id).map(|u| u.card()))
        .collect())
}

pub struct ChannelSubscribersUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> ChannelSubscribersUseCase<U, S> {
    /// All subscribers of `channel_id`, oldest subscription first, reduced
    /// to public cards.
    pub async fn execute(&self, channel_id: Uuid) -> Result<Vec<UserCard>, IdentityServiceError> {
        let ids = self.subscriptions.subscriber_ids(channel_id).await?;
        cards_in_order(&self.users, &ids).await
    }
}

pub struct SubscribedChannelsUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> SubscribedChannelsUseCase<U, S> {
    /// All channels `subscriber_id` subscribes to, oldest subscription
    /// first, reduced to public cards.
    pub async fn execute(
        &self,
        subscriber_id: Uuid,
    ) -> Result<Vec<UserCard>, IdentityServiceError> {
        let ids = self.subscriptions.channel_ids(subscriber_id).await?;
        cards_in_order(&self.users, &ids).await
    }
}
