#![allow(async_fn_in_trait)]

use uuid::Uuid;

use cliphub_domain::pagination::PageRequest;

use crate::domain::types::{User, Video, WatchEntry};
use crate::error::IdentityServiceError;

/// Repository for user credentials and profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError>;

    /// Point lookup by normalized (lowercase) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, IdentityServiceError>;

    /// Login lookup: matches the identifier against username or email.
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, IdentityServiceError>;

    /// Registration conflict check: any user with this username or email.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, IdentityServiceError>;

    /// Batch lookup for join assembly. Order of the result is unspecified.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, IdentityServiceError>;

    async fn create(&self, user: &User) -> Result<(), IdentityServiceError>;

    /// Replace the password hash; must not touch any other column.
    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError>;

    /// Store a refresh token unconditionally (login overwrites any prior
    /// session's token).
    async fn store_refresh_token(
        &self,
        id: Uuid,
        refresh_token: &str,
    ) -> Result<(), IdentityServiceError>;

    /// Compare-and-swap the refresh token: succeeds only while the stored
    /// value still equals `current`. Returns `false` when a concurrent
    /// rotation or logout got there first.
    async fn swap_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, IdentityServiceError>;

    /// Set the refresh token to NULL — "logged out", not "empty token".
    async fn clear_refresh_token(&self, id: Uuid) -> Result<(), IdentityServiceError>;
}

/// Repository for the subscriber→channel edge set.
pub trait SubscriptionRepository: Send + Sync {
    /// Atomic create-or-remove keyed on the composite (subscriber, channel)
    /// pair. Returns the resulting state: `true` = edge now exists.
    async fn toggle(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<bool, IdentityServiceError>;

    async fn exists(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<bool, IdentityServiceError>;

    async fn count_subscribers(&self, channel_id: Uuid) -> Result<u64, IdentityServiceError>;

    async fn count_subscribed(&self, subscriber_id: Uuid) -> Result<u64, IdentityServiceError>;

    /// All subscribers of a channel, oldest edge first.
    async fn subscriber_ids(&self, channel_id: Uuid) -> Result<Vec<Uuid>, IdentityServiceError>;

    /// All channels a user subscribes to, oldest edge first.
    async fn channel_ids(&self, subscriber_id: Uuid) -> Result<Vec<Uuid>, IdentityServiceError>;
}

/// Read-only access to the externally owned video records.
pub trait VideoRepository: Send + Sync {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Video>, IdentityServiceError>;
}

/// Repository for per-user watch history.
pub trait WatchHistoryRepository: Send + Sync {
    /// Entries in insertion order, duplicates preserved.
    async fn list(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<WatchEntry>, IdentityServiceError>;

    async fn append(&self, entry: &WatchEntry) -> Result<(), IdentityServiceError>;
}

/// Port for the external media upload collaborator. Returns the durable URL
/// of the stored object, or `None` when the collaborator cannot produce one.
pub trait MediaStorePort: Send + Sync {
    async fn upload(&self, source: &str) -> Result<Option<String>, IdentityServiceError>;
}
