use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use cliphub_domain::pagination::PageRequest;
use cliphub_identity_schema::{subscriptions, users, videos, watch_history};

use crate::domain::repository::{
    SubscriptionRepository, UserRepository, VideoRepository, WatchHistoryRepository,
};
use crate::domain::types::{User, Video, WatchEntry};
use crate::error::IdentityServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(identifier.to_lowercase()))
                    .add(users::Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .context("find user by identifier")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(username))
                    .add(users::Column::Email.eq(email)),
            )
            .one(&self.db)
            .await
            .context("find user by username or email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, IdentityServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn create(&self, user: &User) -> Result<(), IdentityServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            full_name: Set(user.full_name.clone()),
            avatar_url: Set(user.avatar_url.clone()),
            cover_image_url: Set(user.cover_image_url.clone()),
            password_hash: Set(user.password_hash.clone()),
            refresh_token: Set(user.refresh_token.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            // A registration that lost the race to the unique indexes is a
            // conflict, not an internal error.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(IdentityServiceError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::from(e).context("create user").into()),
        }
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn store_refresh_token(
        &self,
        id: Uuid,
        refresh_token: &str,
    ) -> Result<(), IdentityServiceError> {
        users::ActiveModel {
            id: Set(id),
            refresh_token: Set(Some(refresh_token.to_owned())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("store refresh token")?;
        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, IdentityServiceError> {
        // Conditional update: only wins while the stored token still equals
        // `current`, so two concurrent rotations cannot both succeed.
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::RefreshToken,
                Expr::value(Some(next.to_owned())),
            )
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::RefreshToken.eq(current))
            .exec(&self.db)
            .await
            .context("swap refresh token")?;
        Ok(result.rows_affected > 0)
    }

    async fn clear_refresh_token(&self, id: Uuid) -> Result<(), IdentityServiceError> {
        users::Entity::update_many()
            .col_expr(
                users::Column::RefreshToken,
                Expr::value(Option::<String>::None),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("clear refresh token")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        full_name: model.full_name,
        avatar_url: model.avatar_url,
        cover_image_url: model.cover_image_url,
        password_hash: model.password_hash,
        refresh_token: model.refresh_token,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn toggle(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<bool, IdentityServiceError> {
        // Conditional delete-if-exists-else-insert on the composite key. The
        // two statements are individually atomic and the composite PK makes
        // concurrent toggles converge: a racing insert hits the ON CONFLICT
        // arm, a racing delete reports zero rows.
        let deleted = subscriptions::Entity::delete_many()
            .filter(subscriptions::Column::SubscriberId.eq(subscriber_id))
            .filter(subscriptions::Column::ChannelId.eq(channel_id))
            .exec(&self.db)
            .await
            .context("delete subscription edge")?;
        if deleted.rows_affected > 0 {
            return Ok(false);
        }

        let edge = subscriptions::ActiveModel {
            subscriber_id: Set(subscriber_id),
            channel_id: Set(channel_id),
            created_at: Set(Utc::now()),
        };
        subscriptions::Entity::insert(edge)
            .on_conflict(
                OnConflict::columns([
                    subscriptions::Column::SubscriberId,
                    subscriptions::Column::ChannelId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert subscription edge")?;
        // Conflict means a concurrent toggle created it first; either way
        // the edge now exists.
        Ok(true)
    }

    async fn exists(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<bool, IdentityServiceError> {
        let model = subscriptions::Entity::find_by_id((subscriber_id, channel_id))
            .one(&self.db)
            .await
            .context("find subscription edge")?;
        Ok(model.is_some())
    }

    async fn count_subscribers(&self, channel_id: Uuid) -> Result<u64, IdentityServiceError> {
        let count = subscriptions::Entity::find()
            .filter(subscriptions::Column::ChannelId.eq(channel_id))
            .count(&self.db)
            .await
            .context("count subscribers")?;
        Ok(count)
    }

    async fn count_subscribed(&self, subscriber_id: Uuid) -> Result<u64, IdentityServiceError> {
        let count = subscriptions::Entity::find()
            .filter(subscriptions::Column::SubscriberId.eq(subscriber_id))
            .count(&self.db)
            .await
            .context("count subscribed channels")?;
        Ok(count)
    }

    async fn subscriber_ids(&self, channel_id: Uuid) -> Result<Vec<Uuid>, IdentityServiceError> {
        let models = subscriptions::Entity::find()
            .filter(subscriptions::Column::ChannelId.eq(channel_id))
            .order_by_asc(subscriptions::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list subscriber ids")?;
        Ok(models.into_iter().map(|m| m.subscriber_id).collect())
    }

    async fn channel_ids(&self, subscriber_id: Uuid) -> Result<Vec<Uuid>, IdentityServiceError> {
        let models = subscriptions::Entity::find()
            .filter(subscriptions::Column::SubscriberId.eq(subscriber_id))
            .order_by_asc(subscriptions::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list subscribed channel ids")?;
        Ok(models.into_iter().map(|m| m.channel_id).collect())
    }
}

// ── Video repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVideoRepository {
    pub db: DatabaseConnection,
}

impl VideoRepository for DbVideoRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Video>, IdentityServiceError> {
        let models = videos::Entity::find()
            .filter(videos::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find videos by ids")?;
        Ok(models
            .into_iter()
            .map(|m| Video {
                id: m.id,
                owner_id: m.owner_id,
                title: m.title,
                created_at: m.created_at,
            })
            .collect())
    }
}

// ── Watch-history repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbWatchHistoryRepository {
    pub db: DatabaseConnection,
}

impl WatchHistoryRepository for DbWatchHistoryRepository {
    async fn list(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<WatchEntry>, IdentityServiceError> {
        // UUIDv7 ids are time-ordered, so ascending id is insertion order.
        let models = watch_history::Entity::find()
            .filter(watch_history::Column::UserId.eq(user_id))
            .order_by_asc(watch_history::Column::Id)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list watch history")?;
        Ok(models
            .into_iter()
            .map(|m| WatchEntry {
                id: m.id,
                user_id: m.user_id,
                video_id: m.video_id,
                created_at: m.created_at,
            })
            .collect())
    }

    async fn append(&self, entry: &WatchEntry) -> Result<(), IdentityServiceError> {
        watch_history::ActiveModel {
            id: Set(entry.id),
            user_id: Set(entry.user_id),
            video_id: Set(entry.video_id),
            created_at: Set(entry.created_at),
        }
        .insert(&self.db)
        .await
        .context("append watch history entry")?;
        Ok(())
    }
}
