use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use cliphub_auth_types::session::AccessTokenSecret;

use crate::infra::db::{
    DbSubscriptionRepository, DbUserRepository, DbVideoRepository, DbWatchHistoryRepository,
};
use crate::infra::media::HttpMediaStore;
use crate::usecase::token::TokenKeys;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub keys: TokenKeys,
    pub cookie_domain: String,
    pub media: HttpMediaStore,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn subscription_repo(&self) -> DbSubscriptionRepository {
        DbSubscriptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn video_repo(&self) -> DbVideoRepository {
        DbVideoRepository {
            db: self.db.clone(),
        }
    }

    pub fn watch_history_repo(&self) -> DbWatchHistoryRepository {
        DbWatchHistoryRepository {
            db: self.db.clone(),
        }
    }
}

// Lets the session extractors validate access tokens without depending on
// the service's state type.
impl FromRef<AppState> for AccessTokenSecret {
    fn from_ref(state: &AppState) -> Self {
        AccessTokenSecret(state.keys.access_secret.clone())
    }
}
