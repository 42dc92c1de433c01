use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use cliphub_domain::pagination::PageRequest;
use cliphub_identity::domain::repository::{
    MediaStorePort, SubscriptionRepository, UserRepository, VideoRepository,
    WatchHistoryRepository,
};
use cliphub_identity::domain::types::{User, Video, WatchEntry};
use cliphub_identity::error::IdentityServiceError;
use cliphub_identity::usecase::auth::hash_password;
use cliphub_identity::usecase::token::TokenKeys;
use cliphub_testing::auth::{TEST_ACCESS_SECRET, TEST_REFRESH_SECRET};

// ── MockUserRepo ─────────────────────────────────────────────────────────────

/// In-memory user store enforcing the same uniqueness the real indexes do.
#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError> {
        Ok(self.get(id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, IdentityServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, IdentityServiceError> {
        let lowered = identifier.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == lowered || u.email == identifier)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, IdentityServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, IdentityServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> Result<(), IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(IdentityServiceError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError> {
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            u.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn store_refresh_token(
        &self,
        id: Uuid,
        refresh_token: &str,
    ) -> Result<(), IdentityServiceError> {
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            u.refresh_token = Some(refresh_token.to_owned());
        }
        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        match users
            .iter_mut()
            .find(|u| u.id == id && u.refresh_token.as_deref() == Some(current))
        {
            Some(u) => {
                u.refresh_token = Some(next.to_owned());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear_refresh_token(&self, id: Uuid) -> Result<(), IdentityServiceError> {
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            u.refresh_token = None;
        }
        Ok(())
    }
}

// ── MockSubscriptionRepo ─────────────────────────────────────────────────────

/// Edge set with the composite-pair uniqueness the subscriptions table
/// enforces; a Vec so listing order (oldest first) is observable.
#[derive(Clone)]
pub struct MockSubscriptionRepo {
    pub edges: Arc<Mutex<Vec<(Uuid, Uuid)>>>,
}

impl MockSubscriptionRepo {
    pub fn new() -> Self {
        Self {
            edges: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn with_edges(edges: &[(Uuid, Uuid)]) -> Self {
        Self {
            edges: Arc::new(Mutex::new(edges.to_vec())),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.lock().unwrap().len()
    }

    pub fn subscriptions_contain(&self, subscriber_id: Uuid, channel_id: Uuid) -> bool {
        self.edges
            .lock()
            .unwrap()
            .contains(&(subscriber_id, channel_id))
    }
}

impl SubscriptionRepository for MockSubscriptionRepo {
    async fn toggle(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<bool, IdentityServiceError> {
        let mut edges = self.edges.lock().unwrap();
        match edges
            .iter()
            .position(|e| *e == (subscriber_id, channel_id))
        {
            Some(pos) => {
                edges.remove(pos);
                Ok(false)
            }
            None => {
                edges.push((subscriber_id, channel_id));
                Ok(true)
            }
        }
    }

    async fn exists(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<bool, IdentityServiceError> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .contains(&(subscriber_id, channel_id)))
    }

    async fn count_subscribers(&self, channel_id: Uuid) -> Result<u64, IdentityServiceError> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, c)| *c == channel_id)
            .count() as u64)
    }

    async fn count_subscribed(&self, subscriber_id: Uuid) -> Result<u64, IdentityServiceError> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == subscriber_id)
            .count() as u64)
    }

    async fn subscriber_ids(&self, channel_id: Uuid) -> Result<Vec<Uuid>, IdentityServiceError> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, c)| *c == channel_id)
            .map(|(s, _)| *s)
            .collect())
    }

    async fn channel_ids(&self, subscriber_id: Uuid) -> Result<Vec<Uuid>, IdentityServiceError> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == subscriber_id)
            .map(|(_, c)| *c)
            .collect())
    }
}

// ── MockVideoRepo ────────────────────────────────────────────────────────────

pub struct MockVideoRepo {
    pub videos: Vec<Video>,
}

impl VideoRepository for MockVideoRepo {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Video>, IdentityServiceError> {
        Ok(self
            .videos
            .iter()
            .filter(|v| ids.contains(&v.id))
            .cloned()
            .collect())
    }
}

// ── MockWatchHistoryRepo ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockWatchHistoryRepo {
    pub entries: Arc<Mutex<Vec<WatchEntry>>>,
}

impl MockWatchHistoryRepo {
    pub fn new(entries: Vec<WatchEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl WatchHistoryRepository for MockWatchHistoryRepo {
    async fn list(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<WatchEntry>, IdentityServiceError> {
        let page = page.clamped();
        let mut entries: Vec<WatchEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.id);
        Ok(entries
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect())
    }

    async fn append(&self, entry: &WatchEntry) -> Result<(), IdentityServiceError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

// ── MockMediaStore ───────────────────────────────────────────────────────────

/// Media collaborator stub: either produces a durable URL derived from the
/// source reference, or reports it could not.
pub struct MockMediaStore {
    pub unavailable: bool,
}

impl MockMediaStore {
    pub fn working() -> Self {
        Self { unavailable: false }
    }

    pub fn broken() -> Self {
        Self { unavailable: true }
    }
}

impl MediaStorePort for MockMediaStore {
    async fn upload(&self, source: &str) -> Result<Option<String>, IdentityServiceError> {
        if self.unavailable {
            return Ok(None);
        }
        Ok(Some(format!("https://cdn.test/{source}")))
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_keys() -> TokenKeys {
    TokenKeys {
        access_secret: TEST_ACCESS_SECRET.to_owned(),
        refresh_secret: TEST_REFRESH_SECRET.to_owned(),
        access_ttl_secs: 900,
        refresh_ttl_secs: 864_000,
    }
}

pub fn test_user(username: &str, email: &str, password: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: email.to_owned(),
        full_name: format!("{username} Example"),
        avatar_url: format!("https://cdn.test/{username}.png"),
        cover_image_url: None,
        password_hash: hash_password(password).unwrap(),
        refresh_token: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_video(owner_id: Uuid, title: &str) -> Video {
    Video {
        id: Uuid::now_v7(),
        owner_id,
        title: title.to_owned(),
        created_at: Utc::now(),
    }
}
