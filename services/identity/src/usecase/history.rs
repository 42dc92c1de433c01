use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use cliphub_domain::pagination::PageRequest;

use crate::domain::repository::{UserRepository, VideoRepository, WatchHistoryRepository};
use crate::domain::types::{WatchEntry, WatchHistoryItem};
use crate::error::IdentityServiceError;

// ── WatchHistory (read) ──────────────────────────────────────────────────────

pub struct WatchHistoryUseCase<W: WatchHistoryRepository, V: VideoRepository, U: UserRepository> {
    pub history: W,
    pub videos: V,
    pub users: U,
}

impl<W: WatchHistoryRepository, V: VideoRepository, U: UserRepository>
    WatchHistoryUseCase<W, V, U>
{
    /// History entries in insertion order (duplicates preserved), each
    /// joined to its video and the video's owner card.
    ///
    /// Entries whose video no longer exists are omitted rather than failing
    /// the whole query — history rows are weak references into an external
    /// store, and a dangling one carries nothing worth rendering.
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<WatchHistoryItem>, IdentityServiceError> {
        let entries = self.history.list(user_id, page.clamped()).await?;
        if entries.is_empty() {
            return Ok(vec![]);
        }

        let mut video_ids: Vec<Uuid> = entries.iter().map(|e| e.video_id).collect();
        video_ids.sort_unstable();
        video_ids.dedup();
        let videos = self.videos.find_by_ids(&video_ids).await?;
        let videos_by_id: HashMap<Uuid, _> = videos.iter().map(|v| (v.id, v)).collect();

        let mut owner_ids: Vec<Uuid> = videos.iter().map(|v| v.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners = self.users.find_by_ids(&owner_ids).await?;
        let owners_by_id: HashMap<Uuid, _> = owners.iter().map(|u| (u.id, u)).collect();

        let items = entries
            .iter()
            .filter_map(|entry| {
                let video = videos_by_id.get(&entry.video_id)?;
                let owner = owners_by_id.get(&video.owner_id)?;
                Some(WatchHistoryItem {
                    video_id: video.id,
                    title: video.title.clone(),
                    owner: owner.card(),
                    watched_at: entry.created_at,
                })
            })
            .collect();
        Ok(items)
    }
}

// ── RecordWatch ──────────────────────────────────────────────────────────────

pub struct RecordWatchUseCase<W: WatchHistoryRepository> {
    pub history: W,
}

impl<W: WatchHistoryRepository> RecordWatchUseCase<W> {
    /// Append a history row. Re-watching appends again — duplicates are part
    /// of the history's meaning.
    pub async fn execute(
        &self,
        user_id: Uuid,
        video_id: Uuid,
    ) -> Result<(), IdentityServiceError> {
        let entry = WatchEntry {
            id: Uuid::now_v7(),
            user_id,
            video_id,
            created_at: Utc::now(),
        };
        self.history.append(&entry).await
    }
}
