use chrono::Utc;
use uuid::Uuid;

use cliphub_domain::pagination::PageRequest;
use cliphub_identity::domain::types::WatchEntry;
use cliphub_identity::error::IdentityServiceError;
use cliphub_identity::usecase::history::{RecordWatchUseCase, WatchHistoryUseCase};
use cliphub_identity::usecase::profile::{
    ChannelProfileUseCase, ChannelSubscribersUseCase, SubscribedChannelsUseCase,
};

use crate::helpers::{
    MockSubscriptionRepo, MockUserRepo, MockVideoRepo, MockWatchHistoryRepo, test_user,
    test_video,
};

// ── Channel profile ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_aggregate_counts_and_membership_for_channel_profile() {
    let alice = test_user("alice", "alice@example.com", "pw");
    let bob = test_user("bob", "bob@example.com", "pw");
    let carol = test_user("carol", "carol@example.com", "pw");
    let dave = test_user("dave", "dave@example.com", "pw");
    let eve = test_user("eve", "eve@example.com", "pw");

    // Three distinct subscribers to alice; alice subscribes to two channels.
    let subscriptions = MockSubscriptionRepo::with_edges(&[
        (bob.id, alice.id),
        (carol.id, alice.id),
        (dave.id, alice.id),
        (alice.id, bob.id),
        (alice.id, eve.id),
    ]);
    let usecase = ChannelProfileUseCase {
        users: MockUserRepo::new(vec![
            alice.clone(),
            bob.clone(),
            carol.clone(),
            dave.clone(),
            eve.clone(),
        ]),
        subscriptions,
    };

    let profile = usecase.execute("alice", Some(bob.id)).await.unwrap();
    assert_eq!(profile.subscribers_count, 3);
    assert_eq!(profile.subscribed_to_count, 2);
    assert!(profile.is_subscribed);
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email, "alice@example.com");

    // Subscribed only for the three actual subscribers.
    for viewer in [carol.id, dave.id] {
        let p = usecase.execute("alice", Some(viewer)).await.unwrap();
        assert!(p.is_subscribed);
    }
    let as_eve = usecase.execute("alice", Some(eve.id)).await.unwrap();
    assert!(!as_eve.is_subscribed);
}

#[tokio::test]
async fn should_report_false_membership_for_anonymous_viewer() {
    let alice = test_user("alice", "alice@example.com", "pw");
    let bob = test_user("bob", "bob@example.com", "pw");
    let usecase = ChannelProfileUseCase {
        users: MockUserRepo::new(vec![alice.clone(), bob.clone()]),
        subscriptions: MockSubscriptionRepo::with_edges(&[(bob.id, alice.id)]),
    };

    let profile = usecase.execute("alice", None).await.unwrap();
    assert_eq!(profile.subscribers_count, 1);
    assert!(!profile.is_subscribed);
}

#[tokio::test]
async fn should_resolve_channel_username_case_insensitively() {
    let alice = test_user("alice", "alice@example.com", "pw");
    let usecase = ChannelProfileUseCase {
        users: MockUserRepo::new(vec![alice]),
        subscriptions: MockSubscriptionRepo::new(),
    };

    let profile = usecase.execute("  AlIcE ", None).await.unwrap();
    assert_eq!(profile.username, "alice");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_channel() {
    let usecase = ChannelProfileUseCase {
        users: MockUserRepo::empty(),
        subscriptions: MockSubscriptionRepo::new(),
    };

    let result = usecase.execute("ghost", None).await;
    assert!(
        matches!(result, Err(IdentityServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

// ── Listings ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_subscribers_as_public_cards_in_edge_order() {
    let alice = test_user("alice", "alice@example.com", "pw");
    let bob = test_user("bob", "bob@example.com", "pw");
    let carol = test_user("carol", "carol@example.com", "pw");

    let usecase = ChannelSubscribersUseCase {
        users: MockUserRepo::new(vec![alice.clone(), bob.clone(), carol.clone()]),
        subscriptions: MockSubscriptionRepo::with_edges(&[
            (carol.id, alice.id),
            (bob.id, alice.id),
        ]),
    };

    let cards = usecase.execute(alice.id).await.unwrap();
    let usernames: Vec<_> = cards.iter().map(|c| c.username.as_str()).collect();
    assert_eq!(usernames, ["carol", "bob"]);
    // Cards are the public reduction only.
    assert_eq!(cards[0].full_name, "carol Example");
    assert_eq!(cards[0].avatar_url, "https://cdn.test/carol.png");
}

#[tokio::test]
async fn should_list_subscribed_channels_symmetrically() {
    let alice = test_user("alice", "alice@example.com", "pw");
    let news = test_user("news", "news@example.com", "pw");
    let music = test_user("music", "music@example.com", "pw");

    let usecase = SubscribedChannelsUseCase {
        users: MockUserRepo::new(vec![alice.clone(), news.clone(), music.clone()]),
        subscriptions: MockSubscriptionRepo::with_edges(&[
            (alice.id, news.id),
            (alice.id, music.id),
        ]),
    };

    let cards = usecase.execute(alice.id).await.unwrap();
    let usernames: Vec<_> = cards.iter().map(|c| c.username.as_str()).collect();
    assert_eq!(usernames, ["news", "music"]);
}

// ── Watch history ────────────────────────────────────────────────────────────

fn entry(user_id: Uuid, video_id: Uuid) -> WatchEntry {
    WatchEntry {
        id: Uuid::now_v7(),
        user_id,
        video_id,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn should_preserve_order_and_duplicates_in_watch_history() {
    let viewer = test_user("viewer", "viewer@example.com", "pw");
    let owner = test_user("owner", "owner@example.com", "pw");
    let first = test_video(owner.id, "First");
    let second = test_video(owner.id, "Second");

    // Watched: first, second, second again (back to back), first again.
    let history = MockWatchHistoryRepo::new(vec![
        entry(viewer.id, first.id),
        entry(viewer.id, second.id),
        entry(viewer.id, second.id),
        entry(viewer.id, first.id),
    ]);
    let usecase = WatchHistoryUseCase {
        history,
        videos: MockVideoRepo {
            videos: vec![first.clone(), second.clone()],
        },
        users: MockUserRepo::new(vec![viewer.clone(), owner.clone()]),
    };

    let items = usecase
        .execute(viewer.id, PageRequest::default())
        .await
        .unwrap();
    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second", "Second", "First"]);
    assert_eq!(items[0].owner.username, "owner");
}

#[tokio::test]
async fn should_omit_entries_whose_video_was_deleted() {
    let viewer = test_user("viewer", "viewer@example.com", "pw");
    let owner = test_user("owner", "owner@example.com", "pw");
    let kept = test_video(owner.id, "Kept");
    let deleted_id = Uuid::now_v7();

    let history = MockWatchHistoryRepo::new(vec![
        entry(viewer.id, kept.id),
        entry(viewer.id, deleted_id),
        entry(viewer.id, kept.id),
    ]);
    let usecase = WatchHistoryUseCase {
        history,
        videos: MockVideoRepo {
            videos: vec![kept.clone()],
        },
        users: MockUserRepo::new(vec![viewer.clone(), owner]),
    };

    let items = usecase
        .execute(viewer.id, PageRequest::default())
        .await
        .unwrap();
    // The dangling entry is dropped, the rest keep their order.
    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Kept", "Kept"]);
}

#[tokio::test]
async fn should_scope_history_to_the_requesting_user() {
    let viewer = test_user("viewer", "viewer@example.com", "pw");
    let other = test_user("other", "other@example.com", "pw");
    let owner = test_user("owner", "owner@example.com", "pw");
    let video = test_video(owner.id, "Video");

    let history = MockWatchHistoryRepo::new(vec![
        entry(viewer.id, video.id),
        entry(other.id, video.id),
    ]);
    let usecase = WatchHistoryUseCase {
        history,
        videos: MockVideoRepo {
            videos: vec![video],
        },
        users: MockUserRepo::new(vec![viewer.clone(), other, owner]),
    };

    let items = usecase
        .execute(viewer.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn should_append_duplicate_entries_when_rewatching() {
    let viewer = Uuid::now_v7();
    let video = Uuid::now_v7();
    let history = MockWatchHistoryRepo::empty();

    let usecase = RecordWatchUseCase {
        history: history.clone(),
    };
    usecase.execute(viewer, video).await.unwrap();
    usecase.execute(viewer, video).await.unwrap();

    assert_eq!(history.entries.lock().unwrap().len(), 2);
}
