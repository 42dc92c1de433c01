use uuid::Uuid;

use cliphub_identity::usecase::subscription::ToggleSubscriptionUseCase;

use crate::helpers::MockSubscriptionRepo;

#[tokio::test]
async fn should_flip_edge_state_on_each_toggle() {
    let subscriber = Uuid::now_v7();
    let channel = Uuid::now_v7();
    let repo = MockSubscriptionRepo::new();
    let usecase = ToggleSubscriptionUseCase {
        subscriptions: repo.clone(),
    };

    assert!(usecase.execute(subscriber, channel).await.unwrap().subscribed);
    assert!(!usecase.execute(subscriber, channel).await.unwrap().subscribed);
    assert!(usecase.execute(subscriber, channel).await.unwrap().subscribed);
    assert_eq!(repo.edge_count(), 1);
}

#[tokio::test]
async fn should_keep_other_subscribers_of_channel_untouched() {
    let alice = Uuid::now_v7();
    let bob = Uuid::now_v7();
    let carol = Uuid::now_v7();
    let channel = Uuid::now_v7();
    // bob and carol already subscribe to the channel.
    let repo = MockSubscriptionRepo::with_edges(&[(bob, channel), (carol, channel)]);
    let usecase = ToggleSubscriptionUseCase {
        subscriptions: repo.clone(),
    };

    // alice subscribing and unsubscribing must only ever move her own edge;
    // keying on the channel alone would delete bob's or carol's instead.
    usecase.execute(alice, channel).await.unwrap();
    assert_eq!(repo.edge_count(), 3);
    usecase.execute(alice, channel).await.unwrap();
    assert_eq!(repo.edge_count(), 2);
    assert!(repo.subscriptions_contain(bob, channel));
    assert!(repo.subscriptions_contain(carol, channel));
}

#[tokio::test]
async fn should_keep_other_channels_of_subscriber_untouched() {
    let alice = Uuid::now_v7();
    let news = Uuid::now_v7();
    let music = Uuid::now_v7();
    let repo = MockSubscriptionRepo::with_edges(&[(alice, news)]);
    let usecase = ToggleSubscriptionUseCase {
        subscriptions: repo.clone(),
    };

    for _ in 0..3 {
        usecase.execute(alice, music).await.unwrap();
    }
    assert!(repo.subscriptions_contain(alice, news));
    assert!(repo.subscriptions_contain(alice, music));
}

#[tokio::test]
async fn should_converge_under_concurrent_toggles_of_same_pair() {
    let subscriber = Uuid::now_v7();
    let channel = Uuid::now_v7();
    let repo = MockSubscriptionRepo::new();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let usecase = ToggleSubscriptionUseCase {
            subscriptions: repo.clone(),
        };
        tasks.push(tokio::spawn(async move {
            usecase.execute(subscriber, channel).await.unwrap()
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    // Each toggle is atomic under the composite key, so eight of them land
    // back on the initial state with no duplicate edges.
    assert_eq!(repo.edge_count(), 0);
}
