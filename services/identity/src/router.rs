use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use cliphub_core::health::{healthz, readyz};
use cliphub_core::middleware::request_id_layer;

use crate::handlers::{
    channel::channel_profile,
    history::{get_watch_history, record_watch},
    subscription::{channel_subscribers, subscribed_channels, toggle_subscription},
    user::{change_password, login, logout, refresh_token, register},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Account
        .route("/users", post(register))
        .route("/users/login", post(login))
        .route("/users/logout", post(logout))
        .route("/users/refresh-token", post(refresh_token))
        .route("/users/change-password", post(change_password))
        // Watch history
        .route("/users/history", get(get_watch_history))
        .route("/users/history", post(record_watch))
        // Subscriptions
        .route("/subscriptions/{channel_id}", post(toggle_subscription))
        .route(
            "/subscriptions/{channel_id}/subscribers",
            get(channel_subscribers),
        )
        .route("/subscriptions/{user_id}/channels", get(subscribed_channels))
        // Channels
        .route("/channels/{username}", get(channel_profile))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
