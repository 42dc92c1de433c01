use sea_orm::Database;
use tracing::info;

use cliphub_identity::config::IdentityConfig;
use cliphub_identity::infra::media::HttpMediaStore;
use cliphub_identity::router::build_router;
use cliphub_identity::state::AppState;
use cliphub_identity::usecase::token::TokenKeys;

#[tokio::main]
async fn main() {
    cliphub_core::tracing::init_tracing();

    let config = IdentityConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let media = HttpMediaStore {
        client: reqwest::Client::new(),
        upload_url: config.media_upload_url,
    };

    let state = AppState {
        db,
        keys: TokenKeys {
            access_secret: config.access_token_secret,
            refresh_secret: config.refresh_token_secret,
            access_ttl_secs: config.access_token_ttl_secs,
            refresh_ttl_secs: config.refresh_token_ttl_secs,
        },
        cookie_domain: config.cookie_domain,
        media,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
