/// Identity service configuration loaded from environment variables.
#[derive(Debug)]
pub struct IdentityConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub access_token_secret: String,
    /// HMAC secret for signing refresh tokens. Independent from the access
    /// secret so compromise of one cannot forge the other.
    pub refresh_token_secret: String,
    /// Access-token lifetime in seconds (default 900). Env var: `ACCESS_TOKEN_TTL_SECS`.
    pub access_token_ttl_secs: u64,
    /// Refresh-token lifetime in seconds (default 10 days). Env var: `REFRESH_TOKEN_TTL_SECS`.
    pub refresh_token_ttl_secs: u64,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Media upload collaborator endpoint (e.g. "http://media:3200/upload").
    pub media_upload_url: String,
    /// TCP port to listen on (default 3114). Env var: `IDENTITY_PORT`.
    pub identity_port: u16,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            access_token_secret: std::env::var("ACCESS_TOKEN_SECRET")
                .expect("ACCESS_TOKEN_SECRET"),
            refresh_token_secret: std::env::var("REFRESH_TOKEN_SECRET")
                .expect("REFRESH_TOKEN_SECRET"),
            access_token_ttl_secs: std::env::var("ACCESS_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            refresh_token_ttl_secs: std::env::var("REFRESH_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(864_000),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            media_upload_url: std::env::var("MEDIA_UPLOAD_URL").expect("MEDIA_UPLOAD_URL"),
            identity_port: std::env::var("IDENTITY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
        }
    }
}
