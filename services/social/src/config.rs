use forgexp_core::config::{or_default, parsed_or, required};

/// Username the sentinel account is provisioned under.
pub const DEFAULT_SENTINEL_USERNAME: &str = "Deleted User";

/// Social service configuration loaded from environment variables.
#[derive(Debug)]
pub struct SocialConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3000). Env var: `SOCIAL_PORT`.
    pub social_port: u16,
    /// Username of the account that inherits posts of deleted users.
    /// Env var: `SENTINEL_USERNAME`.
    pub sentinel_username: String,
}

impl SocialConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: required("DATABASE_URL"),
            jwt_secret: required("JWT_SECRET"),
            social_port: parsed_or("SOCIAL_PORT", 3000),
            sentinel_username: or_default("SENTINEL_USERNAME", DEFAULT_SENTINEL_USERNAME),
        }
    }
}
