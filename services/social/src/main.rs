use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use forgexp_auth_types::token::JwtAuthProvider;
use forgexp_core::tracing::init_tracing;

use forgexp_social::config::SocialConfig;
use forgexp_social::infra::db::DbUserRepository;
use forgexp_social::router::build_router;
use forgexp_social::state::AppState;
use forgexp_social::usecase::deletion::ResolveSentinelUseCase;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SocialConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    // Deleting users is impossible without the sentinel, so refuse to start.
    let sentinel = ResolveSentinelUseCase {
        users: DbUserRepository { db: db.clone() },
    }
    .execute(&config.sentinel_username)
    .await
    .context("failed to resolve sentinel account")?;
    info!(sentinel_id = %sentinel.id(), "sentinel account resolved");

    let state = AppState {
        db,
        auth: JwtAuthProvider::new(config.jwt_secret),
        sentinel,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.social_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .context("failed to bind")?;

    info!("social service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
