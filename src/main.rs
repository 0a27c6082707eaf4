//! Conecta server binary.
//!
//! Bootstraps configuration, logging, the PostgreSQL pool, and the axum
//! router, then serves until shutdown.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use conecta::adapters::http::{api_router, AppState};
use conecta::adapters::notification::TracingNotificationSink;
use conecta::adapters::postgres::{
    PostgresDashboardReader, PostgresIntentRepository, PostgresMemberReader,
    PostgresMemberRepository, PostgresReferralRepository, PostgresRegistrationUnit,
    PostgresUserRepository,
};
use conecta::adapters::security::Argon2CredentialHasher;
use conecta::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let state = AppState {
        intents: Arc::new(PostgresIntentRepository::new(pool.clone())),
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        member_reader: Arc::new(PostgresMemberReader::new(pool.clone())),
        referrals: Arc::new(PostgresReferralRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        registration: Arc::new(PostgresRegistrationUnit::new(pool.clone())),
        dashboard: Arc::new(PostgresDashboardReader::new(pool)),
        notifier: Arc::new(TracingNotificationSink::new()),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        admin_api_key: Arc::from(config.auth.admin_api_key.as_str()),
    };

    let app = api_router(state);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "conecta listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
