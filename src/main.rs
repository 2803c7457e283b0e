use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use servicebook::config::AppConfig;
use servicebook::db;
use servicebook::handlers;
use servicebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    if config.uses_dev_secret() {
        tracing::warn!("SECRET_KEY not set, using the development key; sessions are forgeable");
    }

    let conn = db::init_db(&config.database_url)?;
    tracing::info!(database = %config.database_url, locale = config.locale.code(), "database ready");

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(conn, config));
    let app = handlers::router(state);

    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
