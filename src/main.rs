//! Server binary: loads config, connects the pool, ensures the `users` table, serves the API.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use user_api::{app, ensure_database_exists, ensure_schema, AppConfig, AppState, PgUserRepository};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("user_api=info,tower_http=info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    tracing::info!("database connected");
    ensure_schema(&pool).await?;

    let state = AppState::new(Arc::new(PgUserRepository::new(pool)), config.environment);
    let router = app(state, config.body_limit_bytes);

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(environment = ?config.environment, "listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
