use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// Build the connection pool described by `config`
pub async fn connect_pool(config: &SearchConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.database_url)
        .await
        .map_err(|e| SearchError::execution("connect", e.to_string()))?;

    info!(
        max_connections = config.max_connections,
        "database pool connected"
    );

    Ok(pool)
}
