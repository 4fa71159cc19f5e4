pub mod postgres;
pub mod migrations;
pub mod repositories;

pub use postgres::{create_postgres_pool, health_check as postgres_health_check, PostgresPool};
pub use repositories::*;

use anyhow::{Context, Result};
use buildcheck_utils::DatabaseConfig;
use std::time::Duration;

/// Connects to Postgres, verifies the connection and brings the schema up to
/// date.
pub async fn initialize_database(config: &DatabaseConfig) -> Result<PostgresPool> {
    let pool = create_postgres_pool(
        &config.postgres_url,
        config.max_connections,
        Duration::from_secs(config.connection_timeout_seconds),
    )
    .await?;

    postgres_health_check(&pool)
        .await
        .context("PostgreSQL health check failed")?;
    migrations::run_postgres_migrations(&pool).await?;

    Ok(pool)
}
