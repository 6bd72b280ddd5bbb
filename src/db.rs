use std::time::Duration;

use anyhow::Context;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

use crate::store::mysql::CREATE_TABLE;

/// Creates the pool without connecting; connections are opened on first use,
/// so an unreachable database fails requests instead of the process.
pub fn init_db(database_url: &str, max_connections: u32) -> anyhow::Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url)
        .context("Invalid DATABASE_URL")
}

pub async fn ensure_schema(pool: &MySqlPool) -> anyhow::Result<()> {
    sqlx::query(CREATE_TABLE)
        .execute(pool)
        .await
        .context("Failed to create Attendance table")?;
    Ok(())
}
