use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::errors::AppError;

pub type DbPool = SqlitePool;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open the pool. Foreign keys are enforced on every connection so that
/// deleting a user cascades to its meetings.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<DbPool, AppError> {
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if !is_memory_url(database_url) {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    log::info!("Database connected ({database_url})");
    Ok(pool)
}

/// Single-connection in-memory pool. Every SQLite `:memory:` connection is its
/// own database, so the one connection is never allowed to expire.
pub async fn init_memory_pool() -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

pub async fn close(pool: &DbPool) {
    pool.close().await;
    log::info!("Database connection closed");
}
