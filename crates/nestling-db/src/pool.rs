//! # Database Pool
//!
//! Opens the SQLite pool behind the group-buy service and hands out
//! repositories over it.
//!
//! ```text
//! ApiConfig ──► DbConfig ──► Database::new ──► SqlitePool (WAL, FK on)
//!                                  │
//!                                  └──► embedded migrations
//! ```
//!
//! WAL is enabled so that price reads (count queries) never block on joins
//! being written.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::participation::ParticipationRepository;
use crate::repository::team_item::TeamItemRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives and how many connections the pool may open.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `None` for a private in-memory database.
    pub database_path: Option<PathBuf>,

    /// Upper bound on pooled connections.
    pub max_connections: u32,

    /// How long an unused connection stays open. `None` keeps it forever.
    pub idle_timeout: Option<Duration>,
}

impl DbConfig {
    /// File-backed database; the file is created if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: Some(path.into()),
            max_connections: 5,
            idle_timeout: Some(Duration::from_secs(600)),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Private in-memory database for tests.
    ///
    /// The data lives only as long as its single connection, so that
    /// connection is never recycled.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: None,
            max_connections: 1,
            idle_timeout: None,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared database handle.
///
/// Cloning is cheap (the pool is reference counted), so the HTTP layer keeps
/// one in its shared state and hands out repositories per request.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let options = match &config.database_path {
            Some(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
            None => SqliteConnectOptions::new().in_memory(true),
        }
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        // Off by default in SQLite
        .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(config.idle_timeout);
        if config.database_path.is_none() {
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            path = ?config.database_path,
            max_connections = config.max_connections,
            "Database pool created"
        );

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    /// Returns the team item repository.
    pub fn team_items(&self) -> TeamItemRepository {
        TeamItemRepository::new(self.pool.clone())
    }

    /// Returns the participation repository.
    pub fn participations(&self) -> ParticipationRepository {
        ParticipationRepository::new(self.pool.clone())
    }

    /// Closes the pool. Every later query fails.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(db.team_items().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[test]
    fn test_in_memory_connection_is_never_recycled() {
        let config = DbConfig::in_memory();
        assert_eq!(config.database_path, None);
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.idle_timeout, None);
    }

    #[test]
    fn test_file_config() {
        let config = DbConfig::new("/tmp/nestling.db").max_connections(10);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/nestling.db")));
        assert_eq!(config.max_connections, 10);
        assert!(config.idle_timeout.is_some());
    }

    #[tokio::test]
    async fn test_file_database_persists_across_pools() {
        let path = std::env::temp_dir().join(format!("nestling-pool-{}.db", uuid::Uuid::new_v4()));

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(reopened.health_check().await);
        reopened.close().await;

        let _ = std::fs::remove_file(&path);
    }
}
