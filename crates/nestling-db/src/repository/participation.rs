//! # Participation Repository
//!
//! Database operations for group-buy participation records.
//!
//! ## Participation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Participation Lifecycle                              │
//! │                                                                         │
//! │  1. JOIN                                                               │
//! │     └── join(item, user) → Participation                               │
//! │         (UNIQUE(team_item_id, user_id): a second join is a duplicate)  │
//! │                                                                         │
//! │  2. COUNT                                                              │
//! │     └── count_for_item(item) → u64 → pricing engine                    │
//! │                                                                         │
//! │  3. (OPTIONAL) LEAVE                                                   │
//! │     └── leave(item, user) → row removed, price may step back up        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::team_item::count_to_u64;
use nestling_core::Participation;

/// Repository for participation database operations.
#[derive(Debug, Clone)]
pub struct ParticipationRepository {
    pool: SqlitePool,
}

impl ParticipationRepository {
    /// Creates a new ParticipationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ParticipationRepository { pool }
    }

    /// Records that `user_id` joined the team item.
    ///
    /// ## Returns
    /// * `Ok(Participation)` - The new record
    /// * `Err(DbError::UniqueViolation)` - The user already joined
    /// * `Err(DbError::ForeignKeyViolation)` - The item doesn't exist
    pub async fn join(&self, team_item_id: &str, user_id: &str) -> DbResult<Participation> {
        debug!(team_item_id = %team_item_id, user_id = %user_id, "Recording participation");

        let participation = Participation {
            id: Uuid::new_v4().to_string(),
            team_item_id: team_item_id.to_string(),
            user_id: user_id.to_string(),
            joined_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO participations (id, team_item_id, user_id, joined_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&participation.id)
        .bind(&participation.team_item_id)
        .bind(&participation.user_id)
        .bind(participation.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("participation", user_id),
            other => other,
        })?;

        Ok(participation)
    }

    /// Removes a user's participation.
    ///
    /// ## Returns
    /// * `Ok(())` - Removed
    /// * `Err(DbError::NotFound)` - The user had not joined
    pub async fn leave(&self, team_item_id: &str, user_id: &str) -> DbResult<()> {
        debug!(team_item_id = %team_item_id, user_id = %user_id, "Removing participation");

        let result = sqlx::query(
            "DELETE FROM participations WHERE team_item_id = ?1 AND user_id = ?2",
        )
        .bind(team_item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Participation", user_id));
        }

        Ok(())
    }

    /// Live participant count for an item.
    pub async fn count_for_item(&self, team_item_id: &str) -> DbResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM participations WHERE team_item_id = ?1")
                .bind(team_item_id)
                .fetch_one(&self.pool)
                .await?;

        count_to_u64(count)
    }

    /// Lists participation records for an item, earliest first.
    pub async fn list_for_item(&self, team_item_id: &str, limit: u32) -> DbResult<Vec<Participation>> {
        let rows = sqlx::query_as::<_, Participation>(
            r#"
            SELECT id, team_item_id, user_id, joined_at
            FROM participations
            WHERE team_item_id = ?1
            ORDER BY joined_at ASC, rowid ASC
            LIMIT ?2
            "#,
        )
        .bind(team_item_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
