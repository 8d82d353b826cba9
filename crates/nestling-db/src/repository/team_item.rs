//! # Team Item Repository
//!
//! Database operations for group-buy items.
//!
//! ## Key Operations
//! - CRUD on items, with pricing stored inline on the row
//! - Catalog listing joined with live participant counts
//!
//! Pricing columns are returned as stored. Rows written before write-time
//! validation existed may hold out-of-policy values; the pricing engine
//! coerces those when it evaluates them.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use nestling_core::{PricingParameters, TeamItem};

const SELECT_TEAM_ITEM: &str = r#"
    SELECT
        id,
        title,
        description,
        base_price,
        min_price,
        discount_step_every,
        discount_step_percent,
        max_discount_percent,
        is_active,
        created_at,
        updated_at
    FROM team_items
"#;

/// A catalog row: the item and its live participant count.
#[derive(Debug, FromRow)]
struct TeamItemWithCount {
    #[sqlx(flatten)]
    item: TeamItem,
    participant_count: i64,
}

/// Repository for team item database operations.
#[derive(Debug, Clone)]
pub struct TeamItemRepository {
    pool: SqlitePool,
}

impl TeamItemRepository {
    /// Creates a new TeamItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TeamItemRepository { pool }
    }

    /// Gets a team item by its ID, active or not.
    ///
    /// ## Returns
    /// * `Ok(Some(TeamItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<TeamItem>> {
        let item = sqlx::query_as::<_, TeamItem>(&format!("{} WHERE id = ?1", SELECT_TEAM_ITEM))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Lists active items together with their participant counts.
    ///
    /// One grouped query instead of a count per item; the counts are as of
    /// this read and may trail concurrent joins.
    pub async fn list_active_with_counts(&self, limit: u32) -> DbResult<Vec<(TeamItem, u64)>> {
        debug!(limit = %limit, "Listing active team items with counts");

        let rows = sqlx::query_as::<_, TeamItemWithCount>(
            r#"
            SELECT
                t.id,
                t.title,
                t.description,
                t.base_price,
                t.min_price,
                t.discount_step_every,
                t.discount_step_percent,
                t.max_discount_percent,
                t.is_active,
                t.created_at,
                t.updated_at,
                COUNT(p.id) AS participant_count
            FROM team_items t
            LEFT JOIN participations p ON p.team_item_id = t.id
            WHERE t.is_active = 1
            GROUP BY t.id
            ORDER BY t.created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Ok((row.item, count_to_u64(row.participant_count)?)))
            .collect()
    }

    /// Inserts a new team item.
    ///
    /// ## Returns
    /// * `Ok(TeamItem)` - The stored item
    /// * `Err(DbError::UniqueViolation)` - ID already exists
    pub async fn insert(&self, item: &TeamItem) -> DbResult<TeamItem> {
        debug!(id = %item.id, title = %item.title, "Inserting team item");

        let pricing = &item.pricing;
        sqlx::query(
            r#"
            INSERT INTO team_items (
                id, title, description,
                base_price, min_price,
                discount_step_every, discount_step_percent, max_discount_percent,
                is_active, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3,
                ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11
            )
            "#,
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(pricing.base_price)
        .bind(pricing.min_price)
        .bind(pricing.discount_step_every)
        .bind(pricing.discount_step_percent)
        .bind(pricing.max_discount_percent)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    /// Replaces the pricing parameters of an item.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn update_pricing(&self, id: &str, pricing: &PricingParameters) -> DbResult<()> {
        debug!(id = %id, "Updating team item pricing");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE team_items SET
                base_price = ?2,
                min_price = ?3,
                discount_step_every = ?4,
                discount_step_percent = ?5,
                max_discount_percent = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(pricing.base_price)
        .bind(pricing.min_price)
        .bind(pricing.discount_step_every)
        .bind(pricing.discount_step_percent)
        .bind(pricing.max_discount_percent)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("TeamItem", id));
        }

        Ok(())
    }

    /// Soft-deletes an item by setting is_active = false.
    ///
    /// ## Why Soft Delete?
    /// Participation records still reference the item, and clients that
    /// polled an old detail page should get "closed" rather than "missing".
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting team item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE team_items
            SET
                is_active = 0,
                updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("TeamItem", id));
        }

        Ok(())
    }

    /// Counts active items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_items WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Converts a SQL `COUNT(*)` into a participant count.
pub(crate) fn count_to_u64(count: i64) -> DbResult<u64> {
    u64::try_from(count).map_err(|_| DbError::CorruptData {
        column: "participant_count".to_string(),
        reason: format!("negative count {}", count),
    })
}

/// Generates a new team item ID.
pub fn generate_team_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use nestling_core::{Money, NewTeamItem};

    fn pricing() -> PricingParameters {
        PricingParameters {
            base_price: Money::from_units(10000),
            min_price: Money::from_units(7000),
            discount_step_every: 10,
            discount_step_percent: 1.0,
            max_discount_percent: 30.0,
        }
    }

    fn new_item(title: &str) -> TeamItem {
        NewTeamItem {
            title: title.to_string(),
            description: Some("Shared shipping, ships in two weeks".to_string()),
            pricing: pricing(),
        }
        .into_team_item(generate_team_item_id(), Utc::now())
        .unwrap()
    }

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = setup().await;
        let item = new_item("Baby formula 800g x6");

        db.team_items().insert(&item).await.unwrap();
        let loaded = db.team_items().get_by_id(&item.id).await.unwrap().unwrap();

        assert_eq!(loaded.id, item.id);
        assert_eq!(loaded.title, item.title);
        assert_eq!(loaded.description, item.description);
        assert_eq!(loaded.pricing, item.pricing);
        assert!(loaded.is_active);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = setup().await;
        let missing = db.team_items().get_by_id("does-not-exist").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_unique_violation() {
        let db = setup().await;
        let item = new_item("Teething rings");
        db.team_items().insert(&item).await.unwrap();

        let err = db.team_items().insert(&item).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_pricing() {
        let db = setup().await;
        let item = new_item("Swaddle blankets");
        db.team_items().insert(&item).await.unwrap();

        let mut updated = pricing();
        updated.discount_step_percent = 2.5;
        updated.max_discount_percent = 20.0;
        db.team_items().update_pricing(&item.id, &updated).await.unwrap();

        let loaded = db.team_items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(loaded.pricing, updated);
        assert!(loaded.updated_at >= item.updated_at);

        let err = db.team_items().update_pricing("missing", &updated).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_listing() {
        let db = setup().await;
        let keep = new_item("Bibs");
        let retired = new_item("Night light");
        db.team_items().insert(&keep).await.unwrap();
        db.team_items().insert(&retired).await.unwrap();

        db.team_items().soft_delete(&retired.id).await.unwrap();

        let active = db.team_items().list_active_with_counts(10).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0.id, keep.id);
        assert_eq!(db.team_items().count().await.unwrap(), 1);

        let closed = db.team_items().get_by_id(&retired.id).await.unwrap().unwrap();
        assert!(!closed.is_active);

        let err = db.team_items().soft_delete("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_with_counts() {
        let db = setup().await;
        let popular = new_item("Diapers size 3");
        let quiet = new_item("Sippy cups");
        db.team_items().insert(&popular).await.unwrap();
        db.team_items().insert(&quiet).await.unwrap();

        for user in ["u1", "u2", "u3"] {
            db.participations().join(&popular.id, user).await.unwrap();
        }

        let rows = db.team_items().list_active_with_counts(10).await.unwrap();
        assert_eq!(rows.len(), 2);
        let count_of = |id: &str| rows.iter().find(|(item, _)| item.id == id).map(|(_, c)| *c);
        assert_eq!(count_of(&popular.id), Some(3));
        assert_eq!(count_of(&quiet.id), Some(0));
    }

    #[tokio::test]
    async fn test_legacy_out_of_policy_row_still_loads() {
        let db = setup().await;
        let mut item = new_item("Legacy bundle");
        item.pricing.discount_step_every = 0;
        item.pricing.discount_step_percent = 10.0;
        item.pricing.min_price = Money::from_units(12000);
        db.team_items().insert(&item).await.unwrap();

        let loaded = db.team_items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(loaded.pricing.discount_step_every, 0);
        assert_eq!(loaded.pricing.effective_step_every(), 1);
    }

    #[test]
    fn test_count_to_u64() {
        assert_eq!(count_to_u64(42).unwrap(), 42);
        assert!(matches!(count_to_u64(-1), Err(DbError::CorruptData { .. })));
    }
}
