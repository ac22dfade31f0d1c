//! # Restock Repository
//!
//! The append-only restock log and the atomic restock unit.
//!
//! ## Atomic Restock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply(item_id = 7, quantity = 50, now)                                 │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO restocks (7, 50, now)          ← CHECK 10 < qty < 1000   │
//! │    UPDATE inventory_items                                               │
//! │       SET quantity = quantity + 50,                                     │
//! │           last_restock = now                                            │
//! │    SELECT item 7                              ← post-increment state    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure before COMMIT: the transaction is dropped and SQLite       │
//! │  rolls back. Neither the restock row nor the increment is visible.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use stockpile_core::{InventoryItem, RestockEvent, RestockHistoryEntry, RestockOutcome};

/// Repository for restock operations.
#[derive(Debug, Clone)]
pub struct RestockRepository {
    pool: SqlitePool,
}

impl RestockRepository {
    /// Creates a new RestockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RestockRepository { pool }
    }

    /// Counts restocks of `item_id` created strictly after `since`.
    pub async fn count_since(&self, item_id: i64, since: DateTime<Utc>) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM restocks WHERE item_id = ?1 AND created_at > ?2",
        )
        .bind(item_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        debug!(item_id, %since, count, "Counted recent restocks");
        Ok(count)
    }

    /// Records a restock and increments the item in one transaction.
    ///
    /// `last_restock` is set to the event's `created_at`, so the two always
    /// agree.
    ///
    /// ## Errors
    /// * `NotFound` - the item does not exist
    /// * `CheckViolation` - `quantity` is outside the stored bounds
    /// * anything else from SQLite; nothing is persisted in every error case
    pub async fn apply(
        &self,
        item_id: i64,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> DbResult<RestockOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::transaction("begin", e))?;

        let event = sqlx::query_as::<_, RestockEvent>(
            r#"
            INSERT INTO restocks (item_id, quantity, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, item_id, quantity, created_at
            "#,
        )
        .bind(item_id)
        .bind(quantity)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => {
                DbError::not_found("InventoryItem", item_id.to_string())
            }
            other => other,
        })?;

        let updated = sqlx::query(
            r#"
            UPDATE inventory_items
            SET quantity = quantity + ?2,
                last_restock = ?3,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(item_id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback()
                .await
                .map_err(|e| DbError::transaction("rollback", e))?;
            return Err(DbError::not_found("InventoryItem", item_id.to_string()));
        }

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, name, description, quantity, last_restock, created_at, updated_at
            FROM inventory_items
            WHERE id = ?1
            "#,
        )
        .bind(item_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::transaction("commit", e))?;

        info!(
            item_id,
            restock_id = event.id,
            quantity,
            item_quantity = item.quantity,
            "Restock applied"
        );

        Ok(RestockOutcome { event, item })
    }

    /// Lists restocks joined with item names, newest first.
    ///
    /// With `Some(item_id)` only that item's restocks are returned.
    pub async fn history(&self, item_id: Option<i64>) -> DbResult<Vec<RestockHistoryEntry>> {
        let entries = sqlx::query_as::<_, RestockHistoryEntry>(
            r#"
            SELECT
                r.item_id AS item_id,
                i.name AS name,
                r.quantity AS quantity,
                r.created_at AS created_at
            FROM restocks r
            INNER JOIN inventory_items i ON i.id = r.item_id
            WHERE ?1 IS NULL OR r.item_id = ?1
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(?item_id, count = entries.len(), "Loaded restock history");
        Ok(entries)
    }

    /// Lists the raw restock events of one item, oldest first.
    pub async fn list_for_item(&self, item_id: i64) -> DbResult<Vec<RestockEvent>> {
        let events = sqlx::query_as::<_, RestockEvent>(
            r#"
            SELECT id, item_id, quantity, created_at
            FROM restocks
            WHERE item_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
