//! # Inventory Item Repository
//!
//! Item creation and lookup. Quantity changes go through
//! [`RestockRepository::apply`](super::restock::RestockRepository::apply),
//! never through this repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockpile_core::{InventoryItem, NewInventoryItem};

/// Repository for inventory item operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts a new item and returns the stored row.
    pub async fn insert(&self, item: &NewInventoryItem, now: DateTime<Utc>) -> DbResult<InventoryItem> {
        debug!(name = %item.name, quantity = item.quantity, "Inserting inventory item");

        let created = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items (name, description, quantity, last_restock, created_at, updated_at)
            VALUES (?1, ?2, ?3, NULL, ?4, ?4)
            RETURNING id, name, description, quantity, last_restock, created_at, updated_at
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Gets an item by id.
    ///
    /// ## Returns
    /// * `Ok(Some(InventoryItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, name, description, quantity, last_restock, created_at, updated_at
            FROM inventory_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Returns true if an item with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM inventory_items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};

    fn widget(quantity: i64) -> NewInventoryItem {
        NewInventoryItem {
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let now = Utc::now();

        let created = db.items().insert(&widget(5), now).await.unwrap();
        assert_eq!(created.quantity, 5);
        assert!(created.last_restock.is_none());

        let fetched = db.items().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(db.items().exists(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.items().get_by_id(404).await.unwrap().is_none());
        assert!(!db.items().exists(404).await.unwrap());
    }

    #[tokio::test]
    async fn test_negative_quantity_rejected_by_storage() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.items().insert(&widget(-1), Utc::now()).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }), "got {err:?}");
    }
}
