//! Inventory items, restocks and restock history.
//!
//! ## Restock Flow
//! ```text
//! POST /api/inventory/{itemID}/restock  (Administrator, claims in hand)
//!      │
//!      ▼
//! 1. item exists?                    no  → 404 Item not found
//!      │
//!      ▼
//! 2. 10 < quantity < 1000?           no  → 400, nothing touched
//!      │
//!      ▼
//! 3. RestockQuotaTracker             ≥ 3 in last 24h → 429
//!      │
//!      ▼
//! 4. RestockRepository::apply        one transaction: event + increment
//!      │                             any failure → rollback, mapped error
//!      ▼
//! 5. 201 { event, item quantity }
//! ```
//!
//! Steps 3 and 4 are not one serializable unit. Two concurrent restocks of
//! the same item can both pass step 3, so the quota may be overshot by the
//! number of racing requests. Step 4 itself is always all-or-nothing.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use stockpile_core::validation::{validate_item_name, validate_restock_quantity};
use stockpile_core::{
    CoreError, InventoryItem, NewInventoryItem, RestockHistoryEntry, RestockOutcome, RestockQuota,
};
use stockpile_db::{DbResult, RestockRepository};

use crate::auth::Claims;
use crate::dto::CreateItemRequest;
use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Quota
// =============================================================================

/// Counts recent restocks from storage and applies the quota policy.
///
/// Holds no counters of its own; every check re-reads persisted events.
#[derive(Debug, Clone)]
pub struct RestockQuotaTracker {
    restocks: RestockRepository,
    quota: RestockQuota,
}

impl RestockQuotaTracker {
    pub fn new(restocks: RestockRepository, quota: RestockQuota) -> Self {
        RestockQuotaTracker { restocks, quota }
    }

    /// True when `item_id` already has the maximum number of restocks created
    /// strictly after `now - window`.
    ///
    /// A storage failure is returned as an error, never as "not reached".
    pub async fn is_quota_reached(&self, item_id: i64, now: DateTime<Utc>) -> DbResult<bool> {
        let count = self
            .restocks
            .count_since(item_id, self.quota.window_start(now))
            .await?;

        Ok(self.quota.is_reached(count))
    }
}

// =============================================================================
// Restock
// =============================================================================

/// Restock `item_id` by `quantity` on behalf of an already authorized caller.
pub async fn restock(
    state: &AppState,
    actor: &Claims,
    item_id: i64,
    quantity: i64,
) -> Result<RestockOutcome, ApiError> {
    if !state.db.items().exists(item_id).await? {
        return Err(CoreError::ItemNotFound(item_id).into());
    }

    validate_restock_quantity(quantity)?;

    let now = state.clock.now();
    let tracker = RestockQuotaTracker::new(state.db.restocks(), state.quota);

    if tracker.is_quota_reached(item_id, now).await? {
        warn!(item_id, user_id = actor.sub, "Restock quota reached");
        return Err(CoreError::QuotaExceeded {
            item_id,
            max: state.quota.max_restocks(),
        }
        .into());
    }

    let outcome = state.db.restocks().apply(item_id, quantity, now).await?;

    info!(
        item_id,
        restock_id = outcome.event.id,
        quantity,
        item_quantity = outcome.item.quantity,
        user_id = actor.sub,
        "Item restocked"
    );

    Ok(outcome)
}

// =============================================================================
// Items
// =============================================================================

/// Create an inventory item.
pub async fn create_item(
    state: &AppState,
    actor: &Claims,
    req: CreateItemRequest,
) -> Result<InventoryItem, ApiError> {
    validate_item_name(&req.name)?;

    let item = state
        .db
        .items()
        .insert(
            &NewInventoryItem {
                name: req.name.trim().to_string(),
                description: req.description,
                quantity: i64::from(req.quantity),
            },
            state.clock.now(),
        )
        .await?;

    info!(item_id = item.id, user_id = actor.sub, "Item created");
    Ok(item)
}

/// Restock history, newest first, optionally for one item.
pub async fn history(
    state: &AppState,
    item_id: Option<i64>,
) -> Result<Vec<RestockHistoryEntry>, ApiError> {
    if let Some(id) = item_id {
        if !state.db.items().exists(id).await? {
            return Err(CoreError::ItemNotFound(id).into());
        }
    }

    Ok(state.db.restocks().history(item_id).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{admin_claims, test_state};
    use chrono::Duration;
    use stockpile_core::Clock;

    async fn item(state: &AppState, quantity: u32) -> InventoryItem {
        create_item(
            state,
            &admin_claims(),
            CreateItemRequest {
                name: "Bolts".to_string(),
                description: String::new(),
                quantity,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_quota_tracker_window() {
        let (state, clock) = test_state().await;
        let bolts = item(&state, 5).await;
        let tracker = RestockQuotaTracker::new(state.db.restocks(), RestockQuota::default());

        for _ in 0..3 {
            assert!(!tracker.is_quota_reached(bolts.id, clock.now()).await.unwrap());
            restock(&state, &admin_claims(), bolts.id, 50).await.unwrap();
            clock.advance(Duration::hours(1));
        }
        assert!(tracker.is_quota_reached(bolts.id, clock.now()).await.unwrap());

        // At t0 + 24h the first restock (at t0) sits on the excluded boundary.
        clock.advance(Duration::hours(21));
        assert!(!tracker.is_quota_reached(bolts.id, clock.now()).await.unwrap());
    }

    #[tokio::test]
    async fn test_quota_counts_per_item() {
        let (state, _) = test_state().await;
        let bolts = item(&state, 5).await;
        let nuts = item(&state, 5).await;

        for _ in 0..3 {
            restock(&state, &admin_claims(), bolts.id, 50).await.unwrap();
        }

        assert!(restock(&state, &admin_claims(), nuts.id, 50).await.is_ok());
    }

    #[tokio::test]
    async fn test_restock_rejections_leave_no_trace() {
        let (state, _) = test_state().await;
        let bolts = item(&state, 5).await;

        for qty in [0, 5, 10, 1000, 5000] {
            let err = restock(&state, &admin_claims(), bolts.id, qty).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "qty {qty}");
        }

        let missing = restock(&state, &admin_claims(), 9999, 50).await.unwrap_err();
        assert_eq!(missing, ApiError::not_found("Item not found"));

        let stored = state.db.items().get_by_id(bolts.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 5);
        assert!(state.db.restocks().list_for_item(bolts.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_internal() {
        let (state, _) = test_state().await;
        let bolts = item(&state, 5).await;

        // Leaves the quota count with nothing to read from.
        sqlx::query("DROP TABLE restocks")
            .execute(state.db.pool())
            .await
            .unwrap();

        let err = restock(&state, &admin_claims(), bolts.id, 50).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, crate::error::INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_history_unknown_item() {
        let (state, _) = test_state().await;

        let err = history(&state, Some(42)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(history(&state, None).await.unwrap().is_empty());
    }
}
