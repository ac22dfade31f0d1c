//! # Domain Types
//!
//! Core domain types used throughout Stockpile.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  InventoryItem  │   │  RestockEvent   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  email (unique) │   │  name           │   │  item_id (ref)  │       │
//! │  │  password_hash  │   │  quantity (≥0)  │◄──│  quantity       │       │
//! │  │  role ──────┐   │   │  last_restock   │   │  created_at     │       │
//! │  └─────────────┼───┘   └─────────────────┘   └─────────────────┘       │
//! │                ▼                                                        │
//! │  ┌─────────────────┐                                                    │
//! │  │      Role       │   RoleName: Administrator | User                   │
//! │  │  id, name       │   (seeded, never created by requests)              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Restock events reference their item by identifier only; an item does not
//! own its events and events are never updated or deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Roles
// =============================================================================

/// The fixed set of role names.
///
/// The string form is what travels inside session tokens and what is stored
/// in the `roles.name` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum RoleName {
    /// Full access, including item creation and restocks.
    Administrator,
    /// Authenticated read access.
    User,
}

impl RoleName {
    /// Every role that is seeded at startup.
    pub const ALL: [RoleName; 2] = [RoleName::Administrator, RoleName::User];

    /// Returns the canonical name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoleName::Administrator => "Administrator",
            RoleName::User => "User",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Administrator" => Ok(RoleName::Administrator),
            "User" => Ok(RoleName::User),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

/// A persisted role row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
}

// =============================================================================
// User
// =============================================================================

/// A principal that can log in.
///
/// `password_hash` is always a one-way digest and is never serialized.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unique login identifier.
    pub email: String,

    /// PHC-format password digest.
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub password_hash: String,

    /// Assigned role.
    pub role: Role,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Data needed to insert a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i64,
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A stocked item.
///
/// `quantity` and `last_restock` only change through a restock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventoryItem {
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Units on hand, never negative.
    pub quantity: i64,

    /// Creation time of the most recent restock, if any.
    #[ts(as = "Option<String>")]
    pub last_restock: Option<DateTime<Utc>>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Data needed to insert an inventory item.
#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub name: String,
    pub description: String,
    pub quantity: i64,
}

// =============================================================================
// Restock Event
// =============================================================================

/// One restock action. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RestockEvent {
    pub id: i64,

    /// The restocked item.
    #[serde(rename = "itemID")]
    pub item_id: i64,

    /// Units added.
    pub quantity: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Result of an applied restock: the stored event plus the item as it
/// stands after the increment.
#[derive(Debug, Clone, PartialEq)]
pub struct RestockOutcome {
    pub event: RestockEvent,
    pub item: InventoryItem,
}

/// A restock joined with its item's name, for history listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct RestockHistoryEntry {
    #[serde(rename = "itemID")]
    pub item_id: i64,

    pub name: String,

    #[serde(rename = "amount")]
    pub quantity: i64,

    #[serde(rename = "time")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_round_trips_through_str() {
        for role in RoleName::ALL {
            assert_eq!(role.as_str().parse::<RoleName>().unwrap(), role);
        }
        assert!("Root".parse::<RoleName>().is_err());
    }

    #[test]
    fn test_restock_event_wire_names() {
        let event = RestockEvent {
            id: 1,
            item_id: 42,
            quantity: 50,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["itemID"], 42);
        assert_eq!(json["quantity"], 50);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_user_never_serializes_password_hash() {
        let now = Utc::now();
        let user = User {
            id: 1,
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role {
                id: 1,
                name: RoleName::Administrator,
            },
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"Administrator\""));
    }
}
