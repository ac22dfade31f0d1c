//! Request and response bodies.
//!
//! Field names match the JSON the HTTP clients already speak (`itemID`,
//! `confirmPassword`, `amount`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpile_core::{RestockOutcome, RoleName, User};

// =============================================================================
// Auth
// =============================================================================

/// Body of `POST /api/auth/register` and `/api/auth/admin/register`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
    pub role: RoleName,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.name,
        }
    }
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

// =============================================================================
// Inventory
// =============================================================================

/// Body of `POST /api/inventory`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub quantity: u32,
}

/// Body of `POST /api/inventory/{itemID}/restock`.
#[derive(Debug, Clone, Deserialize)]
pub struct RestockRequest {
    pub quantity: u32,
}

/// Created restock plus the item's state after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockResponse {
    pub id: i64,

    #[serde(rename = "itemID")]
    pub item_id: i64,

    pub quantity: i64,

    pub created_at: DateTime<Utc>,

    /// Item quantity after the increment.
    pub item_quantity: i64,

    pub last_restock: Option<DateTime<Utc>>,
}

impl From<RestockOutcome> for RestockResponse {
    fn from(outcome: RestockOutcome) -> Self {
        RestockResponse {
            id: outcome.event.id,
            item_id: outcome.event.item_id,
            quantity: outcome.event.quantity,
            created_at: outcome.event.created_at,
            item_quantity: outcome.item.quantity,
            last_restock: outcome.item.last_restock,
        }
    }
}

/// Query of `GET /api/inventory/restock`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "itemId")]
    pub item_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_accepts_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name":"Jo","email":"jo@example.com","password":"p","confirmPassword":"p"}"#,
        )
        .unwrap();
        assert_eq!(req.confirm_password, "p");

        let partial: RegisterRequest = serde_json::from_str(r#"{"email":"jo@example.com"}"#).unwrap();
        assert!(partial.password.is_empty());
    }

    #[test]
    fn test_restock_request_rejects_negative() {
        assert!(serde_json::from_str::<RestockRequest>(r#"{"quantity":-5}"#).is_err());
        assert!(serde_json::from_str::<RestockRequest>(r#"{}"#).is_err());
    }
}
