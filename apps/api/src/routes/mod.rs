//! HTTP routes.
//!
//! | Method & path                          | Gate                    |
//! |----------------------------------------|-------------------------|
//! | `GET  /health`                         | none                    |
//! | `POST /api/auth/register`              | none                    |
//! | `POST /api/auth/login`                 | none                    |
//! | `POST /api/auth/admin/register`        | Administrator           |
//! | `POST /api/inventory`                  | Administrator           |
//! | `GET  /api/inventory/restock`          | any authenticated role  |
//! | `POST /api/inventory/{item_id}/restock`| Administrator           |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::AppState;

pub mod auth;
pub mod health;
pub mod inventory;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/admin/register", post(auth::register_admin))
        .route("/api/inventory", post(inventory::create_item))
        .route("/api/inventory/restock", get(inventory::history))
        .route("/api/inventory/{item_id}/restock", post(inventory::restock))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Undecodable JSON body.
pub(crate) fn invalid_input(rejection: JsonRejection) -> ApiError {
    tracing::debug!(%rejection, "Rejected request body");
    ApiError::bad_request("Invalid input")
}
