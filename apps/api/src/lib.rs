//! # Stockpile API
//!
//! HTTP service for inventory restocks with per-item quotas.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Stockpile API                                  │
//! │                                                                         │
//! │  client ──► axum router ──► Authenticated ──► authorize ──► services    │
//! │                                                               │         │
//! │                                                               ▼         │
//! │                                                  stockpile-db (SQLite)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Password vault, session tokens and request gates
//! - [`config`] - Environment configuration
//! - [`dto`] - Request/response bodies
//! - [`error`] - `ApiError` and its status mapping
//! - [`routes`] - HTTP handlers and the router
//! - [`services`] - Registration, login, items and restocks

use std::sync::Arc;

use stockpile_core::{Clock, RestockQuota};
use stockpile_db::Database;

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;

pub use routes::router;

use crate::auth::{CredentialVault, TokenIssuer};

/// Shared application state, one per process.
pub struct AppState {
    pub db: Database,
    pub tokens: TokenIssuer,
    pub vault: CredentialVault,
    pub clock: Arc<dyn Clock>,
    pub quota: RestockQuota,
}

impl AppState {
    /// State with the default restock quota.
    pub fn new(
        db: Database,
        tokens: TokenIssuer,
        vault: CredentialVault,
        clock: Arc<dyn Clock>,
    ) -> Self {
        AppState {
            db,
            tokens,
            vault,
            clock,
            quota: RestockQuota::default(),
        }
    }
}
