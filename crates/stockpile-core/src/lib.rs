//! # stockpile-core: Pure Business Logic for Stockpile
//!
//! This crate holds the rules of the restock workflow as pure functions and
//! plain data. Nothing in here touches a database, a socket or the system
//! clock directly.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │   AuthenticationGate ──► AuthorizationGate ──► RestockService   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockpile-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   quota   │  │ validation│  │   clock   │  │   │
//! │  │   │   Item    │  │  window   │  │  bounds   │  │  System   │  │   │
//! │  │   │  Restock  │  │  max = 3  │  │  email    │  │  Manual   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockpile-db (Database Layer)                   │   │
//! │  │         SQLite queries, migrations, atomic restock unit         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Role, User, InventoryItem, RestockEvent)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation (restock bounds, credentials)
//! - [`quota`] - Rolling-window restock quota policy
//! - [`clock`] - Time source abstraction
//!
//! ## Example Usage
//!
//! ```rust
//! use stockpile_core::quota::RestockQuota;
//! use stockpile_core::validation::validate_restock_quantity;
//!
//! // Bounds are exclusive on both ends
//! assert!(validate_restock_quantity(50).is_ok());
//! assert!(validate_restock_quantity(10).is_err());
//!
//! // Three restocks in the window exhaust the quota
//! let quota = RestockQuota::default();
//! assert!(!quota.is_reached(2));
//! assert!(quota.is_reached(3));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod quota;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, ValidationError};
pub use quota::RestockQuota;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest restock quantity, exclusive.
///
/// A restock of exactly this many units is rejected.
pub const MIN_RESTOCK_QUANTITY: i64 = 10;

/// Largest restock quantity, exclusive.
pub const MAX_RESTOCK_QUANTITY: i64 = 1000;

/// Restocks allowed per item inside one quota window.
pub const MAX_RESTOCKS_PER_WINDOW: i64 = 3;

/// Length of the trailing quota window, in hours.
pub const RESTOCK_WINDOW_HOURS: i64 = 24;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;
