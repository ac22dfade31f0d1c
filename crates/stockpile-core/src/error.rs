//! # Error Types
//!
//! Domain-specific error types for stockpile-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockpile-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockpile-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What clients see ({ code, message })           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Inventory item cannot be found.
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// The item has already been restocked the maximum number of times
    /// inside the trailing window.
    ///
    /// ## User Workflow
    /// ```text
    /// Restock item 7 (4th time today)
    ///      │
    ///      ▼
    /// count(restocks in last 24h) = 3
    ///      │
    ///      ▼
    /// QuotaExceeded { item_id: 7, max: 3 }
    ///      │
    ///      ▼
    /// Client sees 429 and retries later
    /// ```
    #[error("Item quota reached")]
    QuotaExceeded { item_id: i64, max: i64 },

    /// A role name that is not part of the fixed role set.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any storage access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value lies outside an exclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{reason}")]
    InvalidFormat { field: String, reason: String },

    /// Login or registration without both email and password.
    #[error("Email and Password are required")]
    MissingCredentials,

    /// Password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
