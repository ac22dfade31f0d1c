//! # API Error Type
//!
//! The single boundary translator between domain failures and HTTP.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockpile                              │
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │  CoreError ────────┤                                                    │
//! │  DbError ──────────┼──► ApiError { kind, message } ──► IntoResponse     │
//! │  TokenError ───────┤                                       │            │
//! │  VaultError ───────┘                                       ▼            │
//! │                                        status = kind.status()           │
//! │                                        body   = { code, message }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal faults are logged here and replaced by a generic message, so no
//! SQL text or hash parameters ever reach a client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use stockpile_core::{CoreError, ValidationError};
use stockpile_db::DbError;

use crate::auth::password::VaultError;
use crate::auth::token::TokenError;

/// Message returned for every internal fault.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Undecodable body, bad path or query parameter (400)
    BadRequest,

    /// Input failed a business rule (400)
    Validation,

    /// Missing, malformed or expired credential (401)
    Unauthorized,

    /// Valid credential, role not allowed (403)
    Forbidden,

    /// Referenced entity absent (404)
    NotFound,

    /// Uniqueness violation (409)
    Conflict,

    /// Restock quota for the item is used up (429)
    QuotaExceeded,

    /// Storage, signing or unexpected fault (500)
    Internal,
}

impl ErrorKind {
    /// HTTP status for this kind.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error returned from handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Wire shape of an error response.
///
/// ```json
/// { "code": 429, "message": "Item quota reached" }
/// ```
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: u16,
    message: &'a str,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::BadRequest, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::Validation, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden() -> Self {
        ApiError::new(ErrorKind::Forbidden, "Forbidden")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::Conflict, message)
    }

    /// Creates an internal error. The detail is logged, never returned.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal error");
        ApiError::new(ErrorKind::Internal, INTERNAL_MESSAGE)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            code: status.as_u16(),
            message: &self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(_) => ApiError::not_found("Item not found"),
            CoreError::QuotaExceeded { .. } => {
                ApiError::new(ErrorKind::QuotaExceeded, err.to_string())
            }
            CoreError::UnknownRole(role) => ApiError::internal(format!("unknown role {role}")),
            CoreError::Validation(inner) => inner.into(),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                tracing::debug!(%entity, %id, "Entity not found");
                match entity.as_str() {
                    "InventoryItem" => ApiError::not_found("Item not found"),
                    "User" => ApiError::not_found("User not found"),
                    _ => ApiError::not_found(format!("{entity} not found")),
                }
            }
            DbError::UniqueViolation { field, .. } => {
                if field.starts_with("users.email") {
                    ApiError::conflict("User already exists")
                } else {
                    ApiError::conflict("Record already exists")
                }
            }
            DbError::CheckViolation { constraint } => match constraint.as_str() {
                "restock_quantity_bounds" => ApiError::validation(
                    ValidationError::OutOfRange {
                        field: "Quantity".to_string(),
                        min: stockpile_core::MIN_RESTOCK_QUANTITY,
                        max: stockpile_core::MAX_RESTOCK_QUANTITY,
                    }
                    .to_string(),
                ),
                "item_quantity_non_negative" => {
                    ApiError::validation("Quantity must not be negative")
                }
                _ => ApiError::validation("Invalid input"),
            },
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!(%message, "Foreign key violation");
                ApiError::not_found("Referenced record not found")
            }
            other => ApiError::internal(other),
        }
    }
}

/// Converts token errors to API errors.
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => ApiError::internal(err),
            TokenError::Invalid(_) | TokenError::Expired => {
                tracing::warn!(error = %err, "Rejected token");
                ApiError::unauthorized("Invalid or expired token")
            }
        }
    }
}

/// Converts credential vault errors to API errors.
impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        ApiError::internal(err)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
