//! # Validation Module
//!
//! Input validation for restocks, items and credentials.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (apps/api)                                   │
//! │  └── Path/body decoding → 400 "Invalid itemID" / "Invalid input"       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business bounds, required fields, email format                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (quantity > 10 AND quantity < 1000) on restocks             │
//! │  ├── UNIQUE email / role name                                          │
//! │  └── Foreign keys                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_RESTOCK_QUANTITY, MIN_PASSWORD_LENGTH, MIN_RESTOCK_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Restock
// =============================================================================

/// Validates a restock quantity.
///
/// ## Rules
/// Both bounds are exclusive: `10 < qty < 1000`. A request for exactly 10
/// or exactly 1000 units is rejected.
///
/// ## Example
/// ```rust
/// use stockpile_core::validation::validate_restock_quantity;
///
/// assert!(validate_restock_quantity(11).is_ok());
/// assert!(validate_restock_quantity(999).is_ok());
/// assert!(validate_restock_quantity(1000).is_err());
/// ```
pub fn validate_restock_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= MIN_RESTOCK_QUANTITY || qty >= MAX_RESTOCK_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "Quantity".to_string(),
            min: MIN_RESTOCK_QUANTITY,
            max: MAX_RESTOCK_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Inventory Item
// =============================================================================

/// Validates an item name: required, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "Name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "Name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Credentials
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Required
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "Email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "Email".to_string(),
        reason: "Invalid email format".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a new password: required, at least [`MIN_PASSWORD_LENGTH`]
/// characters.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "Password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Validates login input: both fields present.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }

    Ok(())
}

/// Validates a registration form.
///
/// Email and password must both be present, the confirmation must equal the
/// password, then the individual field rules apply.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }

    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    validate_email(email)?;
    validate_password(password)
}

// =============================================================================
// Unit Tests
// =============================================================================
