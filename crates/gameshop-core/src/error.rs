//! # Error Types
//!
//! Domain-specific error types for gameshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gameshop-core errors (this file)                                      │
//! │  ├── CoreError        - Policy and transaction errors                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  gameshop-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                       (becomes CoreError::Storage at the store traits) │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── ShopError        - What the menu loop prints                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ShopError → Console               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Policy and transaction errors.
///
/// Every variant is recoverable at the menu level: the console prints the
/// message and returns the user to the menu they were in.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Debit of more loyalty points than the customer holds.
    ///
    /// ## When This Occurs
    /// - `loyalty::debit` called with `points > balance`
    /// - A stale customer value offered points that were spent elsewhere
    #[error("Insufficient loyalty points: balance {balance}, requested {requested}")]
    InsufficientPoints { balance: i64, requested: i64 },

    /// Rental duration tier name not recognised.
    #[error("Invalid rental duration: '{0}' (expected daily, weekly or monthly)")]
    InvalidDuration(String),

    /// Due date falls outside the supported calendar.
    #[error("Return date out of range: {days} days after {from}")]
    DateOutOfRange { from: NaiveDate, days: i64 },

    /// Game is no longer available for rent or sale.
    ///
    /// ## When This Occurs
    /// ```text
    /// Quote game "Halo"        (available)
    ///      │
    ///      ▼
    /// Someone else rents it    (unavailable)
    ///      │
    ///      ▼
    /// commit_rental re-checks  → GameUnavailable("Halo")
    /// ```
    #[error("Game is not available: {0}")]
    GameUnavailable(String),

    /// Rental cannot be returned by this customer.
    ///
    /// ## When This Occurs
    /// - Rental id doesn't exist
    /// - Rental belongs to another customer
    /// - Rental was already returned
    #[error("Rental not found or already returned: {0}")]
    RentalNotFound(String),

    /// Entity lookup failed.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Login failed (unknown account or wrong password).
    #[error("Invalid credentials")]
    AuthenticationFailed,

    /// Contact number is already registered to another customer.
    #[error("A customer with contact number '{0}' already exists")]
    DuplicateContact(String),

    /// Password hashing failed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// Storage capability failed (database unreachable, constraint, etc.).
    ///
    /// Raised before or by the first write of an operation, so nothing was
    /// stored.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The rental, sale or return was stored but a later write failed.
    ///
    /// ## When This Occurs
    /// ```text
    /// INSERT sale              ok  (record exists)
    ///      │
    ///      ▼
    /// game → unavailable       ok
    ///      │
    ///      ▼
    /// UPDATE loyalty balance   fails → PartialCommit { record: "Sale", .. }
    /// ```
    /// Availability or the loyalty balance may not reflect the record yet.
    #[error("{record} {id} was recorded but a follow-up update failed: {reason}")]
    PartialCommit {
        record: String,
        id: String,
        reason: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Wraps a failure that happened after `record` was stored.
    pub fn partial_commit(record: impl Into<String>, id: impl Into<String>, cause: CoreError) -> Self {
        CoreError::PartialCommit {
            record: record.into(),
            id: id.into(),
            reason: cause.to_string(),
        }
    }

    /// Whether the error came from the storage layer rather than from policy.
    pub fn is_storage(&self) -> bool {
        matches!(self, CoreError::Storage(_) | CoreError::PartialCommit { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any storage call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (contact number with letters, email without '@').
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPoints {
            balance: 40,
            requested: 100,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient loyalty points: balance 40, requested 100"
        );

        let err = CoreError::InvalidDuration("fortnight".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid rental duration: 'fortnight' (expected daily, weekly or monthly)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "contact number".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(!core_err.is_storage());
    }

    #[test]
    fn test_partial_commit_keeps_record_and_cause() {
        let err = CoreError::partial_commit("Sale", "s-1", CoreError::Storage("disk full".into()));
        assert_eq!(
            err.to_string(),
            "Sale s-1 was recorded but a follow-up update failed: Storage error: disk full"
        );
        assert!(err.is_storage());
    }

    #[test]
    fn test_not_found_helper() {
        let err = CoreError::not_found("Game", "g-1");
        assert_eq!(err.to_string(), "Game not found: g-1");
    }
}
