//! # Shop Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  sqlx::Error ──► DbError ──► CoreError ──► ShopError ──► menu loop      │
//! │                                               ▲              │          │
//! │  ConsoleError ────────────────────────────────┘              ▼          │
//! │                                                   console.error(msg)    │
//! │                                                   and re-prompt         │
//! │                                                                         │
//! │  Only InputClosed escapes the menu loop: it ends the process cleanly.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage and credential failures are logged in full and shown as a
//! generic message. A plain storage failure means nothing was written; a
//! partial commit says the record exists.

use gameshop_core::CoreError;

use crate::console::ConsoleError;

/// Error shown to the person at the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Entity not found
    NotFound,

    /// A field failed validation
    ValidationError,

    /// Menu input that is not one of the listed options
    InvalidChoice,

    /// Loyalty balance too low
    InsufficientPoints,

    /// Game already rented or sold
    Unavailable,

    /// Wrong contact/email or password
    AuthenticationFailed,

    /// Contact number already registered
    DuplicateContact,

    /// Persistence failed
    StorageError,

    /// Anything else
    Internal,

    /// stdin closed or the terminal went away
    InputClosed,
}

pub type ShopResult<T> = Result<T, ShopError>;

impl ShopError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ShopError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_choice() -> Self {
        ShopError::new(ErrorCode::InvalidChoice, "Invalid choice")
    }

    pub fn invalid_selection() -> Self {
        ShopError::new(ErrorCode::InvalidChoice, "Invalid selection")
    }

    pub fn is_input_closed(&self) -> bool {
        self.code == ErrorCode::InputClosed
    }
}

impl From<CoreError> for ShopError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InsufficientPoints { .. } => ErrorCode::InsufficientPoints,
            CoreError::InvalidDuration(_) => ErrorCode::InvalidChoice,
            CoreError::DateOutOfRange { .. } => ErrorCode::ValidationError,
            CoreError::GameUnavailable(_) => ErrorCode::Unavailable,
            CoreError::RentalNotFound(_) | CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::AuthenticationFailed => ErrorCode::AuthenticationFailed,
            CoreError::DuplicateContact(_) => ErrorCode::DuplicateContact,
            CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::Storage(e) => {
                tracing::error!("Storage operation failed: {}", e);
                return ShopError::new(
                    ErrorCode::StorageError,
                    "The shop database could not complete the operation. Nothing was changed.",
                );
            }
            CoreError::PartialCommit { record, id, reason } => {
                tracing::error!(record = %record, id = %id, "Follow-up write failed: {}", reason);
                return ShopError::new(
                    ErrorCode::StorageError,
                    format!(
                        "The {} was recorded, but game availability or loyalty points could not be updated. Please ask staff to check the account.",
                        record.to_lowercase()
                    ),
                );
            }
            CoreError::Credential(e) => {
                tracing::error!("Credential processing failed: {}", e);
                return ShopError::new(ErrorCode::Internal, "Could not process the password");
            }
        };

        ShopError::new(code, err.to_string())
    }
}

impl From<ConsoleError> for ShopError {
    fn from(err: ConsoleError) -> Self {
        if let ConsoleError::Io(e) = &err {
            tracing::warn!("Terminal I/O failed: {}", e);
        }
        ShopError::new(ErrorCode::InputClosed, err.to_string())
    }
}

impl std::fmt::Display for ShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ShopError {}
