//! # Validation Module
//!
//! Input validation for the values customers and employees type in.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console prompt                                               │
//! │  └── Re-prompts on blank input / non-numeric menu choices              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field rules before any storage call                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE (contact_number, email)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gameshop_core::validation::{validate_contact_number, validate_name};
//!
//! assert!(validate_name("Ana Lopez").is_ok());
//! assert!(validate_contact_number("+34 600-123-456").is_ok());
//! assert!(validate_contact_number("call me").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_CONTACT_LEN: usize = 20;
const MAX_EMAIL_LEN: usize = 254;
const MAX_PASSWORD_LEN: usize = 128;
const MAX_TITLE_LEN: usize = 200;

// =============================================================================
// Helpers
// =============================================================================

fn required<'a>(field: &str, value: &'a str, max: usize) -> ValidationResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value)
}

// =============================================================================
// People
// =============================================================================

/// Validates a customer or employee name.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    required("name", name, MAX_NAME_LEN).map(|_| ())
}

/// Validates a contact (phone) number.
///
/// ## Rules
/// - Must not be blank
/// - Digits, spaces, `+` and `-` only
/// - At least 3 digits
pub fn validate_contact_number(contact: &str) -> ValidationResult<()> {
    let contact = required("contact number", contact, MAX_CONTACT_LEN)?;

    if !contact
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "contact number".to_string(),
            reason: "must contain only digits, spaces, '+' and '-'".to_string(),
        });
    }

    if contact.chars().filter(|c| c.is_ascii_digit()).count() < 3 {
        return Err(ValidationError::TooShort {
            field: "contact number".to_string(),
            min: 3,
        });
    }

    Ok(())
}

/// Validates an employee email. Only the shape `local@domain` is checked.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = required("email", email, MAX_EMAIL_LEN)?;

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        }),
    }
}

/// Validates a password before it is hashed. Surrounding whitespace counts.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Catalogue
// =============================================================================

pub fn validate_title(title: &str) -> ValidationResult<()> {
    required("title", title, MAX_TITLE_LEN).map(|_| ())
}

pub fn validate_genre(genre: &str) -> ValidationResult<()> {
    required("genre", genre, MAX_NAME_LEN).map(|_| ())
}

/// Zero is allowed (free titles), negatives are not.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
