//! # Domain Types
//!
//! Core domain types used throughout the game shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Game       │   │    Employee     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  contact_number │   │  title, genre   │   │  email          │       │
//! │  │  password_hash  │   │  platform       │   │  password_hash  │       │
//! │  │  loyalty_points │   │  listing        │   └─────────────────┘       │
//! │  └────────┬────────┘   │  price_cents    │                             │
//! │           │            │  is_available   │                             │
//! │           │            └────────┬────────┘                             │
//! │           │                     │                                      │
//! │           ▼                     ▼                                      │
//! │  ┌─────────────────────────────────────────┐   ┌─────────────────┐     │
//! │  │               Rental                    │   │      Sale       │     │
//! │  │  customer_id, game_id, platform         │   │  customer_id    │     │
//! │  │  rental_date ≤ return_date (due)        │   │  game_id        │     │
//! │  │  is_returned, price_cents               │   │  price_cents    │     │
//! │  └─────────────────────────────────────────┘   └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::Money;
use crate::platform::Platform;

/// Generates a fresh entity id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Listing Type
// =============================================================================

/// Whether a game is offered for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum ListingType {
    /// Priced per day.
    Rental,
    /// Priced per copy.
    Sale,
}

impl ListingType {
    pub const fn code(&self) -> &'static str {
        match self {
            ListingType::Rental => "RENTAL",
            ListingType::Sale => "SALE",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Game
// =============================================================================

/// A catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub genre: String,
    /// `None` when the stored platform code is not recognised.
    pub platform: Option<Platform>,
    pub listing: ListingType,
    /// Per day for rentals, per copy for sales.
    pub price_cents: i64,
    pub is_available: bool,
}

impl Game {
    /// Creates an available game with a fresh id.
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        platform: Platform,
        listing: ListingType,
        price: Money,
    ) -> Self {
        Game {
            id: new_id(),
            title: title.into(),
            genre: genre.into(),
            platform: Some(platform),
            listing,
            price_cents: price.cents(),
            is_available: true,
        }
    }

    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Platform label for display ("unknown" when unrecognised).
    pub fn platform_label(&self) -> String {
        self.platform
            .map(|p| p.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

// =============================================================================
// Customer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// Unique login key.
    pub contact_number: String,
    /// Opaque credential (argon2 PHC string).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Never negative.
    pub loyalty_points: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Employee
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

// =============================================================================
// Rental
// =============================================================================

/// A rental agreement between a customer and a game.
///
/// ## Invariants
/// - `return_date >= rental_date`
/// - At most one rental with `is_returned == false` per game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub id: String,
    pub customer_id: String,
    pub game_id: String,
    /// The platform the customer asked for.
    pub platform: Option<Platform>,
    pub rental_date: NaiveDate,
    /// Due date.
    pub return_date: NaiveDate,
    pub is_returned: bool,
    /// Final price paid, after any loyalty discount.
    pub price_cents: i64,
}

impl Rental {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// A return on `today` earns the on-time bonus when `today <= return_date`.
    pub fn is_on_time(&self, today: NaiveDate) -> bool {
        today <= self.return_date
    }
}

/// A rental joined with the title of the rented game, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalDetails {
    pub rental: Rental,
    pub game_title: String,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed purchase. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub customer_id: String,
    pub game_id: String,
    pub sale_date: NaiveDate,
    pub price_cents: i64,
}

impl Sale {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Revenue
// =============================================================================

/// Shop-wide totals shown to employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub sales_revenue: Money,
    pub rental_revenue: Money,
    pub sales_count: i64,
    pub rentals_count: i64,
}

impl RevenueSummary {
    pub fn total_revenue(&self) -> Money {
        self.sales_revenue + self.rental_revenue
    }

    pub fn transactions_count(&self) -> i64 {
        self.sales_count + self.rentals_count
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
