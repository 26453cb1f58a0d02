//! # Pricing Policy
//!
//! Rental and sale prices. Pure functions, no side effects.
//!
//! ## Duration Tiers
//! ```text
//! ┌───────────┬──────┬────────────┬─────────────────────────────────────┐
//! │ Tier      │ Days │ Multiplier │ 10.00/day game                      │
//! ├───────────┼──────┼────────────┼─────────────────────────────────────┤
//! │ daily     │    1 │ 1.00       │ 10.00 × 1  × 1.00 = 10.00           │
//! │ weekly    │    7 │ 0.85       │ 10.00 × 7  × 0.85 = 59.50           │
//! │ monthly   │   30 │ 0.70       │ 10.00 × 30 × 0.70 = 210.00          │
//! └───────────┴──────┴────────────┴─────────────────────────────────────┘
//! ```
//!
//! The multiplier is held in basis points so `unit × days × bps` stays exact
//! in integers; rounding to the cent happens once, in [`Money::apply_bps`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::Game;

// =============================================================================
// Rental Duration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalDuration {
    Daily,
    Weekly,
    Monthly,
}

impl RentalDuration {
    pub const ALL: [RentalDuration; 3] = [
        RentalDuration::Daily,
        RentalDuration::Weekly,
        RentalDuration::Monthly,
    ];

    /// Length of the rental in days.
    pub const fn days(&self) -> i64 {
        match self {
            RentalDuration::Daily => 1,
            RentalDuration::Weekly => 7,
            RentalDuration::Monthly => 30,
        }
    }

    /// Price multiplier in basis points (10000 = ×1.00).
    pub const fn multiplier_bps(&self) -> u32 {
        match self {
            RentalDuration::Daily => 10_000,
            RentalDuration::Weekly => 8_500,
            RentalDuration::Monthly => 7_000,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            RentalDuration::Daily => "daily",
            RentalDuration::Weekly => "weekly",
            RentalDuration::Monthly => "monthly",
        }
    }

    /// Menu label ("1 week").
    pub const fn label(&self) -> &'static str {
        match self {
            RentalDuration::Daily => "1 day",
            RentalDuration::Weekly => "1 week",
            RentalDuration::Monthly => "1 month",
        }
    }
}

impl fmt::Display for RentalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RentalDuration {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RentalDuration::Daily),
            "weekly" => Ok(RentalDuration::Weekly),
            "monthly" => Ok(RentalDuration::Monthly),
            _ => Err(CoreError::InvalidDuration(s.to_string())),
        }
    }
}

// =============================================================================
// Price Calculations
// =============================================================================

/// `unit price × days × multiplier`, rounded half up to the cent.
pub fn rental_price(game: &Game, duration: RentalDuration) -> Money {
    game.price()
        .multiply_quantity(duration.days())
        .apply_bps(duration.multiplier_bps())
}

/// The listed unit price.
pub fn sale_price(game: &Game) -> Money {
    game.price()
}

// =============================================================================
// Unit Tests
// =============================================================================
