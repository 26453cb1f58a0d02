//! # Money Module
//!
//! Provides the `Money` type for prices, discounts and revenue totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Weekly rental of a 9.99/day game in floating point:                   │
//! │    9.99 × 7 × 0.85 = 59.440499999999995  ❌                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                            │
//! │    999 × 7 × 8500 = 59_440_500   (exact)                               │
//! │    (59_440_500 + 5000) / 10000 = 5944 cents = 59.44                    │
//! │    Rounded exactly once, at the end                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gameshop_core::money::Money;
//!
//! let per_day = Money::from_cents(1000);        // 10.00
//! let week = per_day.multiply_quantity(7);      // 70.00
//! let tiered = week.apply_bps(8500);            // 59.50
//! assert_eq!(tiered.cents(), 5950);
//! assert_eq!(tiered.display_with("€"), "59.50€");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// One whole unit expressed in basis points.
pub const BPS_SCALE: i64 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Game.price_cents ──► pricing::rental_price ──► Quote.base_price
///                                                    │
///                  loyalty::apply_discount ◄─────────┘
///                          │
///                          ▼
///               Rental.price_cents / Sale.price_cents ──► RevenueSummary
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ```rust
    /// use gameshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(59, 50).cents(), 5950);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a whole quantity (days, units).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Scales by a factor given in basis points, rounding half up to the cent.
    ///
    /// ## Implementation
    /// `(amount * bps + 5000) / 10000` computed in i128.
    /// ```rust
    /// use gameshop_core::money::Money;
    ///
    /// // 70.00 × 0.85
    /// assert_eq!(Money::from_cents(7000).apply_bps(8500).cents(), 5950);
    /// // 69.93 × 0.85 = 59.4405 → 59.44
    /// assert_eq!(Money::from_cents(6993).apply_bps(8500).cents(), 5944);
    /// ```
    pub fn apply_bps(&self, bps: u32) -> Money {
        let half = BPS_SCALE as i128 / 2;
        let scaled = (self.0 as i128 * bps as i128 + half) / BPS_SCALE as i128;
        Money::from_cents(scaled as i64)
    }

    /// Subtracts, flooring the result at zero.
    ///
    /// ```rust
    /// use gameshop_core::money::Money;
    ///
    /// let price = Money::from_cents(500);
    /// assert_eq!(price.saturating_sub(Money::from_cents(2000)), Money::zero());
    /// ```
    #[inline]
    pub fn saturating_sub(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Formats with two decimals and the currency symbol appended.
    ///
    /// ```rust
    /// use gameshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(5950).display_with("€"), "59.50€");
    /// assert_eq!(Money::from_cents(5).display_with("$"), "0.05$");
    /// ```
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{self}{symbol}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal amount, no symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
