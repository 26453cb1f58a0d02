//! # Loyalty Ledger
//!
//! Point redemption and accrual rules.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Redeem:  only whole blocks of 100 points                              │
//! │           100 points = 10.00 off                                       │
//! │           250 points → use 200 → 20.00 off (50 left)                   │
//! │                                                                         │
//! │  Earn:    10 points per 1.00 paid (floor)                              │
//! │           49.99 paid → 499 points                                      │
//! │                                                                         │
//! │  Bonus:   +50 points for returning a rental on or before its due date │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Points are redeemable in blocks of this size.
pub const REDEMPTION_BLOCK: i64 = 100;

/// Discount granted per redeemed point, in cents (100 points = 10.00).
pub const CENTS_PER_POINT: i64 = 10;

/// Cents paid per point earned (1.00 = 10 points).
pub const CENTS_PER_EARNED_POINT: i64 = 10;

/// Points credited for an on-time return.
pub const ON_TIME_RETURN_BONUS: i64 = 50;

// =============================================================================
// Loyalty Offer
// =============================================================================

/// What a customer could redeem right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyOffer {
    pub usable_points: i64,
    pub discount: Money,
}

impl LoyaltyOffer {
    /// Nothing to offer (fewer than 100 points).
    pub fn is_empty(&self) -> bool {
        self.usable_points == 0
    }
}

/// Largest redeemable multiple of 100 and the discount it buys.
pub fn available_discount(balance: i64) -> LoyaltyOffer {
    let usable_points = (balance.max(0) / REDEMPTION_BLOCK) * REDEMPTION_BLOCK;
    LoyaltyOffer {
        usable_points,
        discount: Money::from_cents(usable_points * CENTS_PER_POINT),
    }
}

/// Price after redeeming `usable_points`, floored at zero.
pub fn apply_discount(price: Money, usable_points: i64) -> Money {
    price.saturating_sub(Money::from_cents(usable_points.max(0) * CENTS_PER_POINT))
}

/// Points earned for paying `final_price`.
pub fn points_earned(final_price: Money) -> i64 {
    final_price.cents().max(0) / CENTS_PER_EARNED_POINT
}

pub fn credit(balance: i64, points: i64) -> i64 {
    balance + points.max(0)
}

/// Fails with `InsufficientPoints` rather than going negative.
pub fn debit(balance: i64, points: i64) -> CoreResult<i64> {
    if points > balance {
        return Err(CoreError::InsufficientPoints {
            balance,
            requested: points,
        });
    }
    Ok(balance - points.max(0))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_discount_blocks() {
        assert_eq!(
            available_discount(250),
            LoyaltyOffer { usable_points: 200, discount: Money::from_cents(2000) }
        );
        assert_eq!(
            available_discount(100),
            LoyaltyOffer { usable_points: 100, discount: Money::from_cents(1000) }
        );
        assert!(available_discount(99).is_empty());
        assert_eq!(available_discount(99).discount, Money::zero());
    }

    #[test]
    fn test_apply_discount_never_negative() {
        assert_eq!(apply_discount(Money::from_cents(2000), 100).cents(), 1000);
        assert_eq!(apply_discount(Money::from_cents(500), 200).cents(), 0);
        assert_eq!(apply_discount(Money::from_cents(500), 0).cents(), 500);
    }

    #[test]
    fn test_points_earned_floors() {
        assert_eq!(points_earned(Money::from_cents(4999)), 499);
        assert_eq!(points_earned(Money::from_cents(5950)), 595);
        assert_eq!(points_earned(Money::from_cents(9)), 0);
        assert_eq!(points_earned(Money::zero()), 0);
    }

    #[test]
    fn test_credit_and_debit() {
        assert_eq!(credit(10, ON_TIME_RETURN_BONUS), 60);
        assert_eq!(debit(150, 100).unwrap(), 50);
        assert_eq!(debit(100, 100).unwrap(), 0);

        let err = debit(40, 100).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientPoints { balance: 40, requested: 100 }
        ));
    }
}
