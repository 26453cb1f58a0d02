//! # Inventory Availability Gate
//!
//! A game is either on the shelf or out with a customer.
//!
//! ```text
//!            commit_rental / commit_sale
//!   available ─────────────────────────────► unavailable
//!       ▲                                         │
//!       └──────────────── commit_return ──────────┘
//! ```
//!
//! The setters are idempotent. The transaction orchestrator flips the
//! stored flag through [`GameStore::set_availability`] only after the
//! rental, sale or return write it belongs to has succeeded.
//!
//! [`GameStore::set_availability`]: crate::store::GameStore::set_availability

use crate::types::Game;

pub fn mark_unavailable(game: &mut Game) {
    game.is_available = false;
}

pub fn mark_available(game: &mut Game) {
    game.is_available = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::platform::Platform;
    use crate::types::ListingType;

    #[test]
    fn test_setters_are_idempotent() {
        let mut game = Game::new("Zelda", "Adventure", Platform::Ps5, ListingType::Sale, Money::zero());

        mark_unavailable(&mut game);
        mark_unavailable(&mut game);
        assert!(!game.is_available);

        mark_available(&mut game);
        mark_available(&mut game);
        assert!(game.is_available);
    }
}
