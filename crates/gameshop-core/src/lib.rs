//! # gameshop-core: Policy Core for the Game Shop
//!
//! Every rule about what a customer may rent or buy, what it costs and how
//! loyalty points move lives here, with no I/O of its own.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Game Shop Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Console front ends (apps/console)               │   │
//! │  │        customer self-service         employee counter           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ gameshop-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ platform  │  │  pricing  │  │  loyalty  │  │availability│ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │            ┌──────────────────┐   ┌──────────────┐             │   │
//! │  │            │   transaction    │   │   accounts   │             │   │
//! │  │            │   ShopService    │   │ AccountService│            │   │
//! │  │            └────────┬─────────┘   └──────┬───────┘             │   │
//! │  │                     └──── store traits ──┘                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 gameshop-db (SQLite repositories)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`platform`] - Platform catalogue and the compatibility predicate
//! - [`pricing`] - Rental duration tiers and prices
//! - [`loyalty`] - Point redemption, accrual and the return bonus
//! - [`availability`] - On-shelf / out flag transitions
//! - [`transaction`] - Rent, buy and return sequencing
//! - [`accounts`] - Registration and login
//! - [`store`] - Storage capability traits
//! - [`types`] - Domain types
//! - [`money`] - Integer-cent money
//!
//! ## Example Usage
//!
//! ```rust
//! use gameshop_core::{pricing, loyalty, Game, ListingType, Money, Platform};
//! use gameshop_core::pricing::RentalDuration;
//!
//! let game = Game::new("Halo", "Shooter", Platform::XboxOne, ListingType::Rental,
//!                      Money::from_cents(1000));
//!
//! let price = pricing::rental_price(&game, RentalDuration::Weekly);
//! assert_eq!(price.cents(), 5950);
//! assert_eq!(loyalty::points_earned(price), 595);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounts;
pub mod availability;
pub mod credentials;
pub mod error;
pub mod loyalty;
pub mod money;
pub mod platform;
pub mod pricing;
pub mod store;
pub mod transaction;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use accounts::{AccountService, MAX_LOGIN_ATTEMPTS};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use platform::{is_compatible, Platform, PlatformFamily};
pub use pricing::RentalDuration;
pub use store::{CustomerStore, EmployeeStore, GameStore, LedgerTotals, RentalStore, SaleStore, Stores};
pub use transaction::{ReturnOutcome, ShopService};
pub use types::*;
