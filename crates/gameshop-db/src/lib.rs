//! # gameshop-db: Database Layer for the Game Shop
//!
//! SQLite storage for customers, games, rentals, sales and employees, using
//! sqlx for async access. Every repository implements the matching store
//! trait from gameshop-core.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Game Shop Data Flow                              │
//! │                                                                         │
//! │  ShopService / AccountService (gameshop-core)                          │
//! │       │  Arc<dyn ...Store>                                              │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    gameshop-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ Customer  Game │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Rental    Sale │    │ 001_initial  │  │   │
//! │  │   │               │    │ Employee       │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/gameshop.db                                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gameshop_db::{Database, DbConfig};
//! use gameshop_core::ShopService;
//!
//! let db = Database::new(DbConfig::new("gameshop.db")).await?;
//! let shop = ShopService::new(&db.stores());
//! let games = shop.list_for_rent(Platform::Ps5).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{
    CustomerRepository, EmployeeRepository, GameRepository, RentalRepository, SaleRepository,
};
