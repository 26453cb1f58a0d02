//! # Repository Module
//!
//! One repository per table, each implementing the matching store trait
//! from gameshop-core.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShopService                                                           │
//! │       │                                                                 │
//! │       │  self.rentals.insert(&rental)     (Arc<dyn RentalStore>)       │
//! │       ▼                                                                 │
//! │  impl RentalStore for RentalRepository                                 │
//! │       │                                                                 │
//! │       │  RentalRepository::insert → DbResult<()>                       │
//! │       │  DbError → CoreError                                           │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inherent methods return [`DbResult`](crate::error::DbResult) and can be
//! used directly (the `seed` binary does); the trait impls fold errors into
//! `CoreError`.
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`] - Accounts and loyalty balances
//! - [`GameRepository`] - Catalogue and availability
//! - [`RentalRepository`] - Rental agreements and returns
//! - [`SaleRepository`] - Purchases
//! - [`EmployeeRepository`] - Staff accounts

pub mod customer;
pub mod employee;
pub mod game;
pub mod rental;
pub mod sale;

pub use customer::CustomerRepository;
pub use employee::EmployeeRepository;
pub use game::GameRepository;
pub use rental::RentalRepository;
pub use sale::SaleRepository;
