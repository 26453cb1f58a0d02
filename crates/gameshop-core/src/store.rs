//! # Storage Capabilities
//!
//! One trait per table. The policy core only ever talks to storage through
//! these; gameshop-db implements them over SQLite and tests implement them
//! in memory.
//!
//! ```text
//! ┌─────────────────────┐        ┌──────────────────────────────────────┐
//! │   ShopService /     │        │  gameshop-db                          │
//! │   AccountService    │        │                                      │
//! │                     │ trait  │  CustomerRepository ─┐               │
//! │  Arc<dyn ...Store> ─┼───────►│  GameRepository      ├─► SqlitePool  │
//! │                     │        │  RentalRepository    │               │
//! └─────────────────────┘        │  SaleRepository      │               │
//!                                │  EmployeeRepository ─┘               │
//!                                └──────────────────────────────────────┘
//! ```
//!
//! Every method is a single statement; nothing here spans a transaction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Customer, Employee, Game, ListingType, Rental, RentalDetails, Sale};

/// Row count and summed price of a ledger table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub count: i64,
    pub amount: Money,
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Customer>>;

    async fn find_by_contact(&self, contact_number: &str) -> CoreResult<Option<Customer>>;

    async fn insert(&self, customer: &Customer) -> CoreResult<()>;

    /// Overwrites the stored balance.
    async fn update_loyalty_points(&self, id: &str, points: i64) -> CoreResult<()>;

    /// All customers ordered by name.
    async fn list_all(&self) -> CoreResult<Vec<Customer>>;
}

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Game>>;

    /// Available games of one listing type, ordered by title.
    async fn list_available(&self, listing: ListingType) -> CoreResult<Vec<Game>>;

    async fn insert(&self, game: &Game) -> CoreResult<()>;

    async fn set_availability(&self, id: &str, available: bool) -> CoreResult<()>;
}

#[async_trait]
pub trait RentalStore: Send + Sync {
    async fn insert(&self, rental: &Rental) -> CoreResult<()>;

    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Rental>>;

    /// Unreturned rentals of one customer, oldest first.
    async fn list_active_for_customer(&self, customer_id: &str) -> CoreResult<Vec<RentalDetails>>;

    /// Every rental of one customer, newest first.
    async fn list_for_customer(&self, customer_id: &str) -> CoreResult<Vec<RentalDetails>>;

    /// Flags the rental returned. Returns `false` when no unreturned rental
    /// with that id existed.
    async fn mark_returned(&self, id: &str) -> CoreResult<bool>;

    async fn totals(&self) -> CoreResult<LedgerTotals>;
}

#[async_trait]
pub trait SaleStore: Send + Sync {
    async fn insert(&self, sale: &Sale) -> CoreResult<()>;

    async fn totals(&self) -> CoreResult<LedgerTotals>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Employee>>;

    async fn insert(&self, employee: &Employee) -> CoreResult<()>;
}

/// The full set of stores a front end needs, handed to the services.
#[derive(Clone)]
pub struct Stores {
    pub customers: Arc<dyn CustomerStore>,
    pub games: Arc<dyn GameStore>,
    pub rentals: Arc<dyn RentalStore>,
    pub sales: Arc<dyn SaleStore>,
    pub employees: Arc<dyn EmployeeStore>,
}

// =============================================================================
// In-Memory Stores (tests)
// =============================================================================

#[cfg(test)]
pub(crate) mod memory {
    //! Hash-map backed stores with switches for failure injection.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::error::CoreError;

    #[derive(Default)]
    pub struct MemoryStore {
        pub customers: Mutex<HashMap<String, Customer>>,
        pub games: Mutex<HashMap<String, Game>>,
        pub rentals: Mutex<Vec<Rental>>,
        pub sales: Mutex<Vec<Sale>>,
        pub employees: Mutex<Vec<Employee>>,
        pub fail_rental_insert: AtomicBool,
        pub fail_sale_insert: AtomicBool,
        pub fail_set_availability: AtomicBool,
        pub fail_points_update: AtomicBool,
    }

    fn injected(flag: &AtomicBool, what: &str) -> CoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(CoreError::Storage(format!("injected failure: {what}")));
        }
        Ok(())
    }

    impl MemoryStore {
        pub fn new() -> Arc<Self> {
            Arc::new(MemoryStore::default())
        }

        pub fn stores(self: &Arc<Self>) -> Stores {
            Stores {
                customers: self.clone(),
                games: self.clone(),
                rentals: self.clone(),
                sales: self.clone(),
                employees: self.clone(),
            }
        }

        pub fn add_game(&self, game: Game) {
            self.games.lock().unwrap().insert(game.id.clone(), game);
        }

        pub fn add_customer(&self, customer: Customer) {
            self.customers
                .lock()
                .unwrap()
                .insert(customer.id.clone(), customer);
        }

        pub fn game(&self, id: &str) -> Game {
            self.games.lock().unwrap()[id].clone()
        }

        pub fn customer(&self, id: &str) -> Customer {
            self.customers.lock().unwrap()[id].clone()
        }

        pub fn fail(&self, flag: &AtomicBool) {
            flag.store(true, Ordering::SeqCst);
        }

        fn details(&self, rental: &Rental) -> RentalDetails {
            let game_title = self
                .games
                .lock()
                .unwrap()
                .get(&rental.game_id)
                .map(|g| g.title.clone())
                .unwrap_or_default();
            RentalDetails {
                rental: rental.clone(),
                game_title,
            }
        }
    }

    #[async_trait]
    impl CustomerStore for MemoryStore {
        async fn get_by_id(&self, id: &str) -> CoreResult<Option<Customer>> {
            Ok(self.customers.lock().unwrap().get(id).cloned())
        }

        async fn find_by_contact(&self, contact_number: &str) -> CoreResult<Option<Customer>> {
            Ok(self
                .customers
                .lock()
                .unwrap()
                .values()
                .find(|c| c.contact_number == contact_number)
                .cloned())
        }

        async fn insert(&self, customer: &Customer) -> CoreResult<()> {
            self.add_customer(customer.clone());
            Ok(())
        }

        async fn update_loyalty_points(&self, id: &str, points: i64) -> CoreResult<()> {
            injected(&self.fail_points_update, "update_loyalty_points")?;
            let mut customers = self.customers.lock().unwrap();
            let customer = customers
                .get_mut(id)
                .ok_or_else(|| CoreError::not_found("Customer", id))?;
            customer.loyalty_points = points;
            Ok(())
        }

        async fn list_all(&self) -> CoreResult<Vec<Customer>> {
            let mut all: Vec<_> = self.customers.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(all)
        }
    }

    #[async_trait]
    impl GameStore for MemoryStore {
        async fn get_by_id(&self, id: &str) -> CoreResult<Option<Game>> {
            Ok(self.games.lock().unwrap().get(id).cloned())
        }

        async fn list_available(&self, listing: ListingType) -> CoreResult<Vec<Game>> {
            let mut games: Vec<_> = self
                .games
                .lock()
                .unwrap()
                .values()
                .filter(|g| g.is_available && g.listing == listing)
                .cloned()
                .collect();
            games.sort_by(|a, b| a.title.cmp(&b.title));
            Ok(games)
        }

        async fn insert(&self, game: &Game) -> CoreResult<()> {
            self.add_game(game.clone());
            Ok(())
        }

        async fn set_availability(&self, id: &str, available: bool) -> CoreResult<()> {
            injected(&self.fail_set_availability, "set_availability")?;
            let mut games = self.games.lock().unwrap();
            let game = games
                .get_mut(id)
                .ok_or_else(|| CoreError::not_found("Game", id))?;
            game.is_available = available;
            Ok(())
        }
    }

    #[async_trait]
    impl RentalStore for MemoryStore {
        async fn insert(&self, rental: &Rental) -> CoreResult<()> {
            injected(&self.fail_rental_insert, "insert rental")?;
            self.rentals.lock().unwrap().push(rental.clone());
            Ok(())
        }

        async fn get_by_id(&self, id: &str) -> CoreResult<Option<Rental>> {
            Ok(self
                .rentals
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn list_active_for_customer(&self, customer_id: &str) -> CoreResult<Vec<RentalDetails>> {
            let rentals = self.rentals.lock().unwrap().clone();
            Ok(rentals
                .iter()
                .filter(|r| r.customer_id == customer_id && !r.is_returned)
                .map(|r| self.details(r))
                .collect())
        }

        async fn list_for_customer(&self, customer_id: &str) -> CoreResult<Vec<RentalDetails>> {
            let rentals = self.rentals.lock().unwrap().clone();
            Ok(rentals
                .iter()
                .rev()
                .filter(|r| r.customer_id == customer_id)
                .map(|r| self.details(r))
                .collect())
        }

        async fn mark_returned(&self, id: &str) -> CoreResult<bool> {
            let mut rentals = self.rentals.lock().unwrap();
            match rentals.iter_mut().find(|r| r.id == id && !r.is_returned) {
                Some(rental) => {
                    rental.is_returned = true;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn totals(&self) -> CoreResult<LedgerTotals> {
            let rentals = self.rentals.lock().unwrap();
            Ok(LedgerTotals {
                count: rentals.len() as i64,
                amount: rentals.iter().map(|r| r.price()).sum(),
            })
        }
    }

    #[async_trait]
    impl SaleStore for MemoryStore {
        async fn insert(&self, sale: &Sale) -> CoreResult<()> {
            injected(&self.fail_sale_insert, "insert sale")?;
            self.sales.lock().unwrap().push(sale.clone());
            Ok(())
        }

        async fn totals(&self) -> CoreResult<LedgerTotals> {
            let sales = self.sales.lock().unwrap();
            Ok(LedgerTotals {
                count: sales.len() as i64,
                amount: sales.iter().map(|s| s.price()).sum(),
            })
        }
    }

    #[async_trait]
    impl EmployeeStore for MemoryStore {
        async fn find_by_email(&self, email: &str) -> CoreResult<Option<Employee>> {
            Ok(self
                .employees
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn insert(&self, employee: &Employee) -> CoreResult<()> {
            self.employees.lock().unwrap().push(employee.clone());
            Ok(())
        }
    }
}
