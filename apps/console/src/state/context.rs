//! # Application Context
//!
//! Services, configuration and the clock shared by every command.

use chrono::{Local, NaiveDate};

use gameshop_core::{AccountService, Money, ShopService, Stores};

use super::config::ShopConfig;

/// Source of "today" for rental dates and due-date checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Local calendar date of the machine.
    System,

    /// A pinned date, for tests and demos.
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

pub struct AppContext {
    pub shop: ShopService,
    pub accounts: AccountService,
    pub config: ShopConfig,
    clock: Clock,
}

impl AppContext {
    pub fn new(stores: &Stores, config: ShopConfig) -> Self {
        AppContext {
            shop: ShopService::new(stores),
            accounts: AccountService::new(stores),
            config,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Formats an amount with the configured currency symbol, e.g. `59.50€`.
    pub fn money(&self, amount: Money) -> String {
        amount.display_with(&self.config.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Clock::Fixed(date).today(), date);
    }
}
