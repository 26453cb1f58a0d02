//! # Front Ends
//!
//! Two thin menus over the same commands. They differ in who logs in and
//! in which operations are on offer, never in how a transaction works.

pub mod customer;
pub mod employee;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::console::Console;
use crate::error::{ShopError, ShopResult};
use crate::state::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    /// Customers sign in with their contact number
    #[default]
    Customer,

    /// Staff act on behalf of customers and see revenue
    Employee,
}

impl fmt::Display for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frontend::Customer => write!(f, "customer"),
            Frontend::Employee => write!(f, "employee"),
        }
    }
}

impl FromStr for Frontend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Frontend::Customer),
            "employee" | "staff" => Ok(Frontend::Employee),
            other => Err(format!(
                "Unknown front end: '{}'. Valid options: customer, employee",
                other
            )),
        }
    }
}

/// Runs a front end until the user quits.
pub async fn launch(
    frontend: Frontend,
    ctx: &AppContext,
    console: &mut dyn Console,
) -> ShopResult<()> {
    match frontend {
        Frontend::Customer => customer::run(ctx, console).await,
        Frontend::Employee => employee::run(ctx, console).await,
    }
}

/// Shows a failed operation and keeps the session going.
///
/// Closed input is the one error that ends the session.
pub(crate) fn report(console: &mut dyn Console, err: ShopError) -> ShopResult<()> {
    if err.is_input_closed() {
        return Err(err);
    }
    console.error(&err.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_from_str() {
        assert_eq!("Customer".parse::<Frontend>().unwrap(), Frontend::Customer);
        assert_eq!("staff".parse::<Frontend>().unwrap(), Frontend::Employee);
        assert!("kiosk".parse::<Frontend>().is_err());
    }
}
