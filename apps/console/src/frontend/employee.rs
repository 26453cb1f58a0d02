//! # Employee Front End
//!
//! ```text
//! Email (or 'exit' to quit) ──► Employee menu
//!                                 1) Select/Add Customer ──► Customer session
//!                                 2) View All Customers        1) Rent
//!                                 3) View Shop Revenue         2) Buy
//!                                 4) Logout                    3) Return
//!                                                              4) View Rentals
//!                                                              5) Back
//! ```

use gameshop_core::Customer;

use super::report;
use crate::commands::account::{login_employee, select_or_add_customer, Login};
use crate::commands::read_choice;
use crate::commands::rental::rent_game;
use crate::commands::report::{view_all_customers, view_revenue};
use crate::commands::returns::{return_game, view_rentals};
use crate::commands::sale::buy_game;
use crate::console::Console;
use crate::error::ShopResult;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, console: &mut dyn Console) -> ShopResult<()> {
    console.heading(&format!("{} - Employee System", ctx.config.shop_name));

    loop {
        let employee = match login_employee(ctx, console).await {
            Ok(Login::Authenticated(employee)) => employee,
            Ok(Login::Failed) => continue,
            Ok(Login::Exit) => break,
            Err(e) => {
                report(console, e)?;
                continue;
            }
        };

        console.success(&format!("Welcome, {}!", employee.name));
        menu(ctx, console).await?;
        console.say("Logging out...");
    }

    console.say("Thank you for using the employee system!");
    Ok(())
}

async fn menu(ctx: &AppContext, console: &mut dyn Console) -> ShopResult<()> {
    loop {
        console.heading("Employee menu");
        console.say("1) Select/Add Customer");
        console.say("2) View All Customers");
        console.say("3) View Shop Revenue");
        console.say("4) Logout");

        let choice = match read_choice(console, "Your choice", 4) {
            Ok(choice) => choice,
            Err(e) => {
                report(console, e)?;
                continue;
            }
        };

        let result = match choice {
            1 => serve_customer(ctx, console).await,
            2 => view_all_customers(ctx, console).await,
            3 => view_revenue(ctx, console).await,
            _ => return Ok(()),
        };

        if let Err(e) = result {
            report(console, e)?;
        }
    }
}

async fn serve_customer(ctx: &AppContext, console: &mut dyn Console) -> ShopResult<()> {
    match select_or_add_customer(ctx, console).await? {
        Some(mut customer) => customer_session(ctx, console, &mut customer).await,
        None => Ok(()),
    }
}

async fn customer_session(
    ctx: &AppContext,
    console: &mut dyn Console,
    customer: &mut Customer,
) -> ShopResult<()> {
    loop {
        console.heading(&format!("Customer: {}", customer.name));
        console.say(&format!("Loyalty Points: {}", customer.loyalty_points));
        console.say("1) Rent a Game");
        console.say("2) Buy a Game");
        console.say("3) Return a Rental");
        console.say("4) View Customer's Rentals");
        console.say("5) Back to Employee Menu");

        let choice = match read_choice(console, "Your choice", 5) {
            Ok(choice) => choice,
            Err(e) => {
                report(console, e)?;
                continue;
            }
        };

        let result = match choice {
            1 => rent_game(ctx, console, customer).await,
            2 => buy_game(ctx, console, customer).await,
            3 => return_game(ctx, console, customer).await,
            4 => view_rentals(ctx, console, customer).await,
            _ => return Ok(()),
        };

        if let Err(e) = result {
            report(console, e)?;
        }
    }
}
