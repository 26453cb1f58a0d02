//! # Customer Front End
//!
//! Self-service: sign in (or register) with a contact number, then
//! `1) Rent 2) Return 3) Buy 4) Log out 5) Quit`.

use gameshop_core::Customer;

use super::report;
use crate::commands::account::{sign_in_customer, Login};
use crate::commands::read_choice;
use crate::commands::rental::rent_game;
use crate::commands::returns::return_game;
use crate::commands::sale::buy_game;
use crate::console::Console;
use crate::error::ShopResult;
use crate::state::AppContext;

enum MenuExit {
    LogOut,
    Quit,
}

pub async fn run(ctx: &AppContext, console: &mut dyn Console) -> ShopResult<()> {
    console.heading(&format!("Welcome to {}", ctx.config.shop_name));

    loop {
        let mut customer = match sign_in_customer(ctx, console).await {
            Ok(Login::Authenticated(customer)) => customer,
            Ok(Login::Failed) => continue,
            Ok(Login::Exit) => break,
            Err(e) => {
                report(console, e)?;
                continue;
            }
        };

        match menu(ctx, console, &mut customer).await? {
            MenuExit::LogOut => console.say("Logging out..."),
            MenuExit::Quit => break,
        }
    }

    console.say("Goodbye.");
    Ok(())
}

async fn menu(
    ctx: &AppContext,
    console: &mut dyn Console,
    customer: &mut Customer,
) -> ShopResult<MenuExit> {
    loop {
        console.say("");
        console.say(&format!(
            "{} | Loyalty Points: {}",
            customer.name, customer.loyalty_points
        ));
        console.say("What would you like to do?");
        console.say("1) Rent");
        console.say("2) Return");
        console.say("3) Buy");
        console.say("4) Log out");
        console.say("5) Quit");

        let choice = match read_choice(console, "Your choice (1-5)", 5) {
            Ok(choice) => choice,
            Err(e) => {
                report(console, e)?;
                continue;
            }
        };

        let result = match choice {
            1 => rent_game(ctx, console, customer).await,
            2 => return_game(ctx, console, customer).await,
            3 => buy_game(ctx, console, customer).await,
            4 => return Ok(MenuExit::LogOut),
            _ => return Ok(MenuExit::Quit),
        };

        if let Err(e) = result {
            report(console, e)?;
        }
    }
}
