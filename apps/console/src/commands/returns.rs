//! # Returns and Rental History

use gameshop_core::{Customer, ReturnOutcome};

use super::choose_from;
use crate::console::Console;
use crate::error::ShopResult;
use crate::state::AppContext;

/// Only the customer's own active rentals are offered.
pub async fn return_game(
    ctx: &AppContext,
    console: &mut dyn Console,
    customer: &mut Customer,
) -> ShopResult<()> {
    console.heading("Return a game");

    let active = ctx.shop.active_rentals(customer).await?;
    if active.is_empty() {
        console.error("No active rentals");
        return Ok(());
    }

    console.say("Active rentals:");
    for (i, details) in active.iter().enumerate() {
        console.say(&format!(
            "{}) {} - Rented on: {} - Due: {}",
            i + 1,
            details.game_title,
            details.rental.rental_date,
            details.rental.return_date
        ));
    }

    let chosen = choose_from(console, "Select rental to return (number)", &active)?;
    let receipt = ctx
        .shop
        .commit_return(customer, &chosen.rental.id, ctx.today())
        .await?;

    match receipt.outcome {
        ReturnOutcome::OnTime { bonus } => {
            console.success(&format!("{} returned successfully!", receipt.game_title));
            console.say(&format!(
                "Bonus: +{} loyalty points for returning on time! Balance: {}",
                bonus, receipt.balance
            ));
        }
        ReturnOutcome::Late => {
            console.success(&format!("{} returned (late)", receipt.game_title));
        }
    }

    Ok(())
}

/// Every rental of the customer, newest first.
pub async fn view_rentals(
    ctx: &AppContext,
    console: &mut dyn Console,
    customer: &Customer,
) -> ShopResult<()> {
    console.heading("Customer rentals");

    let history = ctx.shop.rental_history(customer).await?;
    if history.is_empty() {
        console.say("No rental history");
        return Ok(());
    }

    for details in &history {
        let status = if details.rental.is_returned {
            "Returned"
        } else {
            "Active"
        };
        console.say(&format!(
            "- {} | Rented: {} | Due: {} | Paid: {} | Status: {}",
            details.game_title,
            details.rental.rental_date,
            details.rental.return_date,
            ctx.money(details.rental.price()),
            status
        ));
    }

    Ok(())
}
