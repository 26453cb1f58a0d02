//! # Rent a Game
//!
//! platform → compatible games → duration → loyalty offer → confirm → commit

use tracing::debug;

use gameshop_core::Customer;

use super::{choose_duration, choose_from, choose_platform, confirm, list_games, offer_points};
use crate::console::Console;
use crate::error::ShopResult;
use crate::state::AppContext;

pub async fn rent_game(
    ctx: &AppContext,
    console: &mut dyn Console,
    customer: &mut Customer,
) -> ShopResult<()> {
    console.heading("Rent a game");

    let platform = choose_platform(console)?;
    let games = ctx.shop.list_for_rent(platform).await?;
    if games.is_empty() {
        console.error("No games available for this platform");
        return Ok(());
    }

    list_games(ctx, console, &games, "/day");
    let game = choose_from(console, "Select game (number)", &games)?;
    let duration = choose_duration(ctx, console, game)?;

    let quote = ctx.shop.quote_rental(customer, game, duration);
    let use_points = offer_points(ctx, console, customer.loyalty_points, &quote.price)?;

    console.say(&format!("Total: {}", ctx.money(quote.price.final_price(use_points))));
    if !confirm(console, "Confirm rental? (yes/no)")? {
        debug!(game_id = %game.id, "Rental cancelled");
        console.say("Rental cancelled");
        return Ok(());
    }

    let receipt = ctx
        .shop
        .commit_rental(customer, &quote, platform, use_points, ctx.today())
        .await?;

    console.success(&format!("Rental successful! {}", receipt.game_title));
    console.say(&format!("Return date: {}", receipt.rental.return_date));
    if receipt.points_used > 0 {
        console.say(&format!("Redeemed {} loyalty points", receipt.points_used));
    }
    console.say(&format!(
        "Earned {} loyalty points! Balance: {}",
        receipt.points_earned, receipt.balance
    ));

    Ok(())
}
