//! # Buy a Game

use tracing::debug;

use gameshop_core::Customer;

use super::{choose_from, choose_platform, confirm, list_games, offer_points};
use crate::console::Console;
use crate::error::ShopResult;
use crate::state::AppContext;

pub async fn buy_game(
    ctx: &AppContext,
    console: &mut dyn Console,
    customer: &mut Customer,
) -> ShopResult<()> {
    console.heading("Buy a game");

    let platform = choose_platform(console)?;
    let games = ctx.shop.list_for_sale(platform).await?;
    if games.is_empty() {
        console.error("No games available for sale on this platform");
        return Ok(());
    }

    list_games(ctx, console, &games, "");
    let game = choose_from(console, "Select game (number)", &games)?;

    let quote = ctx.shop.quote_sale(customer, game);
    let use_points = offer_points(ctx, console, customer.loyalty_points, &quote.price)?;

    console.say(&format!("Total: {}", ctx.money(quote.price.final_price(use_points))));
    if !confirm(console, "Confirm purchase? (yes/no)")? {
        debug!(game_id = %game.id, "Purchase cancelled");
        console.say("Purchase cancelled");
        return Ok(());
    }

    let receipt = ctx
        .shop
        .commit_sale(customer, &quote, use_points, ctx.today())
        .await?;

    console.success(&format!(
        "Purchase successful! {} for {}",
        receipt.game_title,
        ctx.money(receipt.sale.price())
    ));
    if receipt.points_used > 0 {
        console.say(&format!("Redeemed {} loyalty points", receipt.points_used));
    }
    console.say(&format!(
        "Earned {} loyalty points! Balance: {}",
        receipt.points_earned, receipt.balance
    ));

    Ok(())
}
