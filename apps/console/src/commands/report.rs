//! # Employee Reports

use crate::console::Console;
use crate::error::ShopResult;
use crate::state::AppContext;

pub async fn view_all_customers(ctx: &AppContext, console: &mut dyn Console) -> ShopResult<()> {
    console.heading("All customers");

    let customers = ctx.accounts.list_customers().await?;
    if customers.is_empty() {
        console.say("No customers in database");
        return Ok(());
    }

    console.say(&format!("Total customers: {}", customers.len()));
    for c in &customers {
        console.say(&format!(
            "- {} | Phone: {} | Loyalty Points: {}",
            c.name, c.contact_number, c.loyalty_points
        ));
    }

    Ok(())
}

pub async fn view_revenue(ctx: &AppContext, console: &mut dyn Console) -> ShopResult<()> {
    console.heading("Shop revenue");

    let summary = ctx.shop.revenue().await?;
    console.say(&format!("Sales Revenue: {}", ctx.money(summary.sales_revenue)));
    console.say(&format!("Rental Revenue: {}", ctx.money(summary.rental_revenue)));
    console.say(&format!("Total Revenue: {}", ctx.money(summary.total_revenue())));
    console.say(&format!("Total Sales: {}", summary.sales_count));
    console.say(&format!("Total Rentals: {}", summary.rentals_count));
    console.say(&format!("Total Transactions: {}", summary.transactions_count()));

    Ok(())
}
