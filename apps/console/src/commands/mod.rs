//! # Console Commands
//!
//! One module per shop operation, each an async function over
//! [`AppContext`] and a [`Console`]:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  account  │ sign_in_customer, login_employee, select_or_add_customer    │
//! │  rental   │ rent_game                                                   │
//! │  sale     │ buy_game                                                    │
//! │  returns  │ return_game, view_rentals                                   │
//! │  report   │ view_all_customers, view_revenue                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module holds the prompts they share. A bad answer becomes a
//! `ShopError` that the calling menu prints before re-prompting.

pub mod account;
pub mod rental;
pub mod returns;
pub mod report;
pub mod sale;

use gameshop_core::pricing::rental_price;
use gameshop_core::transaction::PriceBreakdown;
use gameshop_core::{Game, Platform, RentalDuration};

use crate::console::Console;
use crate::error::{ErrorCode, ShopError, ShopResult};
use crate::state::AppContext;

/// Parses a menu number: surrounding whitespace is ignored, anything but
/// ASCII digits is rejected.
pub fn parse_number(input: &str) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// `yes` or `y`, any case.
pub fn is_yes(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("yes") || input.eq_ignore_ascii_case("y")
}

/// Reads a choice in `1..=max`.
pub fn read_choice(console: &mut dyn Console, prompt: &str, max: usize) -> ShopResult<usize> {
    let answer = console.read_line(prompt)?;
    match parse_number(&answer) {
        Some(n) if (1..=max).contains(&n) => Ok(n),
        Some(_) => Err(ShopError::invalid_choice()),
        None => Err(ShopError::new(ErrorCode::InvalidChoice, "Please enter a number")),
    }
}

pub fn confirm(console: &mut dyn Console, prompt: &str) -> ShopResult<bool> {
    Ok(is_yes(&console.read_line(prompt)?))
}

/// Picks one entry of an already printed, 1-based list.
pub fn choose_from<'a, T>(
    console: &mut dyn Console,
    prompt: &str,
    items: &'a [T],
) -> ShopResult<&'a T> {
    let answer = console.read_line(prompt)?;
    parse_number(&answer)
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| items.get(idx))
        .ok_or_else(ShopError::invalid_selection)
}

pub fn choose_platform(console: &mut dyn Console) -> ShopResult<Platform> {
    console.heading("Select platform");
    for (i, platform) in Platform::SELECTABLE.iter().enumerate() {
        console.say(&format!("{}) {}", i + 1, platform));
    }

    let choice = read_choice(console, "Your choice", Platform::SELECTABLE.len())?;
    Ok(Platform::SELECTABLE[choice - 1])
}

/// Duration menu with the price of each option for `game`.
pub fn choose_duration(
    ctx: &AppContext,
    console: &mut dyn Console,
    game: &Game,
) -> ShopResult<RentalDuration> {
    console.say("Rental duration:");
    for (i, duration) in RentalDuration::ALL.iter().enumerate() {
        console.say(&format!(
            "{}) {} - {}",
            i + 1,
            duration.label(),
            ctx.money(rental_price(game, *duration))
        ));
    }

    let choice = read_choice(console, "Your choice", RentalDuration::ALL.len())?;
    Ok(RentalDuration::ALL[choice - 1])
}

/// Offers the loyalty discount when the balance allows one.
///
/// Returns whether the customer opted in.
pub fn offer_points(
    ctx: &AppContext,
    console: &mut dyn Console,
    balance: i64,
    price: &PriceBreakdown,
) -> ShopResult<bool> {
    if price.offer.is_empty() {
        return Ok(false);
    }

    console.say(&format!("You have {} loyalty points", balance));
    console.say(&format!(
        "You can use {} points for a {} discount",
        price.offer.usable_points,
        ctx.money(price.offer.discount)
    ));

    let use_points = confirm(console, "Use loyalty points? (yes/no)")?;
    if use_points {
        console.success(&format!("Applied {} discount!", ctx.money(price.offer.discount)));
    }
    Ok(use_points)
}

/// Prints `1) Title - Genre - Platform - price<suffix>` for each game.
pub fn list_games(ctx: &AppContext, console: &mut dyn Console, games: &[Game], suffix: &str) {
    console.say("Available games:");
    for (i, game) in games.iter().enumerate() {
        console.say(&format!(
            "{}) {} - {} - {} - {}{}",
            i + 1,
            game.title,
            game.genre,
            game.platform_label(),
            ctx.money(game.price()),
            suffix
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    #[test]
    fn test_parse_number_trims_and_rejects_non_digits() {
        assert_eq!(parse_number(" 3 "), Some(3));
        assert_eq!(parse_number("10"), Some(10));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("+1"), None);
        assert_eq!(parse_number("-1"), None);
        assert_eq!(parse_number("1.0"), None);
        assert_eq!(parse_number("٣"), None);
        assert_eq!(parse_number("99999999999999999999999999"), None);
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("yes"));
        assert!(is_yes("Y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("yeah"));
        assert!(!is_yes("no"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_read_choice_bounds() {
        let mut console = ScriptedConsole::new(["0", "4", "two", "3"]);
        for _ in 0..3 {
            let err = read_choice(&mut console, "Your choice", 3).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidChoice);
        }
        assert_eq!(read_choice(&mut console, "Your choice", 3).unwrap(), 3);
    }

    #[test]
    fn test_choose_from_is_one_based() {
        let items = ["a", "b"];
        let mut console = ScriptedConsole::new(["2", "0", "3"]);
        assert_eq!(*choose_from(&mut console, "Pick", &items).unwrap(), "b");
        assert!(choose_from(&mut console, "Pick", &items).is_err());
        assert!(choose_from(&mut console, "Pick", &items).is_err());
    }

    #[test]
    fn test_choose_platform_lists_eight() {
        let mut console = ScriptedConsole::new(["5"]);
        assert_eq!(choose_platform(&mut console).unwrap(), Platform::Ps5);
        assert!(console.contains("8) PC Linux"));
        assert!(!console.contains("9)"));
    }

    #[test]
    fn test_closed_input_propagates() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let err = choose_platform(&mut console).unwrap_err();
        assert!(err.is_input_closed());
    }
}
