//! # Transaction Orchestrator
//!
//! Sequences one rent, buy or return: policy calls in between single-statement
//! storage writes.
//!
//! ## Rent / Buy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_for_rent(platform)      available RENTAL games, compatible only  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quote_rental(game, tier)     base price + loyalty offer (no writes)   │
//! │       │                                                                 │
//! │       │  customer may stop here: nothing has been written              │
//! │       ▼                                                                 │
//! │  commit_rental                                                          │
//! │    1. re-read game, still available?   no → GameUnavailable            │
//! │    2. balance after debit + earn       short → InsufficientPoints      │
//! │    3. INSERT rental                    fails → stop, nothing changed   │
//! │    4. game → unavailable                                                │
//! │    5. UPDATE loyalty balance                                            │
//! │    6. customer value updated in place                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Return
//! ```text
//! active_rentals(customer) ──► pick one ──► commit_return
//!    1. rental belongs to customer and is unreturned
//!    2. UPDATE rental SET is_returned (guarded on is_returned = 0)
//!    3. game → available
//!    4. today <= due date ? +50 points : no bonus
//! ```
//!
//! Steps 3-5 of a commit are separate statements. A failure after step 3
//! leaves the rental row in place and comes back as
//! [`CoreError::PartialCommit`]; a plain `Storage` error means nothing was
//! written. Returns follow the same rule after step 2.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::availability::{mark_available, mark_unavailable};
use crate::error::{CoreError, CoreResult};
use crate::loyalty::{self, LoyaltyOffer, ON_TIME_RETURN_BONUS};
use crate::money::Money;
use crate::platform::{is_compatible, Platform};
use crate::pricing::{rental_price, sale_price, RentalDuration};
use crate::store::{CustomerStore, GameStore, RentalStore, SaleStore, Stores};
use crate::types::{new_id, Customer, Game, ListingType, Rental, RentalDetails, RevenueSummary, Sale};

// =============================================================================
// Quotes
// =============================================================================

/// Base price plus what the customer could redeem against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: Money,
    pub offer: LoyaltyOffer,
}

impl PriceBreakdown {
    fn new(base_price: Money, balance: i64) -> Self {
        PriceBreakdown {
            base_price,
            offer: loyalty::available_discount(balance),
        }
    }

    pub fn points_used(&self, use_points: bool) -> i64 {
        if use_points {
            self.offer.usable_points
        } else {
            0
        }
    }

    pub fn final_price(&self, use_points: bool) -> Money {
        loyalty::apply_discount(self.base_price, self.points_used(use_points))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalQuote {
    pub game: Game,
    pub duration: RentalDuration,
    pub price: PriceBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleQuote {
    pub game: Game,
    pub price: PriceBreakdown,
}

// =============================================================================
// Receipts
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalReceipt {
    pub rental: Rental,
    pub game_title: String,
    pub points_used: i64,
    pub points_earned: i64,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleReceipt {
    pub sale: Sale,
    pub game_title: String,
    pub points_used: i64,
    pub points_earned: i64,
    pub balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// Returned on or before the due date.
    OnTime { bonus: i64 },
    Late,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub rental: Rental,
    pub game_title: String,
    pub outcome: ReturnOutcome,
    pub balance: i64,
}

// =============================================================================
// Shop Service
// =============================================================================

/// The transaction orchestrator. Cheap to clone.
#[derive(Clone)]
pub struct ShopService {
    customers: Arc<dyn CustomerStore>,
    games: Arc<dyn GameStore>,
    rentals: Arc<dyn RentalStore>,
    sales: Arc<dyn SaleStore>,
}

impl ShopService {
    pub fn new(stores: &Stores) -> Self {
        ShopService {
            customers: stores.customers.clone(),
            games: stores.games.clone(),
            rentals: stores.rentals.clone(),
            sales: stores.sales.clone(),
        }
    }

    // =========================================================================
    // Listing
    // =========================================================================

    pub async fn list_for_rent(&self, platform: Platform) -> CoreResult<Vec<Game>> {
        self.list_compatible(ListingType::Rental, platform).await
    }

    pub async fn list_for_sale(&self, platform: Platform) -> CoreResult<Vec<Game>> {
        self.list_compatible(ListingType::Sale, platform).await
    }

    async fn list_compatible(&self, listing: ListingType, platform: Platform) -> CoreResult<Vec<Game>> {
        let games = self.games.list_available(listing).await?;
        Ok(games
            .into_iter()
            .filter(|g| is_compatible(g.platform, Some(platform)))
            .collect())
    }

    // =========================================================================
    // Quoting (no writes)
    // =========================================================================

    pub fn quote_rental(&self, customer: &Customer, game: &Game, duration: RentalDuration) -> RentalQuote {
        RentalQuote {
            game: game.clone(),
            duration,
            price: PriceBreakdown::new(rental_price(game, duration), customer.loyalty_points),
        }
    }

    pub fn quote_sale(&self, customer: &Customer, game: &Game) -> SaleQuote {
        SaleQuote {
            game: game.clone(),
            price: PriceBreakdown::new(sale_price(game), customer.loyalty_points),
        }
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Persists a rental, takes the game off the shelf and settles points.
    pub async fn commit_rental(
        &self,
        customer: &mut Customer,
        quote: &RentalQuote,
        requested: Platform,
        use_points: bool,
        today: NaiveDate,
    ) -> CoreResult<RentalReceipt> {
        let mut game = self.fresh_game(&quote.game.id, ListingType::Rental).await?;

        let points_used = quote.price.points_used(use_points);
        let final_price = quote.price.final_price(use_points);
        let points_earned = loyalty::points_earned(final_price);
        let balance = loyalty::credit(
            loyalty::debit(customer.loyalty_points, points_used)?,
            points_earned,
        );

        let days = quote.duration.days();
        let return_date = today
            .checked_add_days(Days::new(days as u64))
            .ok_or(CoreError::DateOutOfRange { from: today, days })?;

        let rental = Rental {
            id: new_id(),
            customer_id: customer.id.clone(),
            game_id: game.id.clone(),
            platform: Some(requested),
            rental_date: today,
            return_date,
            is_returned: false,
            price_cents: final_price.cents(),
        };

        self.rentals.insert(&rental).await?;

        mark_unavailable(&mut game);
        self.shelve_and_settle(&game, &customer.id, balance)
            .await
            .map_err(|e| partial("Rental", &rental.id, e))?;
        customer.loyalty_points = balance;

        info!(
            rental_id = %rental.id,
            customer_id = %customer.id,
            game_id = %game.id,
            price_cents = final_price.cents(),
            points_used,
            points_earned,
            "Rental committed"
        );

        Ok(RentalReceipt {
            rental,
            game_title: game.title,
            points_used,
            points_earned,
            balance,
        })
    }

    /// Persists a sale, takes the game off the shelf and settles points.
    pub async fn commit_sale(
        &self,
        customer: &mut Customer,
        quote: &SaleQuote,
        use_points: bool,
        today: NaiveDate,
    ) -> CoreResult<SaleReceipt> {
        let mut game = self.fresh_game(&quote.game.id, ListingType::Sale).await?;

        let points_used = quote.price.points_used(use_points);
        let final_price = quote.price.final_price(use_points);
        let points_earned = loyalty::points_earned(final_price);
        let balance = loyalty::credit(
            loyalty::debit(customer.loyalty_points, points_used)?,
            points_earned,
        );

        let sale = Sale {
            id: new_id(),
            customer_id: customer.id.clone(),
            game_id: game.id.clone(),
            sale_date: today,
            price_cents: final_price.cents(),
        };

        self.sales.insert(&sale).await?;

        mark_unavailable(&mut game);
        self.shelve_and_settle(&game, &customer.id, balance)
            .await
            .map_err(|e| partial("Sale", &sale.id, e))?;
        customer.loyalty_points = balance;

        info!(
            sale_id = %sale.id,
            customer_id = %customer.id,
            game_id = %game.id,
            price_cents = final_price.cents(),
            points_used,
            points_earned,
            "Sale committed"
        );

        Ok(SaleReceipt {
            sale,
            game_title: game.title,
            points_used,
            points_earned,
            balance,
        })
    }

    /// Writes that follow a stored rental or sale.
    async fn shelve_and_settle(&self, game: &Game, customer_id: &str, balance: i64) -> CoreResult<()> {
        self.games.set_availability(&game.id, game.is_available).await?;
        self.customers.update_loyalty_points(customer_id, balance).await
    }

    /// Re-reads a quoted game so a commit never acts on a stale copy.
    async fn fresh_game(&self, id: &str, listing: ListingType) -> CoreResult<Game> {
        let game = self
            .games
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Game", id))?;

        if !game.is_available || game.listing != listing {
            warn!(game_id = %game.id, "Game no longer available");
            return Err(CoreError::GameUnavailable(game.title));
        }

        Ok(game)
    }

    // =========================================================================
    // Returns
    // =========================================================================

    /// The only rentals a customer may pick from when returning.
    pub async fn active_rentals(&self, customer: &Customer) -> CoreResult<Vec<RentalDetails>> {
        self.rentals.list_active_for_customer(&customer.id).await
    }

    pub async fn rental_history(&self, customer: &Customer) -> CoreResult<Vec<RentalDetails>> {
        self.rentals.list_for_customer(&customer.id).await
    }

    pub async fn commit_return(
        &self,
        customer: &mut Customer,
        rental_id: &str,
        today: NaiveDate,
    ) -> CoreResult<ReturnReceipt> {
        let mut rental = self
            .rentals
            .get_by_id(rental_id)
            .await?
            .filter(|r| r.customer_id == customer.id && !r.is_returned)
            .ok_or_else(|| CoreError::RentalNotFound(rental_id.to_string()))?;

        if !self.rentals.mark_returned(&rental.id).await? {
            return Err(CoreError::RentalNotFound(rental_id.to_string()));
        }
        rental.is_returned = true;

        let (game, outcome, balance) = self
            .restock_and_reward(&rental, customer.loyalty_points, today)
            .await
            .map_err(|e| partial("Return", &rental.id, e))?;
        customer.loyalty_points = balance;

        info!(
            rental_id = %rental.id,
            customer_id = %customer.id,
            on_time = matches!(outcome, ReturnOutcome::OnTime { .. }),
            "Rental returned"
        );

        Ok(ReturnReceipt {
            rental,
            game_title: game.title,
            outcome,
            balance: customer.loyalty_points,
        })
    }

    /// Writes that follow a rental marked returned.
    async fn restock_and_reward(
        &self,
        rental: &Rental,
        balance: i64,
        today: NaiveDate,
    ) -> CoreResult<(Game, ReturnOutcome, i64)> {
        let mut game = self
            .games
            .get_by_id(&rental.game_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Game", &rental.game_id))?;
        mark_available(&mut game);
        self.games.set_availability(&game.id, game.is_available).await?;

        if !rental.is_on_time(today) {
            return Ok((game, ReturnOutcome::Late, balance));
        }

        let balance = loyalty::credit(balance, ON_TIME_RETURN_BONUS);
        self.customers.update_loyalty_points(&rental.customer_id, balance).await?;
        Ok((
            game,
            ReturnOutcome::OnTime {
                bonus: ON_TIME_RETURN_BONUS,
            },
            balance,
        ))
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    pub async fn revenue(&self) -> CoreResult<RevenueSummary> {
        let sales = self.sales.totals().await?;
        let rentals = self.rentals.totals().await?;

        Ok(RevenueSummary {
            sales_revenue: sales.amount,
            rental_revenue: rentals.amount,
            sales_count: sales.count,
            rentals_count: rentals.count,
        })
    }
}

fn partial(record: &str, id: &str, cause: CoreError) -> CoreError {
    error!(record, id, error = %cause, "Follow-up write failed after commit");
    CoreError::partial_commit(record, id, cause)
}

// =============================================================================
// Unit Tests
// =============================================================================
