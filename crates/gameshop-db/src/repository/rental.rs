//! # Rental Repository
//!
//! Rental agreements and their return flag.
//!
//! ## Active Rental Guard
//! ```text
//! rentals (game_id) WHERE is_returned = 0   ← unique partial index
//!
//!   INSERT 2nd active rental for same game  → UniqueViolation
//!   UPDATE ... SET is_returned = 1
//!          WHERE id = ? AND is_returned = 0 → 0 rows when already returned
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use gameshop_core::{
    CoreResult, LedgerTotals, Money, Platform, Rental, RentalDetails, RentalStore,
};

use crate::error::DbResult;

#[derive(Debug, Clone, sqlx::FromRow)]
struct RentalRecord {
    id: String,
    customer_id: String,
    game_id: String,
    platform: String,
    rental_date: NaiveDate,
    return_date: NaiveDate,
    is_returned: bool,
    price_cents: i64,
}

impl From<RentalRecord> for Rental {
    fn from(r: RentalRecord) -> Self {
        Rental {
            id: r.id,
            customer_id: r.customer_id,
            game_id: r.game_id,
            platform: Platform::from_code(&r.platform),
            rental_date: r.rental_date,
            return_date: r.return_date,
            is_returned: r.is_returned,
            price_cents: r.price_cents,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct RentalDetailsRecord {
    #[sqlx(flatten)]
    rental: RentalRecord,
    game_title: String,
}

impl From<RentalDetailsRecord> for RentalDetails {
    fn from(r: RentalDetailsRecord) -> Self {
        RentalDetails {
            rental: r.rental.into(),
            game_title: r.game_title,
        }
    }
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
struct TotalsRecord {
    count: i64,
    amount: i64,
}

const SELECT_DETAILS: &str = r#"
    SELECT r.id, r.customer_id, r.game_id, r.platform, r.rental_date,
           r.return_date, r.is_returned, r.price_cents, g.title AS game_title
    FROM rentals r
    INNER JOIN games g ON g.id = r.game_id
"#;

/// Repository for rental database operations.
#[derive(Debug, Clone)]
pub struct RentalRepository {
    pool: SqlitePool,
}

impl RentalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        RentalRepository { pool }
    }

    pub async fn insert(&self, rental: &Rental) -> DbResult<()> {
        debug!(id = %rental.id, game_id = %rental.game_id, "Inserting rental");

        sqlx::query(
            r#"
            INSERT INTO rentals (
                id, customer_id, game_id, platform, rental_date,
                return_date, is_returned, price_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&rental.id)
        .bind(&rental.customer_id)
        .bind(&rental.game_id)
        .bind(rental.platform.map(|p| p.code()).unwrap_or_default())
        .bind(rental.rental_date)
        .bind(rental.return_date)
        .bind(rental.is_returned)
        .bind(rental.price_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Rental>> {
        let record = sqlx::query_as::<_, RentalRecord>(
            r#"
            SELECT id, customer_id, game_id, platform, rental_date,
                   return_date, is_returned, price_cents
            FROM rentals
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Rental::from))
    }

    /// Unreturned rentals of one customer, oldest due date first.
    pub async fn list_active_for_customer(&self, customer_id: &str) -> DbResult<Vec<RentalDetails>> {
        let records = sqlx::query_as::<_, RentalDetailsRecord>(&format!(
            "{SELECT_DETAILS} WHERE r.customer_id = ?1 AND r.is_returned = 0 \
             ORDER BY r.return_date, g.title"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(RentalDetails::from).collect())
    }

    /// Every rental of one customer, most recent first.
    pub async fn list_for_customer(&self, customer_id: &str) -> DbResult<Vec<RentalDetails>> {
        let records = sqlx::query_as::<_, RentalDetailsRecord>(&format!(
            "{SELECT_DETAILS} WHERE r.customer_id = ?1 \
             ORDER BY r.rental_date DESC, r.rowid DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(RentalDetails::from).collect())
    }

    /// Flags a rental returned. `false` when nothing unreturned matched.
    pub async fn mark_returned(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Marking rental returned");

        let result = sqlx::query("UPDATE rentals SET is_returned = 1 WHERE id = ?1 AND is_returned = 0")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn totals(&self) -> DbResult<LedgerTotals> {
        let record = sqlx::query_as::<_, TotalsRecord>(
            "SELECT COUNT(*) AS count, COALESCE(SUM(price_cents), 0) AS amount FROM rentals",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(LedgerTotals {
            count: record.count,
            amount: Money::from_cents(record.amount),
        })
    }
}

#[async_trait]
impl RentalStore for RentalRepository {
    async fn insert(&self, rental: &Rental) -> CoreResult<()> {
        Ok(RentalRepository::insert(self, rental).await?)
    }

    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Rental>> {
        Ok(RentalRepository::get_by_id(self, id).await?)
    }

    async fn list_active_for_customer(&self, customer_id: &str) -> CoreResult<Vec<RentalDetails>> {
        Ok(RentalRepository::list_active_for_customer(self, customer_id).await?)
    }

    async fn list_for_customer(&self, customer_id: &str) -> CoreResult<Vec<RentalDetails>> {
        Ok(RentalRepository::list_for_customer(self, customer_id).await?)
    }

    async fn mark_returned(&self, id: &str) -> CoreResult<bool> {
        Ok(RentalRepository::mark_returned(self, id).await?)
    }

    async fn totals(&self) -> CoreResult<LedgerTotals> {
        Ok(RentalRepository::totals(self).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
