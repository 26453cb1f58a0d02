//! # Sale Repository
//!
//! Purchases. A sale row is written once and never updated.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use gameshop_core::{CoreResult, LedgerTotals, Money, Sale, SaleStore};

use crate::error::DbResult;

#[derive(Debug, Clone, sqlx::FromRow)]
struct SaleRecord {
    id: String,
    customer_id: String,
    game_id: String,
    sale_date: NaiveDate,
    price_cents: i64,
}

impl From<SaleRecord> for Sale {
    fn from(r: SaleRecord) -> Self {
        Sale {
            id: r.id,
            customer_id: r.customer_id,
            game_id: r.game_id,
            sale_date: r.sale_date,
            price_cents: r.price_cents,
        }
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    pub async fn insert(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, game_id = %sale.game_id, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (id, customer_id, game_id, sale_date, price_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_id)
        .bind(&sale.game_id)
        .bind(sale.sale_date)
        .bind(sale.price_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let record = sqlx::query_as::<_, SaleRecord>(
            "SELECT id, customer_id, game_id, sale_date, price_cents FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Sale::from))
    }

    /// Sale count and revenue in one round trip.
    pub async fn totals(&self) -> DbResult<LedgerTotals> {
        let (count, amount): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(price_cents), 0) FROM sales",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(LedgerTotals {
            count,
            amount: Money::from_cents(amount),
        })
    }
}

#[async_trait]
impl SaleStore for SaleRepository {
    async fn insert(&self, sale: &Sale) -> CoreResult<()> {
        Ok(SaleRepository::insert(self, sale).await?)
    }

    async fn totals(&self) -> CoreResult<LedgerTotals> {
        Ok(SaleRepository::totals(self).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use gameshop_core::{new_id, ListingType, Platform};

    #[tokio::test]
    async fn test_insert_get_and_totals() {
        let db = fixtures::db().await;
        let customer = fixtures::customer("600111222");
        let game = fixtures::game("Elden Ring", Platform::Ps5, ListingType::Sale);
        db.customers().insert(&customer).await.unwrap();
        db.games().insert(&game).await.unwrap();

        let repo = db.sales();
        assert_eq!(repo.totals().await.unwrap().count, 0);

        let sale = Sale {
            id: new_id(),
            customer_id: customer.id.clone(),
            game_id: game.id.clone(),
            sale_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            price_cents: 1000,
        };
        repo.insert(&sale).await.unwrap();

        assert_eq!(repo.get_by_id(&sale.id).await.unwrap().unwrap(), sale);

        let totals = repo.totals().await.unwrap();
        assert_eq!(totals.count, 1);
        assert_eq!(totals.amount.cents(), 1000);
    }
}
