//! # Customer Repository
//!
//! Customer accounts and their loyalty balances.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use gameshop_core::{CoreError, CoreResult, Customer, CustomerStore};

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone, sqlx::FromRow)]
struct CustomerRecord {
    id: String,
    name: String,
    contact_number: String,
    password_hash: String,
    loyalty_points: i64,
    created_at: DateTime<Utc>,
}

impl From<CustomerRecord> for Customer {
    fn from(r: CustomerRecord) -> Self {
        Customer {
            id: r.id,
            name: r.name,
            contact_number: r.contact_number,
            password_hash: r.password_hash,
            loyalty_points: r.loyalty_points,
            created_at: r.created_at,
        }
    }
}

const SELECT_CUSTOMER: &str = r#"
    SELECT id, name, contact_number, password_hash, loyalty_points, created_at
    FROM customers
"#;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let record = sqlx::query_as::<_, CustomerRecord>(&format!("{SELECT_CUSTOMER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Customer::from))
    }

    /// Exact match on the (unique) contact number.
    pub async fn find_by_contact(&self, contact_number: &str) -> DbResult<Option<Customer>> {
        let record = sqlx::query_as::<_, CustomerRecord>(&format!(
            "{SELECT_CUSTOMER} WHERE contact_number = ?1"
        ))
        .bind(contact_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Customer::from))
    }

    /// Inserts a new customer.
    ///
    /// ## Errors
    /// `UniqueViolation` on `contact_number` when the number is taken.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, contact_number, password_hash, loyalty_points, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.contact_number)
        .bind(&customer.password_hash)
        .bind(customer.loyalty_points)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                DbError::duplicate(field, customer.contact_number.clone())
            }
            other => other,
        })?;

        Ok(())
    }

    pub async fn update_loyalty_points(&self, id: &str, points: i64) -> DbResult<()> {
        debug!(id = %id, points, "Updating loyalty points");

        let result = sqlx::query("UPDATE customers SET loyalty_points = ?1 WHERE id = ?2")
            .bind(points)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let records = sqlx::query_as::<_, CustomerRecord>(&format!(
            "{SELECT_CUSTOMER} ORDER BY name COLLATE NOCASE, contact_number"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Customer::from).collect())
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Customer>> {
        Ok(CustomerRepository::get_by_id(self, id).await?)
    }

    async fn find_by_contact(&self, contact_number: &str) -> CoreResult<Option<Customer>> {
        Ok(CustomerRepository::find_by_contact(self, contact_number).await?)
    }

    async fn insert(&self, customer: &Customer) -> CoreResult<()> {
        match CustomerRepository::insert(self, customer).await {
            Err(DbError::UniqueViolation { .. }) => {
                Err(CoreError::DuplicateContact(customer.contact_number.clone()))
            }
            other => Ok(other?),
        }
    }

    async fn update_loyalty_points(&self, id: &str, points: i64) -> CoreResult<()> {
        Ok(CustomerRepository::update_loyalty_points(self, id, points).await?)
    }

    async fn list_all(&self) -> CoreResult<Vec<Customer>> {
        Ok(CustomerRepository::list_all(self).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
