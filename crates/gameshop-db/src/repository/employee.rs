//! # Employee Repository
//!
//! Staff accounts. Emails are unique and compared without case.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use gameshop_core::{CoreResult, Employee, EmployeeStore};

use crate::error::DbResult;

#[derive(Debug, Clone, sqlx::FromRow)]
struct EmployeeRecord {
    id: String,
    name: String,
    email: String,
    password_hash: String,
}

impl From<EmployeeRecord> for Employee {
    fn from(r: EmployeeRecord) -> Self {
        Employee {
            id: r.id,
            name: r.name,
            email: r.email,
            password_hash: r.password_hash,
        }
    }
}

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Employee>> {
        let record = sqlx::query_as::<_, EmployeeRecord>(
            "SELECT id, name, email, password_hash FROM employees WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Employee::from))
    }

    pub async fn insert(&self, employee: &Employee) -> DbResult<()> {
        debug!(id = %employee.id, "Inserting employee");

        sqlx::query(
            "INSERT INTO employees (id, name, email, password_hash) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Employee>> {
        Ok(EmployeeRepository::find_by_email(self, email).await?)
    }

    async fn insert(&self, employee: &Employee) -> CoreResult<()> {
        Ok(EmployeeRepository::insert(self, employee).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::fixtures;
    use gameshop_core::new_id;

    fn employee(email: &str) -> Employee {
        Employee {
            id: new_id(),
            name: "Admin".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let db = fixtures::db().await;
        let repo = db.employees();
        let admin = employee("admin@gameshop.local");
        repo.insert(&admin).await.unwrap();

        let found = repo.find_by_email("ADMIN@gameshop.local").await.unwrap().unwrap();
        assert_eq!(found.id, admin.id);
        assert!(repo.find_by_email("nobody@gameshop.local").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = fixtures::db().await;
        let repo = db.employees();
        repo.insert(&employee("admin@gameshop.local")).await.unwrap();

        let err = repo.insert(&employee("Admin@GameShop.local")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
