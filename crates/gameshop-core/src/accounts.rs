//! # Accounts
//!
//! Customer registration and login, employee login, and the customer
//! lookups employees use at the counter.
//!
//! ## Login Flow
//! ```text
//! Contact / email typed
//!      │
//!      ▼
//! lookup ──► not found ──► (customer front end) register
//!      │
//!      ▼
//! verify_password ──► mismatch ──► AuthenticationFailed (caller counts attempts)
//!      │
//!      ▼
//! Customer / Employee
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::credentials::{hash_password, verify_password};
use crate::error::{CoreError, CoreResult};
use crate::store::{CustomerStore, EmployeeStore, Stores};
use crate::types::{new_id, Customer, Employee};
use crate::validation::{validate_contact_number, validate_email, validate_name, validate_password};

/// Login attempts allowed before the front end gives up on an account.
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct AccountService {
    customers: Arc<dyn CustomerStore>,
    employees: Arc<dyn EmployeeStore>,
}

impl AccountService {
    pub fn new(stores: &Stores) -> Self {
        AccountService {
            customers: stores.customers.clone(),
            employees: stores.employees.clone(),
        }
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Registers a customer with zero loyalty points.
    ///
    /// ## Errors
    /// - `Validation` for a blank name/password or malformed contact number
    /// - `DuplicateContact` when the contact number is taken
    pub async fn register_customer(
        &self,
        name: &str,
        contact_number: &str,
        password: &str,
    ) -> CoreResult<Customer> {
        validate_name(name)?;
        validate_contact_number(contact_number)?;
        validate_password(password)?;

        let contact_number = contact_number.trim();
        if self.customers.find_by_contact(contact_number).await?.is_some() {
            return Err(CoreError::DuplicateContact(contact_number.to_string()));
        }

        let customer = Customer {
            id: new_id(),
            name: name.trim().to_string(),
            contact_number: contact_number.to_string(),
            password_hash: hash_password(password)?,
            loyalty_points: 0,
            created_at: Utc::now(),
        };

        self.customers.insert(&customer).await?;

        info!(customer_id = %customer.id, "Registered customer");
        Ok(customer)
    }

    pub async fn find_customer(&self, contact_number: &str) -> CoreResult<Option<Customer>> {
        self.customers.find_by_contact(contact_number.trim()).await
    }

    /// Re-reads a customer, e.g. to refresh the loyalty balance.
    pub async fn reload_customer(&self, customer: &Customer) -> CoreResult<Customer> {
        self.customers
            .get_by_id(&customer.id)
            .await?
            .ok_or_else(|| CoreError::not_found("Customer", &customer.id))
    }

    pub async fn list_customers(&self) -> CoreResult<Vec<Customer>> {
        self.customers.list_all().await
    }

    /// Single login attempt for a customer.
    pub async fn authenticate_customer(
        &self,
        contact_number: &str,
        password: &str,
    ) -> CoreResult<Customer> {
        let customer = self
            .customers
            .find_by_contact(contact_number.trim())
            .await?
            .ok_or(CoreError::AuthenticationFailed)?;

        if !verify_password(password, &customer.password_hash) {
            debug!(customer_id = %customer.id, "Customer password mismatch");
            return Err(CoreError::AuthenticationFailed);
        }

        info!(customer_id = %customer.id, "Customer logged in");
        Ok(customer)
    }

    // =========================================================================
    // Employees
    // =========================================================================

    pub async fn register_employee(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> CoreResult<Employee> {
        validate_name(name)?;
        validate_email(email)?;
        validate_password(password)?;

        let employee = Employee {
            id: new_id(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash: hash_password(password)?,
        };

        self.employees.insert(&employee).await?;

        info!(employee_id = %employee.id, "Registered employee");
        Ok(employee)
    }

    /// Single login attempt for an employee. Emails compare case-insensitively.
    pub async fn authenticate_employee(&self, email: &str, password: &str) -> CoreResult<Employee> {
        let employee = self
            .employees
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(CoreError::AuthenticationFailed)?;

        if !verify_password(password, &employee.password_hash) {
            debug!(employee_id = %employee.id, "Employee password mismatch");
            return Err(CoreError::AuthenticationFailed);
        }

        info!(employee_id = %employee.id, "Employee logged in");
        Ok(employee)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn service() -> AccountService {
        AccountService::new(&MemoryStore::new().stores())
    }

    #[tokio::test]
    async fn test_register_and_login_customer() {
        let accounts = service();

        let customer = accounts
            .register_customer(" Ana ", "600111222", "secret")
            .await
            .unwrap();
        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.loyalty_points, 0);
        assert_ne!(customer.password_hash, "secret");

        let logged_in = accounts
            .authenticate_customer("600111222", "secret")
            .await
            .unwrap();
        assert_eq!(logged_in.id, customer.id);
    }

    #[tokio::test]
    async fn test_duplicate_contact_rejected() {
        let accounts = service();
        accounts
            .register_customer("Ana", "600111222", "secret")
            .await
            .unwrap();

        let err = accounts
            .register_customer("Bea", "600111222", "other")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateContact(ref c) if c == "600111222"));
    }

    #[tokio::test]
    async fn test_registration_validates_fields() {
        let accounts = service();
        let err = accounts
            .register_customer("", "600111222", "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = accounts
            .register_customer("Ana", "600111222", "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_contact() {
        let accounts = service();
        accounts
            .register_customer("Ana", "600111222", "secret")
            .await
            .unwrap();

        assert!(matches!(
            accounts.authenticate_customer("600111222", "nope").await,
            Err(CoreError::AuthenticationFailed)
        ));
        assert!(matches!(
            accounts.authenticate_customer("699999999", "secret").await,
            Err(CoreError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn test_employee_login_ignores_email_case() {
        let accounts = service();
        accounts
            .register_employee("Admin", "Admin@Shop.local", "letmein")
            .await
            .unwrap();

        let employee = accounts
            .authenticate_employee("ADMIN@shop.local", "letmein")
            .await
            .unwrap();
        assert_eq!(employee.email, "admin@shop.local");

        assert!(matches!(
            accounts.authenticate_employee("admin@shop.local", "wrong").await,
            Err(CoreError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn test_list_customers_sorted_by_name() {
        let accounts = service();
        accounts.register_customer("Zoe", "600000001", "pw").await.unwrap();
        accounts.register_customer("Ana", "600000002", "pw").await.unwrap();

        let names: Vec<_> = accounts
            .list_customers()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Zoe"]);
    }
}
