//! # Accounts
//!
//! Customer sign-in (or registration), employee login and the employee's
//! customer lookup. Passwords are read with `read_secret` and never echoed.

use gameshop_core::{CoreError, Customer, Employee, MAX_LOGIN_ATTEMPTS};

use super::read_choice;
use crate::console::Console;
use crate::error::{ErrorCode, ShopError, ShopResult};
use crate::state::AppContext;

/// Outcome of a login prompt.
#[derive(Debug)]
pub enum Login<T> {
    Authenticated(T),
    /// Attempts exhausted; back to the top-level prompt.
    Failed,
    /// The user typed `exit`.
    Exit,
}

fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("exit")
}

/// Top-level customer prompt.
///
/// A known contact number gets up to three password attempts. An unknown
/// one is registered on the spot with a name and a password.
pub async fn sign_in_customer(
    ctx: &AppContext,
    console: &mut dyn Console,
) -> ShopResult<Login<Customer>> {
    let contact = console.read_line("Contact (or 'exit' to quit)")?;
    if is_exit(&contact) {
        return Ok(Login::Exit);
    }
    let contact = contact.trim();
    if contact.is_empty() {
        return Err(ShopError::new(ErrorCode::ValidationError, "Contact is required"));
    }

    if ctx.accounts.find_customer(contact).await?.is_none() {
        console.say("New customer, let's get you registered.");
        let name = console.read_line("Name")?;
        let password = console.read_secret("Choose a password")?;

        let customer = ctx.accounts.register_customer(&name, contact, &password).await?;
        console.success(&format!("Registration OK. Welcome {}!", customer.name));
        return Ok(Login::Authenticated(customer));
    }

    for attempt in 1..=MAX_LOGIN_ATTEMPTS {
        let password = console.read_secret("Password")?;
        match ctx.accounts.authenticate_customer(contact, &password).await {
            Ok(customer) => {
                console.success(&format!("Login successful. Welcome {}!", customer.name));
                return Ok(Login::Authenticated(customer));
            }
            Err(CoreError::AuthenticationFailed) => console.error(&format!(
                "Incorrect password. Attempt {}/{}",
                attempt, MAX_LOGIN_ATTEMPTS
            )),
            Err(e) => return Err(e.into()),
        }
    }

    console.error("Authentication failed. Back to start.");
    Ok(Login::Failed)
}

pub async fn login_employee(
    ctx: &AppContext,
    console: &mut dyn Console,
) -> ShopResult<Login<Employee>> {
    console.heading("Employee login");

    for attempt in 1..=MAX_LOGIN_ATTEMPTS {
        let email = console.read_line("Email (or 'exit' to quit)")?;
        if is_exit(&email) {
            return Ok(Login::Exit);
        }
        let password = console.read_secret("Password")?;

        match ctx.accounts.authenticate_employee(&email, &password).await {
            Ok(employee) => return Ok(Login::Authenticated(employee)),
            Err(CoreError::AuthenticationFailed) => console.error(&format!(
                "Invalid credentials. Attempt {}/{}",
                attempt, MAX_LOGIN_ATTEMPTS
            )),
            Err(e) => return Err(e.into()),
        }
    }

    console.error("Login failed");
    Ok(Login::Failed)
}

/// Finds a customer by phone number or registers a new one.
///
/// `None` when the employee backs out.
pub async fn select_or_add_customer(
    ctx: &AppContext,
    console: &mut dyn Console,
) -> ShopResult<Option<Customer>> {
    console.heading("Customer selection");
    console.say("1) Search existing customer (by phone)");
    console.say("2) Add new customer");
    console.say("3) Back");

    match read_choice(console, "Your choice", 3)? {
        1 => {
            let phone = console.read_line("Customer phone number")?;
            let customer = ctx
                .accounts
                .find_customer(&phone)
                .await?
                .ok_or_else(|| ShopError::new(ErrorCode::NotFound, "Customer not found"))?;

            console.success(&format!(
                "Customer found: {} (Loyalty Points: {})",
                customer.name, customer.loyalty_points
            ));
            Ok(Some(customer))
        }
        2 => {
            let name = console.read_line("Customer name")?;
            let phone = console.read_line("Phone number")?;
            let password = console.read_secret("Password")?;

            let customer = ctx.accounts.register_customer(&name, &phone, &password).await?;
            console.success("Customer created successfully!");
            Ok(Some(customer))
        }
        _ => Ok(None),
    }
}
