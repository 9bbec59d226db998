use crate::console::Console;
use crate::db::{self, DbPool};
use crate::errors::Result;
use crate::models::NewCustomer;
use std::io::{BufRead, Write};
use tracing::info;

/// Single-pass customer registration.
///
/// Collects name, contact, and address; the email comes from the login
/// flow and is shown, never re-asked. Fields are accepted as typed —
/// the flow performs no validation on customer data. Returns the
/// database-assigned customer id.
pub async fn register_customer<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &DbPool,
    login_email: &str,
) -> Result<i64> {
    console.header("CUSTOMER DETAILS")?;

    let name = console.read_line("Enter Full Name: ")?;
    let contact = console.read_line("Enter Contact Number: ")?;
    console.info(&format!("Using Email from login: {login_email}"))?;
    let address = console.read_line("Enter Address: ")?;

    let customer = NewCustomer {
        name,
        contact,
        email: login_email.to_string(),
        address,
    };

    let customer_id = db::insert_customer(pool, &customer, None).await?;
    info!("Registered customer {} for '{}'", customer_id, login_email);
    console.success("\nCustomer details saved.")?;
    Ok(customer_id)
}
