use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::NewCustomer;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info, instrument};

/// Inserts a customer record and returns its identifier.
///
/// With `explicit_id = None` the database assigns the id and the rowid of
/// the insert is returned; this is the authoritative path used by the
/// registration flow. A caller-supplied id remains supported behind the
/// same contract for stores that manage their own customer numbering.
///
/// # Errors
///
/// Returns `Error::Database` if the lock cannot be acquired or the insert
/// fails (including an explicit id that already exists).
#[instrument(skip(pool, customer))]
pub async fn insert_customer(
    pool: &DbPool,
    customer: &NewCustomer,
    explicit_id: Option<i64>,
) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let id = match explicit_id {
        Some(id) => {
            let mut stmt = conn.prepare_cached(
                "INSERT INTO customers (id, name, contact, email, address)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            stmt.insert(params![
                id,
                customer.name,
                customer.contact,
                customer.email,
                customer.address
            ])?
        }
        None => {
            let mut stmt = conn.prepare_cached(
                "INSERT INTO customers (name, contact, email, address)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            stmt.insert(params![
                customer.name,
                customer.contact,
                customer.email,
                customer.address
            ])?
        }
    };
    info!("Inserted customer '{}' with id {}", customer.name, id);
    Ok(id)
}

/// Looks up the most recently inserted customer id for `email`.
///
/// Fallback for callers that did not keep the id from `insert_customer`;
/// `Ok(None)` means no customer with that email exists.
#[instrument(skip(pool))]
pub async fn resolve_customer_id(pool: &DbPool, email: &str) -> Result<Option<i64>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "SELECT id FROM customers WHERE email = ?1 ORDER BY id DESC LIMIT 1",
    )?;
    let id = stmt
        .query_row(params![email], |row| row.get(0))
        .optional()?;
    debug!("Customer id lookup for '{}': {:?}", email, id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::{init_test_tracing, setup_test_db};
    use crate::errors::Result;
    use crate::models::NewCustomer;

    fn sample_customer(email: &str) -> NewCustomer {
        NewCustomer {
            name: "Ada Byron".to_string(),
            contact: "555-0303".to_string(),
            email: email.to_string(),
            address: "3 Analytical Way".to_string(),
        }
    }

    #[tokio::test]
    async fn database_assigned_id_matches_email_lookup() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;

        let id = insert_customer(&pool, &sample_customer("ada@example.com"), None).await?;
        assert!(id > 0);

        let resolved = resolve_customer_id(&pool, "ada@example.com").await?;
        assert_eq!(resolved, Some(id));
        Ok(())
    }

    #[tokio::test]
    async fn caller_supplied_id_converges_on_the_same_contract() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;

        let id = insert_customer(&pool, &sample_customer("bea@example.com"), Some(400)).await?;
        assert_eq!(id, 400);

        // Both insertion modes yield an id that the email lookup agrees on.
        let resolved = resolve_customer_id(&pool, "bea@example.com").await?;
        assert_eq!(resolved, Some(400));

        // Reusing an explicit id is a persistence error, not a silent overwrite.
        let duplicate = insert_customer(&pool, &sample_customer("cy@example.com"), Some(400)).await;
        assert!(duplicate.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn lookup_returns_the_most_recent_match() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;

        let first = insert_customer(&pool, &sample_customer("dup@example.com"), None).await?;
        let second = insert_customer(&pool, &sample_customer("dup@example.com"), None).await?;
        assert!(second > first);

        assert_eq!(
            resolve_customer_id(&pool, "dup@example.com").await?,
            Some(second)
        );
        assert_eq!(resolve_customer_id(&pool, "nobody@example.com").await?, None);
        Ok(())
    }
}
