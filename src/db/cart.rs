use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::CartLine;
use rusqlite::params;
use tracing::{debug, info, instrument};

/// Records one (customer, product, quantity) cart line and returns its id.
///
/// # Errors
///
/// Returns `Error::Database` for a non-positive quantity, a lock failure,
/// or a failed insert (e.g. an unknown product id under foreign keys).
#[instrument(skip(pool))]
pub async fn add_cart_item(
    pool: &DbPool,
    customer_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<i64> {
    if quantity <= 0 {
        return Err(Error::Database(
            "Cart quantity must be at least 1".to_string(),
        ));
    }
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO cart_items (customer_id, product_id, quantity) VALUES (?1, ?2, ?3)",
    )?;
    let id = stmt.insert(params![customer_id, product_id, quantity])?;
    info!(
        "Added cart item {} for customer {}: product {} x{}",
        id, customer_id, product_id, quantity
    );
    Ok(id)
}

/// Lists a customer's cart lines joined with product name and unit price,
/// in insertion order.
#[instrument(skip(pool))]
pub async fn list_cart_items(pool: &DbPool, customer_id: i64) -> Result<Vec<CartLine>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "SELECT p.name, p.price, c.quantity
         FROM cart_items c
         JOIN products p ON c.product_id = p.id
         WHERE c.customer_id = ?1
         ORDER BY c.id ASC",
    )?;
    let rows = stmt.query_map(params![customer_id], |row| {
        Ok(CartLine {
            product_name: row.get(0)?,
            unit_price: row.get(1)?,
            quantity: row.get(2)?,
        })
    })?;

    let mut lines = Vec::new();
    for row in rows {
        lines.push(row.map_err(|e| Error::Database(format!("Failed to map cart row: {}", e)))?);
    }
    debug!(
        "Fetched {} cart lines for customer {}.",
        lines.len(),
        customer_id
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::{
        DirectProductArgs, direct_insert_customer, direct_insert_product, init_test_tracing,
        setup_test_db,
    };
    use crate::errors::Result;

    #[tokio::test]
    async fn add_then_list_round_trips_with_product_fields() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;
        let customer_id;
        {
            let conn = pool.lock().unwrap();
            customer_id = direct_insert_customer(&conn, "Ada Byron", "ada@example.com")?;
            let mut soap = DirectProductArgs::new(1, "Soap", "Grooming", "Bath");
            soap.price = 2.50;
            direct_insert_product(&conn, &soap)?;
            let mut chips = DirectProductArgs::new(2, "Chips", "Snacks", "Salty");
            chips.price = 1.25;
            direct_insert_product(&conn, &chips)?;
        }

        add_cart_item(&pool, customer_id, 1, 3).await?;
        add_cart_item(&pool, customer_id, 2, 2).await?;

        let lines = list_cart_items(&pool, customer_id).await?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_name, "Soap");
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].line_total(), 7.50);
        assert_eq!(lines[1].product_name, "Chips");
        assert_eq!(lines[1].line_total(), 2.50);

        // A different customer sees an empty cart.
        assert!(list_cart_items(&pool, customer_id + 1).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn rejects_non_positive_quantities() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;
        let customer_id;
        {
            let conn = pool.lock().unwrap();
            customer_id = direct_insert_customer(&conn, "Ada Byron", "ada@example.com")?;
            direct_insert_product(&conn, &DirectProductArgs::new(1, "Soap", "Grooming", "Bath"))?;
        }

        assert!(add_cart_item(&pool, customer_id, 1, 0).await.is_err());
        assert!(add_cart_item(&pool, customer_id, 1, -4).await.is_err());
        assert!(list_cart_items(&pool, customer_id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_a_persistence_error() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;
        let customer_id;
        {
            let conn = pool.lock().unwrap();
            customer_id = direct_insert_customer(&conn, "Ada Byron", "ada@example.com")?;
        }

        let result = add_cart_item(&pool, customer_id, 999, 1).await;
        assert!(result.is_err(), "foreign keys reject unknown products");
        Ok(())
    }
}
