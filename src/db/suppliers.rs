use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::Supplier;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

/// Resolves the supplier for a product by following the product's supplier
/// reference.
///
/// Returns `Ok(None)` when the product does not exist or carries no
/// supplier reference.
#[instrument(skip(pool))]
pub async fn get_supplier_for_product(pool: &DbPool, product_id: i64) -> Result<Option<Supplier>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "SELECT s.id, s.name, s.contact, s.email, s.address
         FROM products p
         JOIN suppliers s ON p.supplier_id = s.id
         WHERE p.id = ?1",
    )?;
    let supplier = stmt
        .query_row(params![product_id], |row| {
            Ok(Supplier {
                id: row.get(0)?,
                name: row.get(1)?,
                contact: row.get(2)?,
                email: row.get(3)?,
                address: row.get(4)?,
            })
        })
        .optional()?;
    debug!(
        "Supplier lookup for product {}: found = {}",
        product_id,
        supplier.is_some()
    );
    Ok(supplier)
}
