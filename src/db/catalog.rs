use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::{Product, ProductSummary};
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, instrument};

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        subcategory: row.get(3)?,
        price: row.get(4)?,
        stock_qty: row.get(5)?,
        supplier_id: row.get(6)?,
        expiry_date: row.get(7)?,
    })
}

const PRODUCT_COLUMNS: &str =
    "id, name, category, subcategory, price, stock_qty, supplier_id, expiry_date";

/// Lists the distinct non-empty category strings, ascending.
///
/// Categories are a projection of the products table, not a stored entity;
/// empty strings never make it into a pick-list.
#[instrument(skip(pool))]
pub async fn list_categories(pool: &DbPool) -> Result<Vec<String>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT category FROM products WHERE category <> '' ORDER BY category ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut categories = Vec::new();
    for row in rows {
        categories.push(row.map_err(|e| Error::Database(format!("Failed to map category: {}", e)))?);
    }
    debug!("Fetched {} categories.", categories.len());
    Ok(categories)
}

/// Lists the distinct non-empty subcategory strings within `category`,
/// ascending. Subcategories are always loaded scoped to a category.
#[instrument(skip(pool))]
pub async fn list_subcategories(pool: &DbPool, category: &str) -> Result<Vec<String>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT subcategory FROM products
         WHERE category = ?1 AND subcategory <> ''
         ORDER BY subcategory ASC",
    )?;
    let rows = stmt.query_map(params![category], |row| row.get(0))?;

    let mut subcategories = Vec::new();
    for row in rows {
        subcategories
            .push(row.map_err(|e| Error::Database(format!("Failed to map subcategory: {}", e)))?);
    }
    debug!(
        "Fetched {} subcategories for category '{}'.",
        subcategories.len(),
        category
    );
    Ok(subcategories)
}

#[instrument(skip(pool))]
pub async fn list_all_products(pool: &DbPool) -> Result<Vec<Product>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map([], product_from_row)?;

    let mut products = Vec::new();
    for row in rows {
        products.push(row.map_err(|e| Error::Database(format!("Failed to map product row: {}", e)))?);
    }
    debug!("Fetched {} products.", products.len());
    Ok(products)
}

#[instrument(skip(pool))]
pub async fn list_products_in_category(pool: &DbPool, category: &str) -> Result<Vec<Product>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = ?1 ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map(params![category], product_from_row)?;

    let mut products = Vec::new();
    for row in rows {
        products.push(row.map_err(|e| Error::Database(format!("Failed to map product row: {}", e)))?);
    }
    debug!(
        "Fetched {} products in category '{}'.",
        products.len(),
        category
    );
    Ok(products)
}

/// Narrow (id, name, price) projection for the compact numbered listing
/// inside one category/subcategory, ordered by id.
///
/// # Errors
///
/// Returns `Error::Database` if the lock cannot be acquired or the query
/// fails. An empty `Vec` means genuinely no matching products.
#[instrument(skip(pool))]
pub async fn list_product_summaries(
    pool: &DbPool,
    category: &str,
    subcategory: &str,
) -> Result<Vec<ProductSummary>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, price FROM products
         WHERE category = ?1 AND subcategory = ?2
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![category, subcategory], |row| {
        Ok(ProductSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries
            .push(row.map_err(|e| Error::Database(format!("Failed to map summary row: {}", e)))?);
    }
    debug!(
        "Fetched {} summaries for '{}' / '{}'.",
        summaries.len(),
        category,
        subcategory
    );
    Ok(summaries)
}

/// Fetches the full record for one product by its internal id.
///
/// Returns `Ok(None)` when no such product exists; persistence faults are
/// `Err`, never conflated with "not found".
#[instrument(skip(pool))]
pub async fn get_product(pool: &DbPool, product_id: i64) -> Result<Option<Product>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
    ))?;
    let product = stmt
        .query_row(params![product_id], product_from_row)
        .optional()?;
    debug!(
        "Product lookup by id {}: found = {}",
        product_id,
        product.is_some()
    );
    Ok(product)
}
