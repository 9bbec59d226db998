#![allow(dead_code)]
use crate::db::{DbPool, schema};
use crate::errors::{Error, Result};
use rusqlite::{Connection, params};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// In-memory pool with the full schema, fresh per test.
pub(crate) async fn setup_test_db() -> Result<DbPool> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::Database(format!("Test DB: Failed to open in-memory: {}", e)))?;
    conn.execute("PRAGMA foreign_keys = ON;", [])
        .map_err(|e| Error::Database(format!("Test DB: Failed to enable foreign keys: {}", e)))?;
    schema::create_tables(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub(crate) struct DirectProductArgs<'a> {
    pub(crate) id: i64,
    pub(crate) name: &'a str,
    pub(crate) category: &'a str,
    pub(crate) subcategory: &'a str,
    pub(crate) price: f64,
    pub(crate) stock_qty: i64,
    pub(crate) supplier_id: Option<i64>,
    pub(crate) expiry_date: Option<&'a str>,
}

impl<'a> DirectProductArgs<'a> {
    pub(crate) fn new(id: i64, name: &'a str, category: &'a str, subcategory: &'a str) -> Self {
        Self {
            id,
            name,
            category,
            subcategory,
            price: 1.0,
            stock_qty: 5,
            supplier_id: None,
            expiry_date: None,
        }
    }
}

/// Seeds one product row directly, bypassing the gateway, for focused tests.
pub(crate) fn direct_insert_product(conn: &Connection, args: &DirectProductArgs<'_>) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO products (id, name, category, subcategory, price, stock_qty, supplier_id, expiry_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    stmt.execute(params![
        args.id,
        args.name,
        args.category,
        args.subcategory,
        args.price,
        args.stock_qty,
        args.supplier_id,
        args.expiry_date
    ])?;
    Ok(())
}

pub(crate) fn direct_insert_supplier(
    conn: &Connection,
    name: &str,
    contact: Option<&str>,
    email: Option<&str>,
    address: Option<&str>,
) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO suppliers (name, contact, email, address) VALUES (?1, ?2, ?3, ?4)",
    )?;
    let id = stmt.insert(params![name, contact, email, address])?;
    Ok(id)
}

pub(crate) fn direct_insert_customer(conn: &Connection, name: &str, email: &str) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO customers (name, contact, email, address) VALUES (?1, '555-0000', ?2, 'n/a')",
    )?;
    let id = stmt.insert(params![name, email])?;
    Ok(id)
}
