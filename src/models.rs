use serde::{Deserialize, Serialize};

/// Full product record as stored in the `products` table.
///
/// Products are read-only from this application's point of view; they are
/// loaded for listings and the detail screen, never written.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub price: f64,
    pub stock_qty: i64,
    pub supplier_id: Option<i64>,
    pub expiry_date: Option<String>,
}

/// Narrow projection (id, name, price) used for the compact numbered
/// listing inside a category/subcategory. The id is kept internally for
/// the position-to-id mapping but is never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Customer fields before the database has assigned an id. The email
/// always comes from the login flow, never re-asked.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub address: String,
}

/// Cart line joined with product fields for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}
