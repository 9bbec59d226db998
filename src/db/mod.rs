pub mod cart;
pub mod catalog;
pub mod connection;
pub mod customers;
pub mod logins;
pub(crate) mod schema;
pub mod suppliers;
pub(crate) mod test_utils;

pub use cart::{add_cart_item, list_cart_items};
pub use catalog::{
    get_product, list_all_products, list_categories, list_product_summaries,
    list_products_in_category, list_subcategories,
};
pub use connection::{DbPool, init_db};
pub use customers::{insert_customer, resolve_customer_id};
pub use logins::record_login;
pub use suppliers::get_supplier_for_product;
