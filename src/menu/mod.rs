pub mod cart;
pub mod catalog;
pub mod product;

pub use cart::run_cart_menu;
pub use catalog::{run_category_menu, run_product_list, run_subcategory_menu};
pub use product::run_product_detail;
