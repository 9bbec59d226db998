use crate::console::Console;
use crate::db::{self, DbPool};
use crate::errors::Result;
use std::io::{BufRead, Write};
use tracing::{debug, instrument};

/// Product detail screen.
///
/// Shows the full record (the internal id is deliberately withheld) and
/// offers supplier details, add-to-cart, and back. Adding to the cart
/// reports the outcome and stays on this screen.
#[instrument(skip(console, pool))]
pub async fn run_product_detail<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &DbPool,
    product_id: i64,
    customer_id: i64,
) -> Result<()> {
    loop {
        console.clear()?;
        console.header("PRODUCT DETAILS")?;

        let Some(product) = db::get_product(pool, product_id).await? else {
            console.warn("\nNo product found for this selection.")?;
            console.pause()?;
            return Ok(());
        };

        console.line(&format!("Product Name   : {}", product.name))?;
        console.line(&format!("Category       : {}", product.category))?;
        console.line(&format!("Subcategory    : {}", product.subcategory))?;
        console.line(&format!("Price          : {:.2}", product.price))?;
        console.line(&format!("Stock Quantity : {}", product.stock_qty))?;
        console.line(&format!(
            "Expiry Date    : {}",
            product.expiry_date.as_deref().unwrap_or("-")
        ))?;

        console.info("\nActions:")?;
        console.menu_entry(1, "View Supplier Details")?;
        console.menu_entry(2, "Add this product to Cart")?;
        console.line("  0) Back")?;

        let choice = console.read_menu_choice("Enter choice: ")?;
        debug!("Product detail choice: {}", choice);

        if choice == 0 {
            return Ok(());
        } else if choice == 1 {
            show_supplier_detail(console, pool, product_id).await?;
        } else if choice == 2 {
            let quantity = console.read_menu_choice("\nEnter quantity: ")?;
            match db::add_cart_item(pool, customer_id, product_id, quantity).await {
                Ok(_) => console.success("\nProduct added to cart.")?,
                Err(e) => {
                    debug!("Add to cart failed: {}", e);
                    console.warn("\nFailed to add to cart.")?;
                }
            }
            console.pause()?;
        } else {
            console.warn("Invalid choice. Try again.")?;
        }
    }
}

/// Display-only supplier screen; any input returns to the product detail.
async fn show_supplier_detail<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &DbPool,
    product_id: i64,
) -> Result<()> {
    console.clear()?;
    console.header("SUPPLIER DETAILS")?;

    match db::get_supplier_for_product(pool, product_id).await? {
        Some(supplier) => {
            console.line(&format!("Supplier Name   : {}", supplier.name))?;
            console.line(&format!(
                "Contact Number  : {}",
                supplier.contact.as_deref().unwrap_or("-")
            ))?;
            console.line(&format!(
                "Email           : {}",
                supplier.email.as_deref().unwrap_or("-")
            ))?;
            console.line(&format!(
                "Address         : {}",
                supplier.address.as_deref().unwrap_or("-")
            ))?;
        }
        None => console.warn("\nNo supplier found for this product.")?,
    }

    console.pause()?;
    Ok(())
}
