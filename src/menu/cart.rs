use crate::console::Console;
use crate::db::{self, DbPool};
use crate::errors::Result;
use std::io::{BufRead, Write};
use tracing::instrument;

/// Cart screen: lists the customer's cart lines with a running total,
/// then waits for the user before returning to the category menu.
#[instrument(skip(console, pool))]
pub async fn run_cart_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &DbPool,
    customer_id: i64,
) -> Result<()> {
    console.clear()?;
    console.header("YOUR CART")?;

    let lines = db::list_cart_items(pool, customer_id).await?;
    if lines.is_empty() {
        console.info("Your cart is empty.")?;
        console.pause()?;
        return Ok(());
    }

    console.line(&format!(
        "{:<35}{:>10}{:>6}{:>10}",
        "Product Name", "Price", "Qty", "Total"
    ))?;
    console.line(&"-".repeat(61))?;

    let mut total = 0.0;
    for line in &lines {
        console.line(&format!(
            "{:<35}{:>10.2}{:>6}{:>10.2}",
            line.product_name,
            line.unit_price,
            line.quantity,
            line.line_total()
        ))?;
        total += line.line_total();
    }

    console.line(&"-".repeat(61))?;
    console.success(&format!("{:<51}{total:>10.2}", "Cart total"))?;
    console.pause()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::test_support::{rendered, scripted};
    use crate::db::test_utils::{
        DirectProductArgs, direct_insert_customer, direct_insert_product, init_test_tracing,
        setup_test_db,
    };
    use crate::errors::Result;

    #[tokio::test]
    async fn lists_lines_and_totals() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;
        let customer_id;
        {
            let conn = pool.lock().unwrap();
            customer_id = direct_insert_customer(&conn, "Ada Byron", "ada@example.com")?;
            let mut soap = DirectProductArgs::new(1, "Soap", "Grooming", "Bath");
            soap.price = 2.50;
            direct_insert_product(&conn, &soap)?;
        }
        db::add_cart_item(&pool, customer_id, 1, 4).await?;

        let mut console = scripted("\n");
        run_cart_menu(&mut console, &pool, customer_id).await?;

        let output = rendered(console);
        assert!(output.contains("Soap"));
        assert!(output.contains("10.00"), "4 x 2.50 totals 10.00");
        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_says_so() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;
        let customer_id;
        {
            let conn = pool.lock().unwrap();
            customer_id = direct_insert_customer(&conn, "Ada Byron", "ada@example.com")?;
        }

        let mut console = scripted("\n");
        run_cart_menu(&mut console, &pool, customer_id).await?;

        assert!(rendered(console).contains("Your cart is empty."));
        Ok(())
    }
}
