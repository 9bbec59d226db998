use crate::console::Console;
use crate::db::{self, DbPool};
use crate::errors::Result;
use crate::menu::cart::run_cart_menu;
use crate::menu::product::run_product_detail;
use crate::models::Product;
use std::io::{BufRead, Write};
use tracing::{debug, instrument};

/// Full-record product table. Raw ids are held internally but never
/// rendered; only human-readable fields reach the screen.
fn render_product_table<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    products: &[Product],
) -> Result<()> {
    console.line(&format!(
        "{:<28}{:<18}{:<18}{:>8}  {:>6}  {:<12}",
        "Product Name", "Category", "Subcategory", "Price", "Stock", "Expiry"
    ))?;
    console.line(&"-".repeat(94))?;
    for product in products {
        console.line(&format!(
            "{:<28}{:<18}{:<18}{:>8.2}  {:>6}  {:<12}",
            product.name,
            product.category,
            product.subcategory,
            product.price,
            product.stock_qty,
            product.expiry_date.as_deref().unwrap_or("-")
        ))?;
    }
    Ok(())
}

/// Top-level screen: the category menu.
///
/// Selecting a category descends into its subcategory menu; the two extra
/// entries are "view all products" and "view cart"; 0 exits. Any other
/// input re-displays the menu unchanged.
#[instrument(skip(console, pool))]
pub async fn run_category_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &DbPool,
    customer_id: i64,
) -> Result<()> {
    loop {
        console.clear()?;
        console.header("CATEGORY MENU")?;

        // Re-queried on every pass; nothing is cached between screens.
        let categories = db::list_categories(pool).await?;

        console.info("Available Categories:\n")?;
        for (i, category) in categories.iter().enumerate() {
            console.menu_entry(i + 1, category)?;
        }
        let all_products_entry = categories.len() + 1;
        let cart_entry = categories.len() + 2;
        console.blank()?;
        console.menu_entry(all_products_entry, "View ALL Products")?;
        console.menu_entry(cart_entry, "View Cart")?;
        console.line("  0) Exit\n")?;
        console.rule()?;

        let choice = console.read_menu_choice("Enter your choice: ")?;
        debug!("Category menu choice: {}", choice);

        if choice == 0 {
            return Ok(());
        } else if choice == all_products_entry as i64 {
            console.clear()?;
            console.header("ALL PRODUCTS")?;
            let products = db::list_all_products(pool).await?;
            render_product_table(console, &products)?;
            console.pause()?;
        } else if choice == cart_entry as i64 {
            run_cart_menu(console, pool, customer_id).await?;
        } else if choice >= 1 && choice <= categories.len() as i64 {
            let selected = categories[(choice - 1) as usize].clone();
            run_subcategory_menu(console, pool, &selected, customer_id).await?;
        } else {
            console.warn("Invalid choice. Try again.")?;
        }
    }
}

/// Subcategory menu for one category. When the category has no
/// subcategories the menu degrades to "view all products in this
/// category" and back.
#[instrument(skip(console, pool))]
pub async fn run_subcategory_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &DbPool,
    category: &str,
    customer_id: i64,
) -> Result<()> {
    loop {
        console.clear()?;
        console.header(&format!("SUBCATEGORY MENU - {category}"))?;

        let subcategories = db::list_subcategories(pool, category).await?;

        if subcategories.is_empty() {
            console.warn(&format!("No subcategories found for \"{category}\".\n"))?;
            console.menu_entry(1, "View all products in this category")?;
            console.line("  0) Back\n")?;
            console.rule()?;

            let choice = console.read_menu_choice("Enter your choice: ")?;
            if choice == 0 {
                return Ok(());
            } else if choice == 1 {
                console.clear()?;
                console.header(&format!("PRODUCTS - {category}"))?;
                let products = db::list_products_in_category(pool, category).await?;
                render_product_table(console, &products)?;
                console.pause()?;
            } else {
                console.warn("Invalid choice. Try again.")?;
            }
            continue;
        }

        console.info(&format!("Subcategories in \"{category}\":\n"))?;
        for (j, sub) in subcategories.iter().enumerate() {
            console.menu_entry(j + 1, sub)?;
        }
        console.line("\n  0) Back\n")?;
        console.rule()?;

        let choice = console.read_menu_choice("Enter your choice: ")?;
        debug!("Subcategory menu choice: {}", choice);

        if choice == 0 {
            return Ok(());
        } else if choice >= 1 && choice <= subcategories.len() as i64 {
            let selected = subcategories[(choice - 1) as usize].clone();
            run_product_list(console, pool, category, &selected, customer_id).await?;
        } else {
            console.warn("Invalid choice. Try again.")?;
        }
    }
}

/// Compact numbered listing for one category/subcategory.
///
/// The displayed 1-based positions map to internal product ids; the
/// mapping is rebuilt on every render and is valid only until the next
/// re-query.
#[instrument(skip(console, pool))]
pub async fn run_product_list<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &DbPool,
    category: &str,
    subcategory: &str,
    customer_id: i64,
) -> Result<()> {
    loop {
        console.clear()?;
        console.header(&format!("PRODUCTS - {category} / {subcategory}"))?;

        let summaries = db::list_product_summaries(pool, category, subcategory).await?;
        if summaries.is_empty() {
            console.warn("\nNo products found in this subcategory.")?;
            console.pause()?;
            return Ok(());
        }

        console.line(&format!("{:<6}{:<35}{:>8}", "No.", "Product Name", "Price"))?;
        console.line(&"-".repeat(49))?;
        for (position, summary) in summaries.iter().enumerate() {
            console.line(&format!(
                "{:<6}{:<35}{:>8.2}",
                position + 1,
                summary.name,
                summary.price
            ))?;
        }

        console.info("\nOptions:")?;
        console.menu_entry(1, "View product details (choose by number)")?;
        console.line("  0) Back\n")?;

        let choice = console.read_menu_choice("Enter your choice: ")?;
        if choice == 0 {
            return Ok(());
        } else if choice == 1 {
            let position = console.read_menu_choice("\nEnter item number shown in the list: ")?;
            if position >= 1 && position <= summaries.len() as i64 {
                let product_id = summaries[(position - 1) as usize].id;
                run_product_detail(console, pool, product_id, customer_id).await?;
            } else {
                console.warn("Invalid item number.")?;
            }
        } else {
            console.warn("Invalid choice. Try again.")?;
        }
    }
}
