mod config;
mod console;
mod db;
mod errors;
mod login;
mod menu;
mod models;
mod registration;

use crate::console::Console;
use crate::errors::{Error, Result};
use crate::login::LoginPolicy;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;
    info!("Successfully processed application configuration.");

    // 4. Initialize the database (single pool for the whole session)
    let db_pool = db::init_db(&app_config.database_path)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    let mut console = Console::stdio();

    // 5. Login; the returned email is the identity for the session
    let policy = LoginPolicy {
        max_password_attempts: app_config.login.max_password_attempts,
    };
    let Some(email) = login::run_login(&mut console, &db_pool, policy).await? else {
        error!("Exiting due to login failure.");
        return Err(Error::Login(
            "login aborted after too many invalid passwords".to_string(),
        ));
    };
    console.pause()?;

    // 6. Register the customer against the login email
    let customer_id = registration::register_customer(&mut console, &db_pool, &email).await?;

    // 7. Interactive catalog navigation until the user picks "exit"
    menu::run_category_menu(&mut console, &db_pool, customer_id).await?;

    console.clear()?;
    console.line("Goodbye!")?;
    Ok(())
}
