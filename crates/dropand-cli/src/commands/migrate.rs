//! Database migration command.

use dropand_core::config::StoreProvider;
use dropand_core::error::AppError;
use dropand_database::connection::DatabasePool;
use dropand_database::migration::run_migrations;

use crate::output;

/// Execute the migrate command
pub async fn execute(config_path: Option<&str>) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    if config.database.provider == StoreProvider::Memory {
        output::print_warning("The in-memory store has no schema to migrate.");
        return Ok(());
    }

    let pool = DatabasePool::connect(&config.database).await?;
    println!("Running database migrations...");
    run_migrations(pool.pool()).await?;
    pool.close().await;

    output::print_success("All migrations applied.");
    Ok(())
}
