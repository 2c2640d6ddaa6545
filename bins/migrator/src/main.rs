//! Database migration runner for Tradewind.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use sea_orm_migration::prelude::*;
use tradewind_db::migration::Migrator;
use tradewind_shared::AppConfig;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // The migrator CLI reads DATABASE_URL; fall back to the app config.
    if std::env::var("DATABASE_URL").is_err() {
        if let Ok(config) = AppConfig::load() {
            std::env::set_var("DATABASE_URL", config.database.url);
        }
    }

    // Run the migrator CLI (it sets up its own tracing)
    cli::run_cli(Migrator).await;
}
