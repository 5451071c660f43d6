//! Database migration runner for Civica.
//!
//! Usage:
//!   migrator up      - Apply pending migrations (creates `attachments`)
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-apply migrations
//!
//! The connection string is read from `DATABASE_URL`.

use civica_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
