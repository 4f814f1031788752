//! Database configuration module for the payout tracker.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL. The one
//! piece of schema the entities cannot express is the composite unique index on
//! `payouts(investment_id, month_year)`, which is created here explicitly; payout generation
//! relies on it to turn duplicate inserts into no-ops.

use crate::entities::{Investment, Payout, Settings, payout};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/payout_tracker.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// Table creation is idempotent (`IF NOT EXISTS`) so this can run on every startup.
/// After the tables, this creates the unique index on `payouts(investment_id, month_year)`
/// that backs the at-most-one-payout-per-investor-month invariant.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut investment_table = schema.create_table_from_entity(Investment);
    let mut payout_table = schema.create_table_from_entity(Payout);
    let mut settings_table = schema.create_table_from_entity(Settings);

    db.execute(builder.build(investment_table.if_not_exists()))
        .await?;
    db.execute(builder.build(payout_table.if_not_exists()))
        .await?;
    db.execute(builder.build(settings_table.if_not_exists()))
        .await?;

    let payout_unique_index = Index::create()
        .if_not_exists()
        .name("idx_unique_payout_investment_month")
        .table(Payout)
        .col(payout::Column::InvestmentId)
        .col(payout::Column::MonthYear)
        .unique()
        .to_owned();
    db.execute(builder.build(&payout_unique_index)).await?;

    Ok(())
}
