//! Shared test utilities for the payout tracker.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::investment::{
        CreateInvestmentArgs, InvestmentStatus, InvestmentType, UpdateInvestmentArgs,
        create_investment, update_investment,
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds create-investment arguments with sensible defaults.
///
/// # Defaults
/// * `invested_amount`: 100000
/// * `return_percentage`: Some(2.00) (derived monthly payout: 2000.00)
/// * `investment_type`: Monthly
/// * `investment_date`: 2026-01-15
#[must_use]
pub fn test_investment_args(name: &str) -> CreateInvestmentArgs {
    CreateInvestmentArgs {
        name: name.to_string(),
        email: "investor@example.com".to_string(),
        phone_number: "9999999999".to_string(),
        invested_amount: Decimal::new(100_000, 0),
        investment_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        investment_type: InvestmentType::Monthly,
        return_percentage: Some(Decimal::new(200, 2)),
        upi_transaction_id: "UPI-TEST-0001".to_string(),
        notes: None,
    }
}

/// Creates a test investment with sensible defaults (see
/// [`test_investment_args`]).
pub async fn create_test_investment(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::investment::Model> {
    create_investment(db, test_investment_args(name)).await
}

/// Creates a test investment with a custom amount and return percentage.
/// Use this when a test needs specific derived payout values.
pub async fn create_custom_investment(
    db: &DatabaseConnection,
    name: &str,
    invested_amount: Decimal,
    return_percentage: Decimal,
) -> Result<entities::investment::Model> {
    let mut args = test_investment_args(name);
    args.invested_amount = invested_amount;
    args.return_percentage = Some(return_percentage);
    create_investment(db, args).await
}

/// Flips an investment to Inactive.
pub async fn deactivate_investment(
    db: &DatabaseConnection,
    investment_id: i64,
) -> Result<entities::investment::Model> {
    update_investment(
        db,
        investment_id,
        UpdateInvestmentArgs {
            status: Some(InvestmentStatus::Inactive),
            ..Default::default()
        },
    )
    .await
}

/// Sets up a complete test environment with one investment.
/// Returns (db, investment) for common test scenarios.
pub async fn setup_with_investment() -> Result<(DatabaseConnection, entities::investment::Model)> {
    let db = setup_test_db().await?;
    let investment = create_test_investment(&db, "Test Investor").await?;
    Ok((db, investment))
}
