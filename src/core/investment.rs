//! Investment business logic - Handles all investor-record operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting
//! investments, plus the monthly payout derivation rule applied at create and
//! edit time. The derived payout is stored on the record; it is intentionally
//! NOT recomputed on read, so editing the return percentage later leaves
//! previously generated payout rows at their snapshotted amounts.

use crate::{
    entities::{Investment, Payout, investment, payout},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::fmt;

/// Lifecycle status of an investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentStatus {
    /// Included in payout generation
    Active,
    /// Excluded from payout generation; historical payouts are retained
    Inactive,
}

impl InvestmentStatus {
    /// The string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvestmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(Error::Config {
                message: format!("Unknown investment status: {other}"),
            }),
        }
    }
}

/// Payment schedule agreed with the investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentType {
    /// Daily return schedule
    Daily,
    /// Monthly return schedule
    Monthly,
    /// Single lump-sum arrangement
    OneTime,
}

impl InvestmentType {
    /// The string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
            Self::OneTime => "One-time",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvestmentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Daily" => Ok(Self::Daily),
            "Monthly" => Ok(Self::Monthly),
            "One-time" => Ok(Self::OneTime),
            other => Err(Error::Config {
                message: format!("Unknown investment type: {other}"),
            }),
        }
    }
}

/// Derives the monthly payout obligation from an invested amount and a return
/// percentage: `invested_amount * return_percentage / 100`, rounded half away
/// from zero to 2 decimal places.
///
/// Pure and total over any finite input; range validation belongs to the
/// create/update paths.
#[must_use]
pub fn derive_monthly_payout(invested_amount: Decimal, return_percentage: Decimal) -> Decimal {
    (invested_amount * return_percentage / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn validate_return_percentage(value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(Error::InvalidPercentage { value });
    }
    Ok(())
}

/// Arguments for creating a new investment record.
#[derive(Debug, Clone)]
pub struct CreateInvestmentArgs {
    /// Investor's full name
    pub name: String,
    /// Investor's email address
    pub email: String,
    /// Investor's phone number
    pub phone_number: String,
    /// Capital placed by the investor
    pub invested_amount: Decimal,
    /// Calendar date the investment was made
    pub investment_date: NaiveDate,
    /// Payment schedule
    pub investment_type: InvestmentType,
    /// Return percentage; when `None`, the settings default applies
    pub return_percentage: Option<Decimal>,
    /// UPI transaction reference for the original transfer
    pub upi_transaction_id: String,
    /// Free-text operator notes
    pub notes: Option<String>,
}

/// Partial update of an investment record. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateInvestmentArgs {
    /// New investor name
    pub name: Option<String>,
    /// New email address
    pub email: Option<String>,
    /// New phone number
    pub phone_number: Option<String>,
    /// New invested amount; triggers payout re-derivation
    pub invested_amount: Option<Decimal>,
    /// New investment date
    pub investment_date: Option<NaiveDate>,
    /// New payment schedule
    pub investment_type: Option<InvestmentType>,
    /// New return percentage; triggers payout re-derivation
    pub return_percentage: Option<Decimal>,
    /// New UPI transaction reference
    pub upi_transaction_id: Option<String>,
    /// New running total paid out
    pub total_paid_out: Option<Decimal>,
    /// New operator notes
    pub notes: Option<String>,
    /// New lifecycle status
    pub status: Option<InvestmentStatus>,
}

/// Creates a new investment record, performing input validation.
///
/// The name must be non-empty, the invested amount non-negative, and the
/// return percentage within [0, 100]. When no return percentage is supplied
/// the settings default is used. The monthly payout is derived here and
/// stored; new investments start Active with a zero paid-out total.
pub async fn create_investment(
    db: &DatabaseConnection,
    args: CreateInvestmentArgs,
) -> Result<investment::Model> {
    if args.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Investor name cannot be empty".to_string(),
        });
    }

    if args.invested_amount < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: args.invested_amount,
        });
    }

    let return_percentage = match args.return_percentage {
        Some(value) => value,
        None => crate::core::settings::default_return_percentage(db).await?,
    };
    validate_return_percentage(return_percentage)?;

    let monthly_payout = derive_monthly_payout(args.invested_amount, return_percentage);
    let now = Utc::now();

    let investment = investment::ActiveModel {
        name: Set(args.name.trim().to_string()),
        email: Set(args.email),
        phone_number: Set(args.phone_number),
        invested_amount: Set(args.invested_amount),
        investment_date: Set(args.investment_date),
        investment_type: Set(args.investment_type.as_str().to_string()),
        return_percentage: Set(return_percentage),
        monthly_payout: Set(monthly_payout),
        upi_transaction_id: Set(args.upi_transaction_id),
        total_paid_out: Set(Decimal::ZERO),
        notes: Set(args.notes),
        status: Set(InvestmentStatus::Active.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    investment.insert(db).await.map_err(Into::into)
}

/// Retrieves all investments, newest first.
pub async fn get_all_investments(db: &DatabaseConnection) -> Result<Vec<investment::Model>> {
    Investment::find()
        .order_by_desc(investment::Column::CreatedAt)
        .order_by_desc(investment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all Active investments. This is the set payout generation draws
/// from.
pub async fn get_active_investments(db: &DatabaseConnection) -> Result<Vec<investment::Model>> {
    Investment::find()
        .filter(investment::Column::Status.eq(InvestmentStatus::Active.as_str()))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an investment by its unique ID.
pub async fn get_investment_by_id(
    db: &DatabaseConnection,
    investment_id: i64,
) -> Result<Option<investment::Model>> {
    Investment::find_by_id(investment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to an investment.
///
/// When the invested amount or the return percentage changes, the monthly
/// payout is re-derived from the resulting pair. Payout rows already
/// generated keep their snapshotted amounts.
pub async fn update_investment(
    db: &DatabaseConnection,
    investment_id: i64,
    args: UpdateInvestmentArgs,
) -> Result<investment::Model> {
    let existing = Investment::find_by_id(investment_id)
        .one(db)
        .await?
        .ok_or(Error::InvestmentNotFound { id: investment_id })?;

    if let Some(name) = &args.name {
        if name.trim().is_empty() {
            return Err(Error::Config {
                message: "Investor name cannot be empty".to_string(),
            });
        }
    }
    if let Some(amount) = args.invested_amount {
        if amount < Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }
    }
    if let Some(value) = args.return_percentage {
        validate_return_percentage(value)?;
    }
    if let Some(total) = args.total_paid_out {
        if total < Decimal::ZERO {
            return Err(Error::InvalidAmount { amount: total });
        }
    }

    let new_amount = args.invested_amount.unwrap_or(existing.invested_amount);
    let new_percentage = args.return_percentage.unwrap_or(existing.return_percentage);
    let rederive = args.invested_amount.is_some() || args.return_percentage.is_some();

    let mut active_model: investment::ActiveModel = existing.into();
    if let Some(name) = args.name {
        active_model.name = Set(name.trim().to_string());
    }
    if let Some(email) = args.email {
        active_model.email = Set(email);
    }
    if let Some(phone_number) = args.phone_number {
        active_model.phone_number = Set(phone_number);
    }
    if let Some(amount) = args.invested_amount {
        active_model.invested_amount = Set(amount);
    }
    if let Some(date) = args.investment_date {
        active_model.investment_date = Set(date);
    }
    if let Some(investment_type) = args.investment_type {
        active_model.investment_type = Set(investment_type.as_str().to_string());
    }
    if let Some(value) = args.return_percentage {
        active_model.return_percentage = Set(value);
    }
    if let Some(upi_transaction_id) = args.upi_transaction_id {
        active_model.upi_transaction_id = Set(upi_transaction_id);
    }
    if let Some(total) = args.total_paid_out {
        active_model.total_paid_out = Set(total);
    }
    if let Some(notes) = args.notes {
        active_model.notes = Set(Some(notes));
    }
    if let Some(status) = args.status {
        active_model.status = Set(status.as_str().to_string());
    }
    if rederive {
        active_model.monthly_payout = Set(derive_monthly_payout(new_amount, new_percentage));
    }
    active_model.updated_at = Set(Utc::now());

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes an investment together with its payout rows.
///
/// Both deletions happen in one transaction so a failure cannot leave
/// orphaned payouts behind.
pub async fn delete_investment(db: &DatabaseConnection, investment_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Investment::find_by_id(investment_id)
        .one(&txn)
        .await?
        .ok_or(Error::InvestmentNotFound { id: investment_id })?;

    Payout::delete_many()
        .filter(payout::Column::InvestmentId.eq(investment_id))
        .exec(&txn)
        .await?;

    Investment::delete_by_id(investment_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_derive_monthly_payout_examples() {
        assert_eq!(
            derive_monthly_payout(dec!(100000), dec!(2.00)),
            dec!(2000.00)
        );
        assert_eq!(derive_monthly_payout(dec!(0), dec!(5.00)), dec!(0.00));
        // 333.33 * 2.50 / 100 = 8.33325 -> 8.33
        assert_eq!(derive_monthly_payout(dec!(333.33), dec!(2.50)), dec!(8.33));
    }

    #[test]
    fn test_derive_monthly_payout_rounds_half_up() {
        assert_eq!(derive_monthly_payout(dec!(1000), dec!(0.125)), dec!(1.25));
        // 1004 * 0.125 / 100 = 1.255, a midpoint: rounds away from zero
        assert_eq!(derive_monthly_payout(dec!(1004), dec!(0.125)), dec!(1.26));
    }

    #[test]
    fn test_status_and_type_round_trip_strings() {
        assert_eq!(
            "Active".parse::<InvestmentStatus>().unwrap(),
            InvestmentStatus::Active
        );
        assert_eq!(
            "One-time".parse::<InvestmentType>().unwrap(),
            InvestmentType::OneTime
        );
        assert_eq!(InvestmentType::OneTime.as_str(), "One-time");
        assert!("paid".parse::<InvestmentStatus>().is_err());
    }

    #[tokio::test]
    async fn test_create_investment_derives_payout() -> Result<()> {
        let db = setup_test_db().await?;

        let investment = create_test_investment(&db, "Asha Verma").await?;

        assert_eq!(investment.name, "Asha Verma");
        assert_eq!(investment.invested_amount, dec!(100000));
        assert_eq!(investment.return_percentage, dec!(2.00));
        assert_eq!(investment.monthly_payout, dec!(2000.00));
        assert_eq!(investment.total_paid_out, Decimal::ZERO);
        assert_eq!(investment.status, "Active");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_investment_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let mut args = test_investment_args("  ");
        let result = create_investment(&db, args.clone()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Config { message: _ }
        ));

        args.name = "Valid".to_string();
        args.invested_amount = dec!(-1);
        let result = create_investment(&db, args.clone()).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        args.invested_amount = dec!(1000);
        args.return_percentage = Some(dec!(100.01));
        let result = create_investment(&db, args).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidPercentage { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_investment_uses_settings_default_percentage() -> Result<()> {
        let db = setup_test_db().await?;

        crate::core::settings::update_settings(
            &db,
            crate::core::settings::SettingsUpdate {
                default_return_percentage: Some(dec!(3.50)),
                ..Default::default()
            },
        )
        .await?;

        let mut args = test_investment_args("Defaulted");
        args.return_percentage = None;
        let investment = create_investment(&db, args).await?;

        assert_eq!(investment.return_percentage, dec!(3.50));
        assert_eq!(investment.monthly_payout, dec!(3500.00));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_investment_rederives_payout() -> Result<()> {
        let (db, investment) = setup_with_investment().await?;

        let updated = update_investment(
            &db,
            investment.id,
            UpdateInvestmentArgs {
                return_percentage: Some(dec!(4.00)),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.return_percentage, dec!(4.00));
        assert_eq!(updated.monthly_payout, dec!(4000.00));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_investment_without_amount_keeps_payout() -> Result<()> {
        let (db, investment) = setup_with_investment().await?;

        let updated = update_investment(
            &db,
            investment.id,
            UpdateInvestmentArgs {
                notes: Some("switched bank".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.monthly_payout, investment.monthly_payout);
        assert_eq!(updated.notes, Some("switched bank".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_investment_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_investment(&db, 999, UpdateInvestmentArgs::default()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvestmentNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_active_investments_excludes_inactive() -> Result<()> {
        let db = setup_test_db().await?;

        let active = create_test_investment(&db, "Active Investor").await?;
        let inactive = create_test_investment(&db, "Inactive Investor").await?;
        deactivate_investment(&db, inactive.id).await?;

        let result = get_active_investments(&db).await?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, active.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_investment_removes_payouts() -> Result<()> {
        let (db, investment) = setup_with_investment().await?;

        crate::core::payout::ensure_payouts_for_month(&db, "2026-08").await?;
        assert_eq!(Payout::find().all(&db).await?.len(), 1);

        delete_investment(&db, investment.id).await?;

        assert!(get_investment_by_id(&db, investment.id).await?.is_none());
        assert!(Payout::find().all(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_investment_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_investment(&db, 42).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvestmentNotFound { id: 42 }
        ));

        Ok(())
    }
}
