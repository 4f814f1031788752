//! Investment entity - Represents one investor's registered capital placement.
//!
//! Each investment carries the investor's contact details, the invested amount,
//! the agreed return percentage, and the derived monthly payout. The monthly
//! payout is stored, not recomputed on read: editing the return percentage
//! later does not retroactively alter amounts already snapshotted into payouts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Investment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    /// Unique identifier for the investment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Investor's full name
    pub name: String,
    /// Investor's email address
    pub email: String,
    /// Investor's phone number
    pub phone_number: String,
    /// Capital placed by the investor, in currency units
    pub invested_amount: Decimal,
    /// Calendar date the investment was made
    pub investment_date: Date,
    /// Investment schedule: `"Daily"`, `"Monthly"`, or `"One-time"`
    pub investment_type: String,
    /// Agreed return percentage per month (0-100)
    pub return_percentage: Decimal,
    /// Derived monthly obligation: `invested_amount * return_percentage / 100`,
    /// rounded to 2 decimal places at create/edit time
    pub monthly_payout: Decimal,
    /// UPI transaction reference for the original transfer
    pub upi_transaction_id: String,
    /// Running total paid out to this investor, maintained by the operator
    pub total_paid_out: Decimal,
    /// Free-text operator notes
    pub notes: Option<String>,
    /// Lifecycle status: `"Active"` or `"Inactive"`. Inactive investments are
    /// excluded from payout generation; their historical payouts are retained.
    pub status: String,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Investment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One investment has many monthly payouts
    #[sea_orm(has_many = "super::payout::Entity")]
    Payouts,
}

impl Related<super::payout::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payouts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
