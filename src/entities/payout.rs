//! Payout entity - Represents one month's payment obligation for one investment.
//!
//! Rows are materialized in bulk by the generation step, never created one at a
//! time by an operator. The `payout_amount` is a snapshot of the investment's
//! monthly payout at generation time. At most one row exists per
//! `(investment_id, month_year)` pair; the unique index enforcing this is
//! created in [`crate::config::database::create_tables`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payout database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payouts")]
pub struct Model {
    /// Unique identifier for the payout
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the investment this payout belongs to
    pub investment_id: i64,
    /// Calendar month this obligation covers, in `YYYY-MM` form
    pub month_year: String,
    /// Amount owed for the month, snapshotted from the investment at generation
    pub payout_amount: Decimal,
    /// Payment status: `"Paid"` or `"Not Paid"`
    pub status: String,
    /// Date the payout was made; set on Paid, cleared on undo
    pub date_paid: Option<Date>,
    /// Free-text operator notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Payout and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payout belongs to one investment
    #[sea_orm(
        belongs_to = "super::investment::Entity",
        from = "Column::InvestmentId",
        to = "super::investment::Column::Id"
    )]
    Investment,
}

impl Related<super::investment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
