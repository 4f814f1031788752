//! Payout engine business logic.
//!
//! Handles the monthly payout lifecycle: idempotent generation of one payout
//! row per active investment per month, the Paid / Not Paid status machine,
//! joined month views, and summary aggregation. Generation never updates an
//! existing row; the unique index on `(investment_id, month_year)` plus an
//! on-conflict-do-nothing insert make repeated calls safe, including two
//! concurrent calls for the same month.

use crate::{
    entities::{Investment, Payout, investment, payout},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::fmt;
use tracing::{debug, warn};

/// Payment status of a single payout row. Both transitions are always legal;
/// there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutStatus {
    /// The month's obligation has been paid out
    Paid,
    /// The month's obligation is still open
    NotPaid,
}

impl PayoutStatus {
    /// The string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::NotPaid => "Not Paid",
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PayoutStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Paid" => Ok(Self::Paid),
            "Not Paid" => Ok(Self::NotPaid),
            other => Err(Error::Config {
                message: format!("Unknown payout status: {other}"),
            }),
        }
    }
}

/// Result of a generation pass for one month.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Month the pass covered
    pub month_key: String,
    /// Number of Active investments considered
    pub active_investments: usize,
    /// Number of payout rows actually inserted; rows that already existed are
    /// left untouched and not counted
    pub newly_created: u64,
}

/// A payout row joined with its owning investment, for month views and exports.
#[derive(Debug, Clone)]
pub struct PayoutWithInvestor {
    /// The payout row
    pub payout: payout::Model,
    /// The owning investment record
    pub investor: investment::Model,
}

/// Aggregate payout figures for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutSummary {
    /// Sum of all payout amounts for the month
    pub total_required: Decimal,
    /// Sum of payout amounts with status Paid
    pub total_paid: Decimal,
    /// `total_required - total_paid`; derived, never stored
    pub pending_payouts: Decimal,
    /// Number of Paid rows
    pub paid_count: usize,
    /// Number of Not Paid rows
    pub unpaid_count: usize,
}

/// Ensures exactly one payout row exists for every Active investment in the
/// given month.
///
/// Missing rows are created with the investment's current monthly payout as a
/// snapshot and status Not Paid. Rows that already exist are never touched:
/// the insert runs with on-conflict-do-nothing against the
/// `(investment_id, month_year)` unique index, so duplicates are silent
/// no-ops rather than errors and the call is safe to repeat.
///
/// # Errors
/// Returns [`Error::InvalidMonthKey`] for a malformed key; store failures
/// propagate unchanged. Zero active investments is a no-op, not an error.
pub async fn ensure_payouts_for_month(
    db: &DatabaseConnection,
    month_key: &str,
) -> Result<GenerationResult> {
    crate::core::month::parse_month_key(month_key)?;

    let active = crate::core::investment::get_active_investments(db).await?;
    if active.is_empty() {
        debug!("No active investments; nothing to generate for {month_key}");
        return Ok(GenerationResult {
            month_key: month_key.to_string(),
            active_investments: 0,
            newly_created: 0,
        });
    }

    let now = Utc::now();
    let rows: Vec<payout::ActiveModel> = active
        .iter()
        .map(|inv| payout::ActiveModel {
            investment_id: Set(inv.id),
            month_year: Set(month_key.to_string()),
            payout_amount: Set(inv.monthly_payout),
            status: Set(PayoutStatus::NotPaid.as_str().to_string()),
            date_paid: Set(None),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .collect();

    let newly_created = Payout::insert_many(rows)
        .on_conflict(
            OnConflict::columns([payout::Column::InvestmentId, payout::Column::MonthYear])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    debug!(
        "Generated {newly_created} payout rows for {month_key} ({} active investments)",
        active.len()
    );

    Ok(GenerationResult {
        month_key: month_key.to_string(),
        active_investments: active.len(),
        newly_created,
    })
}

/// Retrieves the month's payout rows joined with their investors, newest first.
pub async fn get_payouts_for_month(
    db: &DatabaseConnection,
    month_key: &str,
) -> Result<Vec<PayoutWithInvestor>> {
    crate::core::month::parse_month_key(month_key)?;

    let rows = Payout::find()
        .filter(payout::Column::MonthYear.eq(month_key))
        .order_by_desc(payout::Column::CreatedAt)
        .order_by_desc(payout::Column::Id)
        .find_also_related(Investment)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(payout, investor)| match investor {
            Some(investor) => Some(PayoutWithInvestor { payout, investor }),
            None => {
                warn!("Payout {} has no investment row; skipping", payout.id);
                None
            }
        })
        .collect())
}

/// Sets a payout's status, maintaining `date_paid` accordingly.
///
/// Marking Paid sets `date_paid` to the supplied date, or to today (UTC) when
/// omitted. Marking Not Paid clears `date_paid`. Supplied notes overwrite the
/// stored notes in either direction; absent notes are preserved.
///
/// # Errors
/// Returns [`Error::PayoutNotFound`] for an unknown id.
pub async fn set_payout_status(
    db: &DatabaseConnection,
    payout_id: i64,
    status: PayoutStatus,
    date_paid: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<payout::Model> {
    let existing = Payout::find_by_id(payout_id)
        .one(db)
        .await?
        .ok_or(Error::PayoutNotFound { id: payout_id })?;

    let mut active_model: payout::ActiveModel = existing.into();
    active_model.status = Set(status.as_str().to_string());
    active_model.date_paid = Set(match status {
        PayoutStatus::Paid => Some(date_paid.unwrap_or_else(|| Utc::now().date_naive())),
        PayoutStatus::NotPaid => None,
    });
    if let Some(notes) = notes {
        active_model.notes = Set(Some(notes));
    }
    active_model.updated_at = Set(Utc::now());

    active_model.update(db).await.map_err(Into::into)
}

/// Aggregates the month's payouts into summary figures.
///
/// All sums are exact decimal arithmetic over the stored amounts, so
/// `total_paid + pending_payouts == total_required` holds without drift and
/// the counts partition the row set. An empty month yields all zeros.
pub async fn summarize(db: &DatabaseConnection, month_key: &str) -> Result<PayoutSummary> {
    crate::core::month::parse_month_key(month_key)?;

    let rows = Payout::find()
        .filter(payout::Column::MonthYear.eq(month_key))
        .all(db)
        .await?;

    let mut total_required = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut paid_count = 0;
    let mut unpaid_count = 0;

    for row in &rows {
        total_required += row.payout_amount;
        if row.status == PayoutStatus::Paid.as_str() {
            total_paid += row.payout_amount;
            paid_count += 1;
        } else {
            unpaid_count += 1;
        }
    }

    Ok(PayoutSummary {
        total_required,
        total_paid,
        pending_payouts: total_required - total_paid,
        paid_count,
        unpaid_count,
    })
}

/// Formats a payout summary into a human-readable block for the CLI.
#[must_use]
pub fn format_payout_summary(month_key: &str, summary: &PayoutSummary) -> String {
    let label = crate::core::month::format_month_label(month_key)
        .unwrap_or_else(|_| month_key.to_string());

    let mut text = format!("Payout Summary - {label}\n");
    text.push_str(&format!(
        "  Required: {:.2} | Paid: {:.2} | Pending: {:.2}\n",
        summary.total_required, summary.total_paid, summary.pending_payouts
    ));
    text.push_str(&format!(
        "  {} paid, {} unpaid",
        summary.paid_count, summary.unpaid_count
    ));
    text
}
