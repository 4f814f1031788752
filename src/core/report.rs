//! Report generation business logic.
//!
//! Renders investor and payout collections to CSV for download and computes
//! the dashboard headline figures. CSV rows come out in the order the caller
//! supplies; there is no implicit re-sort. All functions here are
//! presentation-free: they return strings and structured data for the CLI (or
//! any other surface) to emit.

use crate::{core::payout::PayoutWithInvestor, entities::investment, errors::Result};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Headline figures shown on the operator dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Number of registered investors
    pub total_investors: usize,
    /// Sum of all invested amounts
    pub total_invested: Decimal,
    /// Sum of all monthly payout obligations
    pub total_monthly_payout: Decimal,
}

/// Escapes one CSV field: values containing a comma, double quote, or newline
/// are wrapped in double quotes with internal quotes doubled; anything else
/// passes through unchanged.
#[must_use]
pub fn escape_csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| escape_csv_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders investors to CSV: a header row plus one row per investment, in the
/// order supplied.
#[must_use]
pub fn investments_to_csv(investments: &[investment::Model]) -> String {
    let header = [
        "Name",
        "Email",
        "Phone Number",
        "Invested Amount",
        "Investment Date",
        "Investment Type",
        "Return Percentage",
        "Monthly Payout",
        "UPI Transaction ID",
        "Total Paid Out",
        "Status",
        "Notes",
        "Created At",
        "Updated At",
    ]
    .map(str::to_string);

    let mut lines = vec![csv_line(&header)];
    for inv in investments {
        lines.push(csv_line(&[
            inv.name.clone(),
            inv.email.clone(),
            inv.phone_number.clone(),
            inv.invested_amount.to_string(),
            inv.investment_date.to_string(),
            inv.investment_type.clone(),
            inv.return_percentage.to_string(),
            inv.monthly_payout.to_string(),
            inv.upi_transaction_id.clone(),
            inv.total_paid_out.to_string(),
            inv.status.clone(),
            inv.notes.clone().unwrap_or_default(),
            inv.created_at.to_rfc3339(),
            inv.updated_at.to_rfc3339(),
        ]));
    }

    lines.join("\n")
}

/// Renders one month's payouts (joined with their investors) to CSV, in the
/// order supplied.
#[must_use]
pub fn payouts_to_csv(month_key: &str, payouts: &[PayoutWithInvestor]) -> String {
    let header = [
        "User Name",
        "Email",
        "Phone",
        "Invested Amount",
        "Monthly Payout",
        "Paid Month",
        "Status",
        "Date Paid",
        "Notes",
    ]
    .map(str::to_string);

    let mut lines = vec![csv_line(&header)];
    for row in payouts {
        lines.push(csv_line(&[
            row.investor.name.clone(),
            row.investor.email.clone(),
            row.investor.phone_number.clone(),
            row.investor.invested_amount.to_string(),
            row.payout.payout_amount.to_string(),
            month_key.to_string(),
            row.payout.status.clone(),
            row.payout
                .date_paid
                .map(|date| date.to_string())
                .unwrap_or_default(),
            row.payout.notes.clone().unwrap_or_default(),
        ]));
    }

    lines.join("\n")
}

/// Computes the dashboard headline figures from the full investor list.
pub async fn dashboard_stats(db: &DatabaseConnection) -> Result<DashboardStats> {
    let investments = crate::core::investment::get_all_investments(db).await?;

    let mut total_invested = Decimal::ZERO;
    let mut total_monthly_payout = Decimal::ZERO;
    for inv in &investments {
        total_invested += inv.invested_amount;
        total_monthly_payout += inv.monthly_payout;
    }

    Ok(DashboardStats {
        total_investors: investments.len(),
        total_invested,
        total_monthly_payout,
    })
}
