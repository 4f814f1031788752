//! Month-key utilities.
//!
//! Payouts are partitioned by calendar month using keys in `YYYY-MM` form.
//! This module owns parsing and formatting of those keys, the month window
//! offered to operators when picking a month, and the overdue predicate used
//! when displaying unpaid payouts. All "now"-dependent functions have a pure
//! variant taking an explicit date; the convenience wrappers use UTC, which is
//! the fixed reference timezone for every deployment of this system.

use crate::core::payout::PayoutStatus;
use crate::errors::{Error, Result};
use chrono::{Datelike, Months, NaiveDate, Utc};

/// Day of month after which an unpaid payout for the current month counts as
/// overdue.
pub const OVERDUE_CUTOFF_DAY: u32 = 5;

/// How many months back the month picker reaches.
const MONTHS_BACK: u32 = 12;
/// How many months forward the month picker reaches.
const MONTHS_FORWARD: u32 = 3;

/// One selectable month: the `YYYY-MM` key and a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    /// Month key in `YYYY-MM` form
    pub key: String,
    /// Display label, e.g. `"January 2026"`
    pub label: String,
}

/// Returns the month key for the current month (UTC).
#[must_use]
pub fn current_month_key() -> String {
    month_key_for(Utc::now().date_naive())
}

/// Returns the `YYYY-MM` key of the month containing `date`.
#[must_use]
pub fn month_key_for(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parses a `YYYY-MM` month key into the first day of that month.
///
/// The format is strict: four digits, a dash, two digits, month in 01-12.
///
/// # Errors
/// Returns [`Error::InvalidMonthKey`] for anything else.
pub fn parse_month_key(key: &str) -> Result<NaiveDate> {
    let invalid = || Error::InvalidMonthKey {
        value: key.to_string(),
    };

    let (year_part, month_part) = key.split_once('-').ok_or_else(invalid)?;
    if year_part.len() != 4
        || month_part.len() != 2
        || !year_part.bytes().all(|b| b.is_ascii_digit())
        || !month_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month: u32 = month_part.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Formats a month key as a display label like `"January 2026"`.
///
/// # Errors
/// Returns [`Error::InvalidMonthKey`] if the key is malformed.
pub fn format_month_label(key: &str) -> Result<String> {
    let first_of_month = parse_month_key(key)?;
    Ok(first_of_month.format("%B %Y").to_string())
}

/// Returns the selectable month window relative to today (UTC): twelve months
/// back through three months forward, chronologically ascending.
#[must_use]
pub fn month_options() -> Vec<MonthOption> {
    month_options_from(Utc::now().date_naive())
}

/// Returns the selectable month window relative to `today`, ascending.
#[must_use]
pub fn month_options_from(today: NaiveDate) -> Vec<MonthOption> {
    // Anchor on the first of the month so month arithmetic never clips days.
    let anchor = today.with_day(1).unwrap_or(today);

    let earliest = anchor
        .checked_sub_months(Months::new(MONTHS_BACK))
        .unwrap_or(anchor);

    let mut options = Vec::with_capacity((MONTHS_BACK + MONTHS_FORWARD + 1) as usize);
    let mut month = earliest;
    for _ in 0..=(MONTHS_BACK + MONTHS_FORWARD) {
        options.push(MonthOption {
            key: month_key_for(month),
            label: month.format("%B %Y").to_string(),
        });
        match month.checked_add_months(Months::new(1)) {
            Some(next) => month = next,
            None => break,
        }
    }

    options
}

/// Returns true if an unpaid payout for `month_key` counts as overdue today (UTC).
///
/// Display-only predicate, never persisted.
#[must_use]
pub fn is_overdue(status: PayoutStatus, month_key: &str) -> bool {
    is_overdue_on(status, month_key, Utc::now().date_naive())
}

/// Returns true iff `status` is Not Paid, `month_key` is the month containing
/// `today`, and the day of month is past [`OVERDUE_CUTOFF_DAY`].
///
/// Past months are never overdue: once a month has rolled over, the unpaid
/// rows are stale obligations rather than a this-month reminder.
#[must_use]
pub fn is_overdue_on(status: PayoutStatus, month_key: &str, today: NaiveDate) -> bool {
    status == PayoutStatus::NotPaid
        && month_key == month_key_for(today)
        && today.day() > OVERDUE_CUTOFF_DAY
}
