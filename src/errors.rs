//! Unified error types and result handling.

use rust_decimal::Decimal;
use thiserror::Error;

/// Crate-wide error type. Store errors propagate unchanged through the core;
/// the only store condition the core absorbs is the expected duplicate-key
/// case during payout generation, which is handled at the insert statement
/// rather than by catching an error here.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or validation problem described by a message
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Any failure surfaced by the backing store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A monetary amount outside the accepted range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A return percentage outside [0, 100]
    #[error("Return percentage out of range: {value}")]
    InvalidPercentage {
        /// The rejected percentage
        value: Decimal,
    },

    /// A month key that does not match `YYYY-MM`
    #[error("Invalid month key '{value}', expected YYYY-MM")]
    InvalidMonthKey {
        /// The rejected key
        value: String,
    },

    /// Lookup of an investment id that does not exist
    #[error("Investment not found: {id}")]
    InvestmentNotFound {
        /// The missing investment id
        id: i64,
    },

    /// Lookup of a payout id that does not exist
    #[error("Payout not found: {id}")]
    PayoutNotFound {
        /// The missing payout id
        id: i64,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
