//! Ledger error types.
//!
//! This module defines every failure a ledger operation can raise. The
//! boundary layer translates these into caller-visible responses; the
//! service itself performs no recovery.

use rust_decimal::Decimal;
use thiserror::Error;

use teller_shared::AccountId;

/// Result type alias using `LedgerError`.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// PIN does not consist of exactly 4 ASCII digits.
    #[error("PIN must consist of exactly 4 digits")]
    InvalidPinFormat,

    /// Operation amount is zero or negative.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// PIN does not match the one on record.
    #[error("Invalid PIN for account {0}")]
    InvalidPin(AccountId),

    /// Balance is lower than the requested withdrawal.
    #[error(
        "Insufficient funds in account {account_id}: balance {balance}, requested {requested}"
    )]
    InsufficientFunds {
        /// The account being withdrawn from.
        account_id: AccountId,
        /// Balance at the time of the attempt.
        balance: Decimal,
        /// Amount that was requested.
        requested: Decimal,
    },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPinFormat => "INVALID_PIN_FORMAT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidPin(_) => "INVALID_PIN",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and business-rule failures
            Self::InvalidPinFormat | Self::InvalidAmount(_) | Self::InsufficientFunds { .. } => {
                400
            }

            // 401 Unauthorized - failed PIN authentication
            Self::InvalidPin(_) => 401,

            // 404 Not Found
            Self::AccountNotFound(_) => 404,

            // 500 Internal Server Error
            Self::Internal(_) => 500,
        }
    }
}
