//! Transaction records.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use teller_shared::{AccountId, TransactionId};

/// Whether a transaction added to or removed from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money added to the account.
    Deposit,
    /// Money removed from the account.
    Withdraw,
}

impl TransactionKind {
    /// Returns the canonical string form, as rendered in API responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single committed ledger entry.
///
/// Entries are immutable once appended; there is no update or delete.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: TransactionId,
    /// The account this entry belongs to.
    pub account_id: AccountId,
    /// The amount moved, always positive.
    pub amount: Decimal,
    /// Deposit or withdrawal.
    pub kind: TransactionKind,
    /// When the transaction was committed.
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new transaction record stamped with the current time.
    #[must_use]
    pub fn new(account_id: AccountId, kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            amount,
            kind,
            timestamp: Utc::now(),
        }
    }
}
