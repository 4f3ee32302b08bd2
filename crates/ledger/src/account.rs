//! Account record and PIN handling.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use teller_shared::AccountId;

use crate::error::{LedgerError, LedgerResult};

/// A 4-digit account PIN.
///
/// Held in memory as entered; the wrapper keeps it out of `Debug` output
/// and off the wire, since nothing outside this crate needs to read it back.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Parses a candidate PIN, requiring exactly 4 ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidPinFormat` for any other input,
    /// including non-ASCII digits and surrounding whitespace.
    pub fn parse(candidate: &str) -> LedgerResult<Self> {
        if candidate.len() == 4 && candidate.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(LedgerError::InvalidPinFormat)
        }
    }

    /// Returns `true` if `candidate` matches this PIN exactly.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(\"****\")")
    }
}

/// A customer account.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Display name of the account owner.
    pub owner_name: String,
    /// The account PIN, checked on withdrawal.
    pub pin: Pin,
    /// Current balance.
    pub balance: Decimal,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidPinFormat` if `pin` is not exactly
    /// 4 ASCII digits.
    pub fn new(owner_name: impl Into<String>, pin: &str) -> LedgerResult<Self> {
        let pin = Pin::parse(pin)?;
        Ok(Self {
            id: AccountId::new(),
            owner_name: owner_name.into(),
            pin,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        })
    }
}
