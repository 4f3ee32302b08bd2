//! Append-only transaction log.

use dashmap::DashMap;

use teller_shared::AccountId;

use crate::transaction::Transaction;

/// Append-only log of committed transactions, grouped by account.
///
/// Entries for one account are kept in append order, so a per-account
/// listing reads back in the order the operations committed. There is no
/// way to update or remove an entry.
#[derive(Debug, Default)]
pub struct TransactionLog {
    by_account: DashMap<AccountId, Vec<Transaction>>,
}

impl TransactionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction to its account's history, returning the
    /// committed record.
    pub fn append(&self, transaction: Transaction) -> Transaction {
        let committed = transaction.clone();
        self.by_account
            .entry(transaction.account_id)
            .or_default()
            .push(transaction);
        committed
    }

    /// Returns copies of the account's entries, oldest first.
    ///
    /// An account with no history yields an empty list.
    #[must_use]
    pub fn list_by_account(&self, account_id: AccountId) -> Vec<Transaction> {
        self.by_account
            .get(&account_id)
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Returns the total number of entries across all accounts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.by_account.iter().map(|entries| entries.len()).sum()
    }
}
