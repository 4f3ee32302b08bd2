//! Account storage.

use dashmap::DashMap;

use teller_shared::AccountId;

use crate::account::Account;

/// Keyed store of accounts, indexed by [`AccountId`].
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<AccountId, Account>,
}

impl AccountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the account with the given id, if present.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(&id).map(|entry| entry.clone())
    }

    /// Inserts or replaces the account under its own id, returning the
    /// committed record.
    pub fn put(&self, account: Account) -> Account {
        let committed = account.clone();
        self.accounts.insert(account.id, account);
        committed
    }

    /// Returns the number of stored accounts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    /// Returns copies of all accounts, in no particular order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns copies of all accounts whose owner name matches exactly.
    #[must_use]
    pub fn find_by_owner(&self, owner_name: &str) -> Vec<Account> {
        self.accounts
            .iter()
            .filter(|entry| entry.value().owner_name == owner_name)
            .map(|entry| entry.value().clone())
            .collect()
    }
}
