//! Ledger service for account operations.
//!
//! This module provides the core business logic for money movement: PIN
//! authentication, balance mutation, and transaction logging. All rules
//! live here; the HTTP layer only translates requests and failures.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use teller_shared::AccountId;

use crate::account::Account;
use crate::error::{LedgerError, LedgerResult};
use crate::store::{AccountStore, TransactionLog};
use crate::transaction::{Transaction, TransactionKind};

/// Ledger service holding the stores and the per-account lock registry.
///
/// Constructed once at process start and shared behind an `Arc`. Mutating
/// operations on the same account serialize on a per-account mutex;
/// operations on different accounts run fully in parallel.
pub struct LedgerService {
    accounts: Arc<AccountStore>,
    transactions: Arc<TransactionLog>,
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl LedgerService {
    /// Creates a service over the given stores.
    #[must_use]
    pub fn new(accounts: Arc<AccountStore>, transactions: Arc<TransactionLog>) -> Self {
        Self {
            accounts,
            transactions,
            locks: DashMap::new(),
        }
    }

    /// Returns the lock guarding the given account's critical section.
    ///
    /// Locks are created on first use and never removed; accounts are never
    /// deleted. The map guard is dropped before the mutex is awaited.
    fn lock_for(&self, account_id: AccountId) -> Arc<Mutex<()>> {
        self.locks.entry(account_id).or_default().value().clone()
    }

    /// Create a new account with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidPinFormat` if `pin` is not exactly
    /// 4 ASCII digits.
    pub fn create_account(
        &self,
        owner_name: impl Into<String>,
        pin: &str,
    ) -> LedgerResult<Account> {
        let account = Account::new(owner_name, pin)?;
        Ok(self.accounts.put(account))
    }

    /// Deposit `amount` into an account.
    ///
    /// Inside the account's critical section: fetch, add to the balance,
    /// persist the account, then append a DEPOSIT entry stamped at commit
    /// time. Callers re-fetch the balance if they need it.
    ///
    /// # Errors
    ///
    /// In order: `InvalidAmount` if `amount <= 0`, `AccountNotFound` if the
    /// id does not resolve. `Internal` if the balance would overflow.
    pub async fn deposit(&self, account_id: AccountId, amount: Decimal) -> LedgerResult<()> {
        // 1. Validate amount before touching the account
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }

        // 2. Per-account critical section
        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut account = self
            .accounts
            .get(account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        // 3. Mutate and persist, account write before log append
        account.balance = account.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::Internal(format!("balance overflow on deposit to {account_id}"))
        })?;
        self.accounts.put(account);

        self.transactions
            .append(Transaction::new(account_id, TransactionKind::Deposit, amount));

        Ok(())
    }

    /// Withdraw `amount` from an account, authenticating with `pin`.
    ///
    /// Same critical section shape as [`deposit`](Self::deposit); the PIN
    /// and funds checks happen under the lock so two concurrent withdrawals
    /// cannot both observe the same balance.
    ///
    /// # Errors
    ///
    /// First applicable wins: `InvalidAmount` if `amount <= 0`,
    /// `AccountNotFound`, `InvalidPin` on mismatch, `InsufficientFunds` if
    /// the balance is lower than `amount`. Withdrawing the full balance
    /// succeeds and leaves the balance at zero.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: Decimal,
        pin: &str,
    ) -> LedgerResult<()> {
        // 1. Validate amount before touching the account
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }

        // 2. Per-account critical section
        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut account = self
            .accounts
            .get(account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        // 3. Authenticate, then check funds
        if !account.pin.matches(pin) {
            return Err(LedgerError::InvalidPin(account_id));
        }
        if account.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account_id,
                balance: account.balance,
                requested: amount,
            });
        }

        // 4. Mutate and persist, account write before log append
        // Cannot underflow after the funds check
        account.balance = account.balance.checked_sub(amount).ok_or_else(|| {
            LedgerError::Internal(format!("balance underflow on withdrawal from {account_id}"))
        })?;
        self.accounts.put(account);

        self.transactions
            .append(Transaction::new(account_id, TransactionKind::Withdraw, amount));

        Ok(())
    }

    /// Returns an account's transaction history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the id does not resolve; existence is
    /// checked explicitly even though an empty log query would succeed.
    pub fn get_transactions(&self, account_id: AccountId) -> LedgerResult<Vec<Transaction>> {
        if self.accounts.get(account_id).is_none() {
            return Err(LedgerError::AccountNotFound(account_id));
        }
        Ok(self.transactions.list_by_account(account_id))
    }

    /// Returns every account in the store, ordered by creation time.
    #[must_use]
    pub fn get_all_accounts(&self) -> Vec<Account> {
        let mut accounts = self.accounts.list_all();
        Self::sort_accounts(&mut accounts);
        accounts
    }

    /// Returns the accounts whose owner name matches exactly, ordered by
    /// creation time.
    #[must_use]
    pub fn find_accounts_by_owner(&self, owner_name: &str) -> Vec<Account> {
        let mut accounts = self.accounts.find_by_owner(owner_name);
        Self::sort_accounts(&mut accounts);
        accounts
    }

    // Listing order: creation time, id as tiebreaker for equal timestamps.
    fn sort_accounts(accounts: &mut [Account]) {
        accounts.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.into_inner().cmp(&b.id.into_inner()))
        });
    }
}
