//! In-process storage for accounts and the transaction log.
//!
//! Both stores are keyed maps over [`dashmap::DashMap`] and are safe to
//! share across tasks behind an `Arc`. They hold data for the lifetime of
//! the process; durability is out of scope for this service.

mod accounts;
mod transactions;

pub use accounts::AccountStore;
pub use transactions::TransactionLog;
