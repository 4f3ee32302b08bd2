//! Core account ledger for Teller.
//!
//! This crate implements the rules governing money movement:
//! - Account records with PIN authentication
//! - An append-only transaction log
//! - The ledger service orchestrating validation, balance mutation, and
//!   log append as one per-account atomic unit
//! - The typed failure set consumed by the HTTP layer
//!
//! No web or storage-engine dependencies; the stores are in-process
//! concurrent maps.

pub mod account;
pub mod error;
pub mod service;
pub mod store;
pub mod transaction;

#[cfg(test)]
mod service_props;

pub use account::{Account, Pin};
pub use error::{LedgerError, LedgerResult};
pub use service::LedgerService;
pub use store::{AccountStore, TransactionLog};
pub use transaction::{Transaction, TransactionKind};
