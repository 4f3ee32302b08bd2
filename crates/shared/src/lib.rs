//! Shared types and configuration for Teller.
//!
//! This crate provides common building blocks used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{AccountId, TransactionId};
