//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - The account store abstraction the engine depends on
//! - `account_store` - Per-account locked in-memory account table
//! - `transaction_log` - Commit-ordered transaction history
//! - `engine` - Transaction recording and statements
//! - `batch_processor` - Concurrent, account-partitioned batch driving

pub mod account_store;
pub mod batch_processor;
pub mod engine;
pub mod traits;
pub mod transaction_log;

pub use account_store::InMemoryAccountStore;
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::LedgerEngine;
pub use traits::AccountStore;
pub use transaction_log::TransactionLog;
