//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state, identifiers and default provisioning
//! - `transaction`: Direction tag, requests and committed records
//! - `statement`: Balance summaries and statements
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod statement;
pub mod transaction;

pub use account::{Account, AccountId, Cents, DEFAULT_ACCOUNTS};
pub use error::{ErrorKind, LedgerError};
pub use statement::{BalanceSummary, Statement, StatementEntry, STATEMENT_LENGTH};
pub use transaction::{
    Direction, Transaction, TransactionId, TransactionRequest, DESCRIPTION_MAX_CHARS,
};
