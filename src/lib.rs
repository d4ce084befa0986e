//! Credit Ledger Library
//! # Overview
//!
//! This library records credit and debit requests against accounts that may
//! go negative down to a per-account credit limit, and produces statements of
//! each account's most recent transactions. Request files are processed by a
//! sync or an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, TransactionRequest, Statement, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::account_store`] - Per-account locked balances and limits
//!   - [`core::transaction_log`] - Commit-ordered transaction history
//!   - [`core::engine`] - Request validation, recording and statements
//!   - [`core::batch_processor`] - Account-partitioned concurrent batches
//! - [`io`] - CSV readers and report writers
//! - [`strategy`] - Sync and async processing pipelines
//! - [`logging`] - Tracing subscriber setup
//!
//! # Balance Rule
//!
//! An account holds a `limit` (never negative) and a `balance`. A request is
//! committed only if `balance + delta >= -limit`, where a credit adds its
//! amount and a debit subtracts it. The balance check, the balance update and
//! the transaction record happen as one step per account, so concurrent
//! debits can never push an account past its limit.

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{AccountStore, InMemoryAccountStore, LedgerEngine, TransactionLog};
pub use io::{write_accounts_csv, write_statements_json};
pub use types::{
    Account, AccountId, BalanceSummary, Cents, Direction, ErrorKind, LedgerError, Statement,
    StatementEntry, Transaction, TransactionId, TransactionRequest,
};
