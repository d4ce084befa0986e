//! Statement and balance summary types returned by the ledger engine

use super::account::{AccountId, Cents};
use super::transaction::{Direction, Transaction};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum number of transactions listed in a statement
pub const STATEMENT_LENGTH: usize = 10;

/// Result of a successful transaction: the account's limit and new balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    pub limit: Cents,
    pub balance: Cents,
}

/// One line of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementEntry {
    pub amount: Cents,
    pub direction: Direction,
    pub description: String,
    pub committed_at: DateTime<Utc>,
}

impl From<&Transaction> for StatementEntry {
    fn from(tx: &Transaction) -> Self {
        StatementEntry {
            amount: tx.amount,
            direction: tx.direction,
            description: tx.description.clone(),
            committed_at: tx.committed_at,
        }
    }
}

/// Snapshot of an account with its most recent transactions
///
/// `transactions` is ordered most-recent-first by commit order and holds at
/// most [`STATEMENT_LENGTH`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub account_id: AccountId,
    pub balance: Cents,
    pub limit: Cents,
    pub generated_at: DateTime<Utc>,
    pub transactions: Vec<StatementEntry>,
}
