//! Thread-safe append-only transaction log
//!
//! This module provides the `TransactionLog` struct, which keeps every
//! committed transaction per account in commit order.
//!
//! # Design
//!
//! The log uses `DashMap` keyed by account id; each value is the account's
//! transactions in the order they were committed. Appends are only issued
//! from the account store's commit hook, i.e. while the owning account's
//! lock is held, so per-account order is commit order.
//!
//! # Ordering
//!
//! Transaction ids come from a single atomic counter and timestamps are
//! clamped so they never decrease within an account. Ordering a statement
//! by `(committed_at, id)` descending is therefore the same as walking the
//! account's vector backwards.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{
    AccountId, Cents, StatementEntry, Transaction, TransactionId, TransactionRequest,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Per-account, commit-ordered transaction history
#[derive(Debug)]
pub struct TransactionLog {
    /// Committed transactions by account id
    transactions: DashMap<AccountId, Vec<Transaction>>,

    /// Next transaction id to hand out
    next_id: AtomicU64,
}

impl TransactionLog {
    /// Create an empty log; the first transaction gets id 1
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a committed transaction for `request`
    ///
    /// Must only be called from inside the account's critical section (the
    /// `on_commit` hook of `AccountStore::apply_delta`).
    ///
    /// # Arguments
    ///
    /// * `request` - The validated request whose delta was just committed
    /// * `now` - Wall-clock time at commit
    ///
    /// # Returns
    ///
    /// A copy of the appended record.
    pub fn append(&self, request: &TransactionRequest, now: DateTime<Utc>) -> Transaction {
        let id: TransactionId = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut history = self.transactions.entry(request.account_id).or_default();

        let committed_at = match history.last() {
            Some(previous) if previous.committed_at > now => previous.committed_at,
            _ => now,
        };

        let transaction = Transaction {
            id,
            account_id: request.account_id,
            amount: request.amount,
            direction: request.direction,
            description: request.description.clone(),
            committed_at,
        };
        history.push(transaction.clone());
        transaction
    }

    /// Most recent transactions of an account, most-recent-first
    ///
    /// Returns at most `limit` entries; an account without transactions
    /// yields an empty vector.
    pub fn recent(&self, account_id: AccountId, limit: usize) -> Vec<StatementEntry> {
        self.transactions
            .get(&account_id)
            .map(|history| {
                history
                    .iter()
                    .rev()
                    .take(limit)
                    .map(StatementEntry::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of transactions recorded for an account
    pub fn count(&self, account_id: AccountId) -> usize {
        self.transactions
            .get(&account_id)
            .map(|history| history.len())
            .unwrap_or(0)
    }

    /// Sum of signed deltas recorded for an account
    pub fn net_movement(&self, account_id: AccountId) -> Cents {
        self.transactions
            .get(&account_id)
            .map(|history| {
                history
                    .iter()
                    .map(|tx| tx.direction.signed(tx.amount))
                    .sum()
            })
            .unwrap_or(0)
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}
