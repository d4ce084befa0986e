//! Core traits for account storage
//!
//! The ledger engine only talks to account state through [`AccountStore`],
//! so a persisted backend with conditional writes can replace the in-memory
//! store without touching the engine.

use crate::types::{Account, AccountId, Cents, LedgerError};

/// Authoritative holder of account limits and balances
///
/// Every balance change goes through [`AccountStore::apply_delta`].
/// Implementations must serialize `apply_delta` and `read` per account while
/// leaving different accounts independent.
pub trait AccountStore: Send + Sync {
    /// Register an account at initialization time
    fn provision(&self, account: Account) -> Result<(), LedgerError>;

    /// Run `f` against the current account state under the account's lock
    fn read<F, T>(&self, account_id: AccountId, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&Account) -> T;

    /// Atomically apply a signed delta to an account's balance
    ///
    /// Fails with `AccountNotFound` for unknown ids and `InsufficientLimit`
    /// when `balance + delta < -limit`, leaving the balance untouched. On
    /// success `on_commit` runs with the updated account before the lock is
    /// released, so anything it writes becomes visible together with the
    /// new balance.
    fn apply_delta<F, T>(
        &self,
        account_id: AccountId,
        delta: Cents,
        on_commit: F,
    ) -> Result<(Account, T), LedgerError>
    where
        F: FnOnce(&Account) -> T;

    /// Snapshot of every account, sorted by id
    fn accounts(&self) -> Vec<Account>;

    /// Current limit and balance of an account
    fn get(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        self.read(account_id, Account::clone)
    }
}
