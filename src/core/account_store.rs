//! Thread-safe in-memory account store
//!
//! This module provides the `InMemoryAccountStore` struct, which holds the
//! provisioned accounts and mediates every balance change.
//!
//! # Design
//!
//! Accounts live in a `DashMap` keyed by id. Each value is an
//! `Arc<Mutex<Account>>`: a lookup clones the `Arc` and releases the map
//! shard before the per-account mutex is taken. Operations on one account
//! are therefore fully serialized, while operations on different accounts
//! never wait on each other's critical sections.
//!
//! # Thread Safety
//!
//! The check against the limit and the balance update happen under the
//! same mutex guard, so two concurrent debits can never both pass the check
//! against a stale balance.

use std::sync::Arc;

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, Cents, LedgerError};
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

/// Per-account locked account table
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    /// Account slots by id
    ///
    /// Populated at provisioning; entries are never removed.
    accounts: DashMap<AccountId, Arc<Mutex<Account>>>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Create a store provisioned with `accounts`
    ///
    /// # Returns
    ///
    /// * `Ok(InMemoryAccountStore)` - If every account was provisioned
    /// * `Err(LedgerError)` - On the first invalid or duplicate account
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Result<Self, LedgerError> {
        let store = Self::new();
        for account in accounts {
            store.provision(account)?;
        }
        Ok(store)
    }

    /// Look up the slot for an account, releasing the map shard immediately
    fn slot(&self, account_id: AccountId) -> Result<Arc<Mutex<Account>>, LedgerError> {
        self.accounts
            .get(&account_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }
}

impl AccountStore for InMemoryAccountStore {
    fn provision(&self, account: Account) -> Result<(), LedgerError> {
        if account.id == 0 {
            return Err(LedgerError::invalid_provisioning(
                "account id must be a positive integer",
            ));
        }
        if account.limit < 0 {
            return Err(LedgerError::invalid_provisioning(format!(
                "account {} has negative limit {}",
                account.id, account.limit
            )));
        }
        if account.balance < account.floor() {
            return Err(LedgerError::invalid_provisioning(format!(
                "account {} starts below its limit",
                account.id
            )));
        }

        let id = account.id;
        let limit = account.limit;
        let mut inserted = false;
        self.accounts.entry(id).or_insert_with(|| {
            inserted = true;
            Arc::new(Mutex::new(account))
        });

        if !inserted {
            return Err(LedgerError::duplicate_account(id));
        }
        debug!(account = id, limit, "Provisioned account");
        Ok(())
    }

    fn read<F, T>(&self, account_id: AccountId, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&Account) -> T,
    {
        let slot = self.slot(account_id)?;
        let account = slot.lock();
        Ok(f(&account))
    }

    fn apply_delta<F, T>(
        &self,
        account_id: AccountId,
        delta: Cents,
        on_commit: F,
    ) -> Result<(Account, T), LedgerError>
    where
        F: FnOnce(&Account) -> T,
    {
        let slot = self.slot(account_id)?;
        let mut account = slot.lock();

        let candidate = account
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::arithmetic_overflow(account_id))?;

        if candidate < account.floor() {
            return Err(LedgerError::insufficient_limit(
                account_id,
                account.balance,
                account.limit,
                delta.unsigned_abs() as Cents,
            ));
        }

        account.balance = candidate;
        let output = on_commit(&account);
        Ok((account.clone(), output))
    }

    fn accounts(&self) -> Vec<Account> {
        let slots: Vec<_> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut accounts: Vec<Account> = slots.iter().map(|slot| slot.lock().clone()).collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }
}
