//! Ledger engine: transaction recording and statements
//!
//! This module provides the `LedgerEngine` struct, which validates
//! transaction intents, turns them into signed deltas, applies them through
//! an [`AccountStore`] and serves statements.
//!
//! # Architecture
//!
//! ```text
//! LedgerEngine
//!     ├── Arc<S: AccountStore>  (per-account locked balances)
//!     └── Arc<TransactionLog>   (commit-ordered history)
//! ```
//!
//! # Atomicity
//!
//! The transaction record is appended from the store's commit hook, inside
//! the same critical section as the balance update. A rejected delta never
//! reaches the hook, so there is never a record without its balance change
//! or a balance change without its record.
//!
//! # Thread Safety
//!
//! The engine is cheap to clone and can be shared across threads and tokio
//! tasks; all state lives behind `Arc`.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use super::account_store::InMemoryAccountStore;
use super::traits::AccountStore;
use super::transaction_log::TransactionLog;
use crate::types::{
    Account, AccountId, BalanceSummary, Cents, Direction, LedgerError, Statement,
    TransactionRequest, STATEMENT_LENGTH,
};

/// Credit ledger orchestrator
#[derive(Debug)]
pub struct LedgerEngine<S = InMemoryAccountStore> {
    accounts: Arc<S>,
    log: Arc<TransactionLog>,
}

impl<S> Clone for LedgerEngine<S> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            log: Arc::clone(&self.log),
        }
    }
}

impl LedgerEngine<InMemoryAccountStore> {
    /// Create an engine over an in-memory store provisioned with `accounts`
    ///
    /// # Returns
    ///
    /// * `Ok(LedgerEngine)` - With every account provisioned at zero balance
    ///   (or the balance carried by the given `Account`)
    /// * `Err(LedgerError)` - If an account is invalid or duplicated
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Result<Self, LedgerError> {
        let store = InMemoryAccountStore::with_accounts(accounts)?;
        Ok(Self::new(Arc::new(store), Arc::new(TransactionLog::new())))
    }
}

impl<S: AccountStore> LedgerEngine<S> {
    /// Create an engine from shared components
    pub fn new(accounts: Arc<S>, log: Arc<TransactionLog>) -> Self {
        Self { accounts, log }
    }

    /// Record a transaction from raw request-layer values
    ///
    /// `direction` accepts `c`/`credit` and `d`/`debit`, ignoring case.
    ///
    /// # Returns
    ///
    /// * `Ok(BalanceSummary)` - The account's limit and new balance
    /// * `Err(LedgerError::InvalidDirection)` - If the direction tag is unknown
    /// * Any error from [`LedgerEngine::record`]
    pub fn record_transaction(
        &self,
        account_id: AccountId,
        amount: Cents,
        direction: &str,
        description: &str,
    ) -> Result<BalanceSummary, LedgerError> {
        let direction: Direction = direction.parse()?;
        self.record(TransactionRequest {
            account_id,
            amount,
            direction,
            description: description.to_string(),
        })
    }

    /// Record a typed transaction request
    ///
    /// This method:
    /// 1. Validates amount and description before touching any account
    /// 2. Computes the signed delta from the direction
    /// 3. Applies it through the account store, appending the transaction
    ///    record inside the same critical section
    ///
    /// # Returns
    ///
    /// * `Ok(BalanceSummary)` - The account's limit and new balance
    /// * `Err(LedgerError::InvalidAmount | InvalidDescription)` - Bad input
    /// * `Err(LedgerError::AccountNotFound)` - Unknown account
    /// * `Err(LedgerError::InsufficientLimit)` - Debit would exceed the limit
    /// * `Err(LedgerError::ArithmeticOverflow)` - Balance would overflow
    #[instrument(
        skip(self, request),
        fields(
            account = request.account_id,
            amount = request.amount,
            direction = %request.direction,
        )
    )]
    pub fn record(&self, request: TransactionRequest) -> Result<BalanceSummary, LedgerError> {
        if let Err(e) = request.validate() {
            warn!(error = %e, "Rejected invalid transaction");
            return Err(e);
        }

        let delta = request.signed_delta();
        let log = &self.log;
        let result = self
            .accounts
            .apply_delta(request.account_id, delta, |_| {
                log.append(&request, Utc::now())
            });

        match result {
            Ok((account, transaction)) => {
                debug!(
                    tx = transaction.id,
                    balance = account.balance,
                    "Transaction committed"
                );
                Ok(BalanceSummary {
                    limit: account.limit,
                    balance: account.balance,
                })
            }
            Err(e) => {
                warn!(error = %e, "Transaction rejected");
                Err(e)
            }
        }
    }

    /// Produce a statement for an account
    ///
    /// Balance, limit and the transaction list are read under the account's
    /// lock so they describe the same point in commit order.
    ///
    /// # Returns
    ///
    /// * `Ok(Statement)` - With at most [`STATEMENT_LENGTH`] transactions,
    ///   most-recent-first
    /// * `Err(LedgerError::AccountNotFound)` - Unknown account
    #[instrument(skip(self))]
    pub fn statement(&self, account_id: AccountId) -> Result<Statement, LedgerError> {
        let log = &self.log;
        self.accounts.read(account_id, |account| Statement {
            account_id,
            balance: account.balance,
            limit: account.limit,
            generated_at: Utc::now(),
            transactions: log.recent(account_id, STATEMENT_LENGTH),
        })
    }

    /// Current limit and balance of an account
    pub fn account(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        self.accounts.get(account_id)
    }

    /// Snapshot of every account, sorted by id
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.accounts()
    }

    /// Statements for every account, sorted by id
    pub fn statements(&self) -> Vec<Statement> {
        self.accounts()
            .iter()
            .filter_map(|account| self.statement(account.id).ok())
            .collect()
    }

    /// Shared transaction log
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::thread;

    fn engine() -> LedgerEngine {
        LedgerEngine::with_accounts(Account::defaults()).unwrap()
    }

    #[test]
    fn test_engine_is_cloneable_and_shares_state() {
        let engine = engine();
        let clone = engine.clone();

        clone.record_transaction(1, 500, "c", "shared").unwrap();

        assert_eq!(engine.account(1).unwrap().balance, 500);
    }

    #[test]
    fn test_credit_increases_balance_by_amount() {
        let engine = engine();

        let summary = engine.record_transaction(1, 1_000, "c", "deposit").unwrap();

        assert_eq!(
            summary,
            BalanceSummary {
                limit: 100_000,
                balance: 1_000
            }
        );
    }

    #[test]
    fn test_debit_within_limit_goes_negative() {
        let engine = engine();

        let summary = engine.record_transaction(1, 90_000, "d", "x").unwrap();

        assert_eq!(summary.balance, -90_000);
        assert_eq!(summary.limit, 100_000);
    }

    #[test]
    fn test_debit_beyond_limit_is_rejected_without_record() {
        let engine = engine();
        engine.record_transaction(1, 90_000, "d", "x").unwrap();

        let result = engine.record_transaction(1, 20_000, "d", "y");

        assert_eq!(
            result,
            Err(LedgerError::insufficient_limit(1, -90_000, 100_000, 20_000))
        );
        assert_eq!(engine.account(1).unwrap().balance, -90_000);
        assert_eq!(engine.log().count(1), 1);
    }

    #[test]
    fn test_unknown_account() {
        let engine = engine();

        assert_eq!(
            engine.record_transaction(999, 10, "c", "ghost"),
            Err(LedgerError::account_not_found(999))
        );
        assert_eq!(
            engine.statement(999).unwrap_err(),
            LedgerError::account_not_found(999)
        );
    }

    #[rstest]
    #[case::zero_amount(0, "c", "x", LedgerError::invalid_amount(0))]
    #[case::negative_amount(-10, "d", "x", LedgerError::invalid_amount(-10))]
    #[case::unknown_direction(10, "x", "x", LedgerError::invalid_direction("x"))]
    #[case::empty_description(10, "c", "", LedgerError::invalid_description(0))]
    #[case::long_description(10, "c", "descricao11", LedgerError::invalid_description(11))]
    fn test_invalid_input_is_rejected_before_store(
        #[case] amount: Cents,
        #[case] direction: &str,
        #[case] description: &str,
        #[case] expected: LedgerError,
    ) {
        let engine = engine();

        let result = engine.record_transaction(1, amount, direction, description);

        assert_eq!(result, Err(expected));
        assert_eq!(engine.account(1).unwrap().balance, 0);
        assert_eq!(engine.log().count(1), 0);
    }

    #[test]
    fn test_invalid_input_on_unknown_account_reports_input_error() {
        let engine = engine();

        let result = engine.record_transaction(999, 0, "c", "x");

        assert_eq!(result, Err(LedgerError::invalid_amount(0)));
    }

    #[test]
    fn test_statement_round_trip() {
        let engine = engine();
        engine.record_transaction(2, 300, "c", "first").unwrap();
        engine.record_transaction(2, 120, "d", "second").unwrap();

        let statement = engine.statement(2).unwrap();

        assert_eq!(statement.account_id, 2);
        assert_eq!(statement.balance, 180);
        assert_eq!(statement.limit, 80_000);
        assert_eq!(statement.transactions.len(), 2);
        let latest = &statement.transactions[0];
        assert_eq!(latest.amount, 120);
        assert_eq!(latest.direction, Direction::Debit);
        assert_eq!(latest.description, "second");
        assert!(latest.committed_at <= statement.generated_at);
    }

    #[test]
    fn test_statement_empty_account() {
        let engine = engine();

        let statement = engine.statement(5).unwrap();

        assert_eq!(statement.balance, 0);
        assert_eq!(statement.limit, 500_000);
        assert!(statement.transactions.is_empty());
    }

    #[test]
    fn test_statement_keeps_ten_most_recent() {
        let engine = engine();
        for i in 1..=12 {
            engine
                .record_transaction(3, i, "c", &format!("tx{}", i))
                .unwrap();
        }

        let statement = engine.statement(3).unwrap();

        assert_eq!(statement.transactions.len(), STATEMENT_LENGTH);
        let descriptions: Vec<_> = statement
            .transactions
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec!["tx12", "tx11", "tx10", "tx9", "tx8", "tx7", "tx6", "tx5", "tx4", "tx3"]
        );
        assert!(statement
            .transactions
            .windows(2)
            .all(|w| w[0].committed_at >= w[1].committed_at));
    }

    #[test]
    fn test_statements_cover_every_account() {
        let engine = engine();

        let ids: Vec<_> = engine.statements().iter().map(|s| s.account_id).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_concurrent_debits_exactly_one_succeeds() {
        for _ in 0..50 {
            let engine = engine();
            let handles: Vec<_> = (0..2)
                .map(|i| {
                    let engine = engine.clone();
                    thread::spawn(move || {
                        engine.record_transaction(1, 60_000, "d", &format!("d{}", i))
                    })
                })
                .collect();

            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert!(results
                .iter()
                .any(|r| matches!(r, Err(LedgerError::InsufficientLimit { .. }))));
            assert_eq!(engine.account(1).unwrap().balance, -60_000);
            assert_eq!(engine.log().count(1), 1);
        }
    }

    #[test]
    fn test_concurrent_records_keep_log_and_balance_consistent() {
        let engine = engine();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = engine.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let direction = if i % 2 == 0 { "c" } else { "d" };
                        let _ = engine.record_transaction(2, 7_000, direction, "mix");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let account = engine.account(2).unwrap();
        assert!(account.balance >= -account.limit);
        assert_eq!(account.balance, engine.log().net_movement(2));
    }
}
