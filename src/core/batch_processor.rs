//! Batch processing with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which drives the ledger
//! engine over batches of requests, processing different accounts
//! concurrently while keeping each account's requests in submission order.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── LedgerEngine (shared, cloneable)
//!           ├── Arc<AccountStore>
//!           └── Arc<TransactionLog>
//! ```

use std::collections::HashMap;

use tracing::error;

use super::engine::LedgerEngine;
use super::traits::AccountStore;
use crate::types::{AccountId, BalanceSummary, LedgerError, TransactionRequest};

/// Outcome of a single request: the new balance summary or the rejection
pub type ProcessingResult = Result<BalanceSummary, LedgerError>;

/// Batch processor with account-based partitioning
#[derive(Debug)]
pub struct BatchProcessor<S> {
    engine: LedgerEngine<S>,
}

impl<S> Clone for BatchProcessor<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<S: AccountStore + 'static> BatchProcessor<S> {
    /// Create a new BatchProcessor around a shared engine
    pub fn new(engine: LedgerEngine<S>) -> Self {
        Self { engine }
    }

    /// Partition a batch of requests by account ID
    ///
    /// # Guarantees
    ///
    /// - Each request appears in exactly one sub-batch
    /// - Requests for each account keep their original order
    pub fn partition_by_account(
        &self,
        batch: Vec<TransactionRequest>,
    ) -> HashMap<AccountId, Vec<TransactionRequest>> {
        let mut account_batches: HashMap<AccountId, Vec<TransactionRequest>> = HashMap::new();

        for request in batch {
            account_batches
                .entry(request.account_id)
                .or_default()
                .push(request);
        }

        account_batches
    }

    /// Process all requests for a single account sequentially
    ///
    /// Every request is processed even if earlier ones fail; results keep
    /// the input order.
    pub async fn process_account_requests(
        &self,
        requests: Vec<TransactionRequest>,
    ) -> Vec<ProcessingResult> {
        requests
            .into_iter()
            .map(|request| self.engine.record(request))
            .collect()
    }

    /// Process a batch, one tokio task per account
    ///
    /// Results are grouped by account and may not follow the input order
    /// across accounts.
    pub async fn process_batch(&self, batch: Vec<TransactionRequest>) -> Vec<ProcessingResult> {
        let account_batches = self.partition_by_account(batch);

        let mut tasks = Vec::with_capacity(account_batches.len());
        for (_account_id, requests) in account_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_account_requests(requests).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(account_results) => results.extend(account_results),
                Err(e) => error!(error = %e, "Account task panicked"),
            }
        }

        results
    }
}
