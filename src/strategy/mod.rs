//! Processing strategy module for request files
//!
//! A strategy owns the pipeline from an input CSV file to recorded
//! transactions: parsing, handing requests to the ledger engine, and counting
//! outcomes. Different implementations (synchronous, asynchronous batch) are
//! selected at runtime.

use crate::cli::StrategyType;
use crate::core::LedgerEngine;
use crate::types::LedgerError;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Outcome counts of one processing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Requests that were committed
    pub accepted: usize,
    /// Rows that were malformed or whose request was refused
    pub rejected: usize,
}

impl ProcessingSummary {
    /// Count one request outcome
    pub fn record<T>(&mut self, result: &Result<T, LedgerError>) {
        match result {
            Ok(_) => self.accepted += 1,
            Err(_) => self.rejected += 1,
        }
    }
}

/// Processing strategy trait for complete request pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Record every request of `input_path` into `engine`
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessingSummary)` once the whole file has been consumed
    /// * `Err(LedgerError)` on a fatal error (file not found, I/O error,
    ///   runtime construction failure)
    ///
    /// Rejected requests and malformed rows are logged and counted, never
    /// returned as errors.
    fn process(
        &self,
        engine: &LedgerEngine,
        input_path: &Path,
    ) -> Result<ProcessingSummary, LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_outcomes() {
        let mut summary = ProcessingSummary::default();
        summary.record::<()>(&Ok(()));
        summary.record::<()>(&Err(LedgerError::account_not_found(9)));
        summary.record::<()>(&Ok(()));

        assert_eq!(
            summary,
            ProcessingSummary {
                accepted: 2,
                rejected: 1
            }
        );
    }
}
