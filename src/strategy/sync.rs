//! Synchronous processing strategy
//!
//! Single-threaded pipeline: the `SyncReader` iterator yields one request at
//! a time and each is recorded before the next row is read, so memory use is
//! independent of the input size.

use crate::core::LedgerEngine;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use credit_ledger::core::LedgerEngine;
/// use credit_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use credit_ledger::types::Account;
/// use std::path::Path;
///
/// let engine = LedgerEngine::with_accounts(Account::defaults()).unwrap();
/// let summary = SyncProcessingStrategy
///     .process(&engine, Path::new("transactions.csv"))
///     .expect("Processing failed");
/// println!("{} accepted, {} rejected", summary.accepted, summary.rejected);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        engine: &LedgerEngine,
        input_path: &Path,
    ) -> Result<ProcessingSummary, LedgerError> {
        let reader = SyncReader::new(input_path)?;
        let mut summary = ProcessingSummary::default();

        for row in reader {
            match row {
                // The engine logs its own rejections
                Ok(request) => summary.record(&engine.record(request)),
                Err(e) => {
                    warn!(error = %e, "Skipping row");
                    summary.rejected += 1;
                }
            }
        }

        info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            "Finished processing"
        );
        Ok(summary)
    }
}
