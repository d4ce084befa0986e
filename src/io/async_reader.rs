//! Asynchronous CSV reader with batch interface
//!
//! Provides batched reading of transaction requests from any `AsyncRead`
//! source, used by the async processing strategy.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of TransactionRequests
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerError, TransactionRequest};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
///
/// Rows that cannot be parsed or converted are logged and skipped; their
/// count is available through [`AsyncReader::skipped`].
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    skipped: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            skipped: 0,
        }
    }

    /// Read a batch of transaction requests
    ///
    /// Reads up to `batch_size` valid requests. Returns an empty vector when
    /// the end of the input is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<TransactionRequest> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(request) => batch.push(request),
                    Err(e) => {
                        warn!(error = %e, "Skipping row");
                        self.skipped += 1;
                    }
                },
                Some(Err(e)) => {
                    warn!(error = %LedgerError::from(e), "Skipping malformed row");
                    self.skipped += 1;
                }
                None => break,
            }
        }

        batch
    }

    /// Number of rows skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
