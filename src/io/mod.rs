//! I/O module
//!
//! Handles CSV parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (request conversion, provisioning, account output)
//! - `json_format` - Statement report output
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_csv_record, read_accounts, read_accounts_csv, write_accounts_csv, CsvRecord,
};
pub use json_format::write_statements_json;
pub use sync_reader::SyncReader;
