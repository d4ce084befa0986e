//! JSON output for account statements

use crate::types::{LedgerError, Statement};
use std::io::Write;

/// Write statements as a pretty-printed JSON array, followed by a newline
pub fn write_statements_json(
    statements: &[Statement],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    serde_json::to_writer_pretty(&mut *output, statements)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
