//! CSV format handling for requests, provisioning and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for request deserialization
//! - Conversion from CSV records to domain requests
//! - Provisioning file parsing
//! - Account output serialization
//!
//! Request input columns: `account,amount,direction,description`.
//! Provisioning columns: `account,limit`.

use crate::types::{Account, AccountId, Cents, Direction, LedgerError, TransactionRequest};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::Path;

/// CSV record structure for request deserialization
///
/// The description is optional so that rows with a missing trailing field
/// still reach the engine and are rejected there as an invalid description.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub account: AccountId,
    pub amount: Cents,
    pub direction: String,
    pub description: Option<String>,
}

/// Provisioning record: one account and its credit limit
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountCsvRecord {
    pub account: AccountId,
    pub limit: Cents,
}

/// Convert a CsvRecord to a TransactionRequest
///
/// Parses the direction tag; amount and description are validated later by
/// the engine.
///
/// # Returns
///
/// * `Ok(TransactionRequest)` - Successfully converted record
/// * `Err(LedgerError::InvalidDirection)` - Unknown direction tag
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<TransactionRequest, LedgerError> {
    let direction: Direction = csv_record.direction.parse()?;

    Ok(TransactionRequest {
        account_id: csv_record.account,
        amount: csv_record.amount,
        direction,
        description: csv_record.description.unwrap_or_default(),
    })
}

/// Parse provisioning records from any reader
///
/// Any malformed row is fatal: provisioning must be complete or not at all.
pub fn read_accounts<R: Read>(input: R) -> Result<Vec<Account>, LedgerError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    reader
        .deserialize::<AccountCsvRecord>()
        .map(|row| -> Result<Account, LedgerError> {
            let row = row?;
            Ok(Account::new(row.account, row.limit))
        })
        .collect()
}

/// Parse a provisioning file
///
/// # Returns
///
/// * `Ok(Vec<Account>)` - Accounts in file order, zero balances
/// * `Err(LedgerError::FileNotFound)` - If the file does not exist
/// * `Err(LedgerError::ParseError)` - If a row is malformed
pub fn read_accounts_csv(path: &Path) -> Result<Vec<Account>, LedgerError> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LedgerError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LedgerError::from(e),
    })?;

    read_accounts(file)
}

/// Write account states to CSV format
///
/// Writes accounts with columns: account, limit, balance, sorted by account
/// ID for deterministic output.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "limit", "balance"])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer.write_record(&[
            account.id.to_string(),
            account.limit.to_string(),
            account.balance.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn csv_record(direction: &str, description: Option<&str>) -> CsvRecord {
        CsvRecord {
            account: 1,
            amount: 100,
            direction: direction.to_string(),
            description: description.map(|s| s.to_string()),
        }
    }

    #[rstest]
    #[case("c", Direction::Credit)]
    #[case("d", Direction::Debit)]
    #[case("Debit", Direction::Debit)]
    fn test_convert_csv_record_valid(#[case] direction: &str, #[case] expected: Direction) {
        let request = convert_csv_record(csv_record(direction, Some("desc"))).unwrap();

        assert_eq!(request.account_id, 1);
        assert_eq!(request.amount, 100);
        assert_eq!(request.direction, expected);
        assert_eq!(request.description, "desc");
    }

    #[test]
    fn test_convert_csv_record_invalid_direction() {
        let result = convert_csv_record(csv_record("x", Some("desc")));
        assert_eq!(result, Err(LedgerError::invalid_direction("x")));
    }

    #[test]
    fn test_convert_csv_record_missing_description_becomes_empty() {
        let request = convert_csv_record(csv_record("c", None)).unwrap();
        assert_eq!(request.description, "");
    }

    #[test]
    fn test_read_accounts() {
        let input = "account,limit\n7, 500\n8,0\n";

        let accounts = read_accounts(input.as_bytes()).unwrap();

        assert_eq!(accounts, vec![Account::new(7, 500), Account::new(8, 0)]);
    }

    #[rstest]
    #[case::non_numeric_limit("account,limit\n1,abc\n")]
    #[case::negative_id("account,limit\n-1,10\n")]
    #[case::missing_limit("account,limit\n1\n")]
    fn test_read_accounts_malformed(#[case] input: &str) {
        let result = read_accounts(input.as_bytes());
        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[test]
    fn test_read_accounts_csv_missing_file() {
        let result = read_accounts_csv(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }

    #[rstest]
    #[case::sorted_by_id(
        vec![
            Account { id: 3, limit: 10, balance: 0 },
            Account { id: 1, limit: 100_000, balance: -90_000 },
        ],
        "account,limit,balance\n1,100000,-90000\n3,10,0\n"
    )]
    #[case::empty_accounts(vec![], "account,limit,balance\n")]
    fn test_write_accounts_csv(#[case] accounts: Vec<Account>, #[case] expected_output: &str) {
        let mut output = Vec::new();
        write_accounts_csv(&accounts, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }
}
