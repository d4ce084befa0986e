//! Error types for the credit ledger
//!
//! This module defines all error types that can occur while provisioning
//! accounts, recording transactions, producing statements, and driving the
//! ledger from files.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: the referenced account does not exist
//! - **Limit Errors**: a debit would push the balance below `-limit`
//! - **Input Errors**: non-positive amount, unknown direction, bad description
//! - **Provisioning Errors**: malformed or duplicate account definitions
//! - **File I/O and CSV Errors**: driver-side failures

use super::account::{AccountId, Cents};
use thiserror::Error;

/// Coarse classification of a [`LedgerError`]
///
/// Lets a request layer translate failures into responses (not-found,
/// unprocessable, bad request) without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unprocessable,
    InvalidInput,
    Provisioning,
    Io,
}

/// Main error type for the credit ledger
///
/// Every failure of the core is returned as one of these variants; nothing
/// in the ledger aborts the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The account id is not provisioned
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The unknown account id
        account: AccountId,
    },

    /// A debit would push the balance below the negative credit limit
    ///
    /// No mutation occurs and no transaction is recorded.
    #[error(
        "Insufficient limit for account {account}: balance {balance}, limit {limit}, requested {requested}"
    )]
    InsufficientLimit {
        /// Account id
        account: AccountId,
        /// Balance at the time of the check
        balance: Cents,
        /// Credit limit of the account
        limit: Cents,
        /// Requested debit amount
        requested: Cents,
    },

    /// Transaction amount is zero or negative
    #[error("Invalid amount {amount}: must be a positive number of cents")]
    InvalidAmount {
        /// The rejected amount
        amount: Cents,
    },

    /// Direction is not one of the credit/debit tags
    #[error("Invalid direction '{direction}': expected 'c' or 'd'")]
    InvalidDirection {
        /// The rejected direction string
        direction: String,
    },

    /// Description length outside 1 to 10 characters
    #[error("Invalid description length {length}: must be between 1 and 10 characters")]
    InvalidDescription {
        /// Length of the rejected description, in characters
        length: usize,
    },

    /// Applying the delta would overflow the balance
    #[error("Arithmetic overflow applying transaction to account {account}")]
    ArithmeticOverflow {
        /// Account id
        account: AccountId,
    },

    /// An account with this id is already provisioned
    #[error("Account {account} is already provisioned")]
    DuplicateAccount {
        /// The duplicated account id
        account: AccountId,
    },

    /// Account definition rejected during provisioning
    #[error("Invalid provisioning: {message}")]
    InvalidProvisioning {
        /// What was wrong with the definition
        message: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV or JSON parsing/serialization error
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for LedgerError {
    fn from(error: csv_async::Error) -> Self {
        LedgerError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::ParseError {
            line: Some(error.line() as u64),
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create an InsufficientLimit error
    pub fn insufficient_limit(
        account: AccountId,
        balance: Cents,
        limit: Cents,
        requested: Cents,
    ) -> Self {
        LedgerError::InsufficientLimit {
            account,
            balance,
            limit,
            requested,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Cents) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InvalidDirection error
    pub fn invalid_direction(direction: &str) -> Self {
        LedgerError::InvalidDirection {
            direction: direction.to_string(),
        }
    }

    /// Create an InvalidDescription error
    pub fn invalid_description(length: usize) -> Self {
        LedgerError::InvalidDescription { length }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow { account }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: AccountId) -> Self {
        LedgerError::DuplicateAccount { account }
    }

    /// Create an InvalidProvisioning error
    pub fn invalid_provisioning(message: impl Into<String>) -> Self {
        LedgerError::InvalidProvisioning {
            message: message.into(),
        }
    }

    /// Classify this error for translation into a response
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::AccountNotFound { .. } => ErrorKind::NotFound,
            LedgerError::InsufficientLimit { .. } | LedgerError::ArithmeticOverflow { .. } => {
                ErrorKind::Unprocessable
            }
            LedgerError::InvalidAmount { .. }
            | LedgerError::InvalidDirection { .. }
            | LedgerError::InvalidDescription { .. } => ErrorKind::InvalidInput,
            LedgerError::DuplicateAccount { .. } | LedgerError::InvalidProvisioning { .. } => {
                ErrorKind::Provisioning
            }
            LedgerError::FileNotFound { .. }
            | LedgerError::IoError { .. }
            | LedgerError::ParseError { .. } => ErrorKind::Io,
        }
    }

    /// Whether the request was rejected before touching any account
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}
