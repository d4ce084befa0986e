//! Transaction-related types for the credit ledger
//!
//! This module defines the transaction direction tag, the request handed to
//! the engine, and the immutable record appended to the transaction log.

use super::account::{AccountId, Cents};
use super::error::LedgerError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Transaction identifier
///
/// Assigned in commit order, never reused.
pub type TransactionId = u64;

/// Maximum description length, counted in characters
pub const DESCRIPTION_MAX_CHARS: usize = 10;

/// Direction of a transaction
///
/// The sign of a movement is never stored in the amount; it is carried by
/// this tag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Increases the balance by the transaction amount
    Credit,

    /// Decreases the balance by the transaction amount
    ///
    /// Rejected when the resulting balance would fall below `-limit`.
    Debit,
}

impl Direction {
    /// Signed balance delta for a positive `amount`
    pub fn signed(self, amount: Cents) -> Cents {
        match self {
            Direction::Credit => amount,
            Direction::Debit => -amount,
        }
    }
}

impl FromStr for Direction {
    type Err = LedgerError;

    /// Parse `c`/`credit` or `d`/`debit`, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "credit" => Ok(Direction::Credit),
            "d" | "debit" => Ok(Direction::Debit),
            _ => Err(LedgerError::invalid_direction(s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => f.write_str("credit"),
            Direction::Debit => f.write_str("debit"),
        }
    }
}

/// A transaction intent submitted to the ledger engine
///
/// Fields are carried as received; the engine validates them before any
/// account state is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Target account
    pub account_id: AccountId,

    /// Amount in cents; must be strictly positive
    pub amount: Cents,

    /// Credit or debit
    pub direction: Direction,

    /// Free text, 1 to 10 characters
    pub description: String,
}

impl TransactionRequest {
    /// Validate the domain preconditions of this request
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If amount and description are acceptable
    /// * `Err(LedgerError::InvalidAmount)` - If the amount is not positive
    /// * `Err(LedgerError::InvalidDescription)` - If the description is empty
    ///   or longer than [`DESCRIPTION_MAX_CHARS`] characters
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount <= 0 {
            return Err(LedgerError::invalid_amount(self.amount));
        }

        let length = self.description.chars().count();
        if length == 0 || length > DESCRIPTION_MAX_CHARS {
            return Err(LedgerError::invalid_description(length));
        }

        Ok(())
    }

    /// Signed delta this request applies to the balance
    pub fn signed_delta(&self) -> Cents {
        self.direction.signed(self.amount)
    }
}

/// Committed transaction record
///
/// Created exactly once, inside the same critical section as the balance
/// update it accompanies, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Commit-ordered identifier
    pub id: TransactionId,

    /// Owning account
    pub account_id: AccountId,

    /// Strictly positive amount in cents
    pub amount: Cents,

    /// Credit or debit
    pub direction: Direction,

    /// Description as submitted
    pub description: String,

    /// Commit timestamp
    pub committed_at: DateTime<Utc>,
}
