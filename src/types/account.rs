//! Account-related types for the credit ledger
//!
//! This module defines the Account structure, the identifiers and monetary
//! unit used throughout the crate, and the default provisioning set.

/// Account identifier
///
/// Positive integer assigned at provisioning time.
pub type AccountId = u32;

/// Monetary amount in cents
///
/// Balances may be negative down to `-limit`; transaction amounts are
/// always strictly positive.
pub type Cents = i64;

/// Accounts provisioned when no accounts file is supplied, as `(id, limit)`.
pub const DEFAULT_ACCOUNTS: [(AccountId, Cents); 5] = [
    (1, 100_000),
    (2, 80_000),
    (3, 1_000_000),
    (4, 10_000_000),
    (5, 500_000),
];

/// Customer account state
///
/// Holds the immutable credit limit and the current balance. The balance
/// is only ever changed by the account store while applying a delta, and
/// satisfies `balance >= -limit` whenever it is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The account ID
    pub id: AccountId,

    /// Maximum amount the balance may go negative
    pub limit: Cents,

    /// Current balance in cents
    pub balance: Cents,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `id` - The account ID
    /// * `limit` - The credit limit (non-negative)
    pub fn new(id: AccountId, limit: Cents) -> Self {
        Account {
            id,
            limit,
            balance: 0,
        }
    }

    /// Lowest balance this account may reach
    pub fn floor(&self) -> Cents {
        -self.limit
    }

    /// The default provisioning set
    pub fn defaults() -> Vec<Account> {
        DEFAULT_ACCOUNTS
            .iter()
            .map(|&(id, limit)| Account::new(id, limit))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_at_zero() {
        let account = Account::new(7, 500);
        assert_eq!(account.id, 7);
        assert_eq!(account.limit, 500);
        assert_eq!(account.balance, 0);
        assert_eq!(account.floor(), -500);
    }

    #[test]
    fn test_defaults_match_provisioning_table() {
        let accounts = Account::defaults();
        let ids: Vec<_> = accounts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(accounts[1].limit, 80_000);
        assert!(accounts.iter().all(|a| a.balance == 0));
    }
}
