//! Data-access trait for account stores.

use std::sync::Arc;

use crate::account::Account;
use crate::error::AccountError;

/// Data-access layer for account records, keyed by login.
///
/// Implementations must be thread-safe (`Send + Sync`). They do not
/// coordinate concurrent calls on the same login: the last `store` wins.
pub trait AccountStore: Send + Sync {
    /// Load the account stored under `login`.
    ///
    /// Returns [`AccountError::NotFound`] if nothing is stored and
    /// [`AccountError::Corrupted`] if the stored record does not parse.
    fn get(&self, login: &str) -> Result<Account, AccountError>;

    /// Write `account` under its login, replacing any previous record.
    fn store(&self, account: &Account) -> Result<(), AccountError>;

    /// Delete the account stored under `login`.
    ///
    /// Returns [`AccountError::NotFound`] if nothing is stored.
    fn remove(&self, login: &str) -> Result<(), AccountError>;

    /// Check whether a record is stored under `login`.
    fn contains(&self, login: &str) -> Result<bool, AccountError>;

    /// Logins of all stored records, sorted.
    fn logins(&self) -> Result<Vec<String>, AccountError>;
}

/// Blanket implementation for `Arc<S>` where `S: AccountStore`.
impl<S: AccountStore + ?Sized> AccountStore for Arc<S> {
    #[inline]
    fn get(&self, login: &str) -> Result<Account, AccountError> {
        (**self).get(login)
    }

    #[inline]
    fn store(&self, account: &Account) -> Result<(), AccountError> {
        (**self).store(account)
    }

    #[inline]
    fn remove(&self, login: &str) -> Result<(), AccountError> {
        (**self).remove(login)
    }

    #[inline]
    fn contains(&self, login: &str) -> Result<bool, AccountError> {
        (**self).contains(login)
    }

    #[inline]
    fn logins(&self) -> Result<Vec<String>, AccountError> {
        (**self).logins()
    }
}
