//! Account operations consumed by the HTTP gateway and the CLI.

use tracing::{debug, warn};

use crate::account::Account;
use crate::codec;
use crate::error::AccountError;
use crate::store::AccountStore;

/// Create/read/update/delete over raw account documents.
///
/// Every document is validated by the codec before the store is touched.
#[derive(Debug, Clone)]
pub struct AccountService<S> {
    store: S,
}

impl<S: AccountStore> AccountService<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create (or replace) an account from a complete description.
    pub fn create(&self, body: &[u8]) -> Result<Account, AccountError> {
        let account = codec::parse_full(body)?;
        self.store.store(&account)?;
        debug!(login = account.login(), "account created");
        Ok(account)
    }

    /// Load an account.
    pub fn read(&self, login: &str) -> Result<Account, AccountError> {
        self.store.get(login)
    }

    /// Apply a partial description to an existing account.
    ///
    /// A changed `login` moves the record: the new key is written first and
    /// the old key removed afterwards. If that removal fails the record exists
    /// under both keys and [`AccountError::RenameIncomplete`] is returned.
    pub fn update(&self, login: &str, body: &[u8]) -> Result<Account, AccountError> {
        let mut account = self.store.get(login)?;
        codec::parse_partial(body, &mut account)?;

        if account.login() == login {
            self.store.store(&account)?;
            debug!(login, "account updated");
            return Ok(account);
        }

        let new_login = account.login().to_owned();
        if self.store.contains(&new_login)? {
            return Err(AccountError::LoginTaken(new_login));
        }
        self.store.store(&account)?;
        if let Err(e) = self.store.remove(login) {
            warn!(old = login, new = %new_login, error = %e, "rename left a duplicate record");
            return Err(AccountError::RenameIncomplete {
                old: login.to_owned(),
                new: new_login,
                source: Box::new(e),
            });
        }
        debug!(old = login, new = %new_login, "account renamed");
        Ok(account)
    }

    /// Delete an account.
    pub fn delete(&self, login: &str) -> Result<(), AccountError> {
        self.store.remove(login)
    }

    /// Load every stored account, in login order.
    ///
    /// Unreadable records are reported in [`Listing::corrupted`] instead of
    /// failing the whole listing. Records removed while listing are skipped.
    pub fn list(&self) -> Result<Listing, AccountError> {
        let mut listing = Listing::default();
        for login in self.store.logins()? {
            match self.store.get(&login) {
                Ok(account) => listing.accounts.push(account),
                Err(AccountError::Corrupted(_)) => {
                    warn!(login = %login, "skipping corrupted record");
                    listing.corrupted.push(login);
                }
                Err(AccountError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(listing)
    }
}

/// Result of [`AccountService::list`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Readable accounts, in login order.
    pub accounts: Vec<Account>,
    /// Logins whose stored record could not be read back.
    pub corrupted: Vec<String>,
}
