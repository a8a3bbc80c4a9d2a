//! File-backed account store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use acct_core::RECORD_EXTENSION;
use tempfile::NamedTempFile;
use tracing::debug;

use super::AccountStore;
use crate::account::Account;
use crate::codec;
use crate::error::AccountError;

/// Stores each account as `<login>.json` under a base directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a concurrent reader sees either the old or the new
/// record, never a partial one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AccountError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| AccountError::StorageUnavailable {
            path: dir.clone(),
            source,
        })?;
        debug!(dir = %dir.display(), "account store opened");
        Ok(Self { dir })
    }

    /// Base directory of the store.
    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the record of `login`.
    ///
    /// The login is checked before it is joined to the base directory, even
    /// when it already went through the codec.
    pub fn path_for(&self, login: &str) -> Result<PathBuf, AccountError> {
        codec::check_login(login)?;
        Ok(self.dir.join(format!("{login}.{RECORD_EXTENSION}")))
    }

    fn unavailable(&self, source: io::Error) -> AccountError {
        AccountError::StorageUnavailable {
            path: self.dir.clone(),
            source,
        }
    }
}

impl AccountStore for FileStore {
    fn get(&self, login: &str) -> Result<Account, AccountError> {
        let path = self.path_for(login)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AccountError::NotFound(login.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        let account = codec::parse_full(&bytes).map_err(|e| {
            debug!(login, error = %e, "stored record rejected by codec");
            AccountError::Corrupted(login.to_owned())
        })?;
        if account.login() != login {
            debug!(login, stored = account.login(), "stored record has a foreign login");
            return Err(AccountError::Corrupted(login.to_owned()));
        }
        Ok(account)
    }

    fn store(&self, account: &Account) -> Result<(), AccountError> {
        let path = self.path_for(account.login())?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| self.unavailable(e))?;
        tmp.write_all(codec::serialize(account).as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(login = account.login(), "account stored");
        Ok(())
    }

    fn remove(&self, login: &str) -> Result<(), AccountError> {
        let path = self.path_for(login)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(login, "account removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AccountError::NotFound(login.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, login: &str) -> Result<bool, AccountError> {
        let path = self.path_for(login)?;
        Ok(path.try_exists()?)
    }

    fn logins(&self) -> Result<Vec<String>, AccountError> {
        let mut logins = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| self.unavailable(e))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            // Skip names that could not have been written by `store`.
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && codec::check_login(stem).is_ok()
            {
                logins.push(stem.to_owned());
            }
        }
        logins.sort();
        Ok(logins)
    }
}
