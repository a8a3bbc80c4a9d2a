//! Account records and their file-backed storage.
//!
//! This crate provides the account record model, the JSON codec that
//! validates untrusted documents, and a store keeping one document per login.
//!
//! # Example
//!
//! ```
//! use acct_store::{AccountService, AccountStore, FileStore};
//!
//! # fn example() -> Result<(), acct_store::AccountError> {
//! let dir = std::env::temp_dir().join("acct-store-doc");
//! let service = AccountService::new(FileStore::open(&dir)?);
//!
//! let body = br#"{"login":"user1234","name":"Anonymous","sex":"Male","birthday":"2000-01-01","password":"qwerty"}"#;
//! let account = service.create(body)?;
//! assert_eq!(service.read("user1234")?, account);
//!
//! service.update("user1234", br#"{"name":"Deanonymous"}"#)?;
//! assert!(service.store().contains("user1234")?);
//! # Ok(())
//! # }
//! ```

mod account;
mod error;

pub mod cli;
pub mod codec;
pub mod service;
pub mod store;

pub use account::{Account, Field, Sex, UnknownSex};
pub use cli::StoreArgs;
pub use error::AccountError;
pub use service::{AccountService, Listing};
pub use store::{AccountStore, FileStore};
