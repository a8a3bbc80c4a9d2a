//! Durable account storage.
//!
//! This module provides:
//!
//! - [`AccountStore`] — data-access trait (implement this for new backends)
//! - [`FileStore`] — one JSON document per login under a base directory
//!
//! A store persists whole, already validated [`Account`](crate::Account)s.
//! Stores keep no cache or index: every call goes to the backing medium.

mod file;
mod traits;

pub use file::FileStore;
pub use traits::AccountStore;
