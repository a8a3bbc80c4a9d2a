//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `acct_core::defaults`.

use std::path::PathBuf;

use acct_core::defaults;

/// Generate default value functions that forward to acct_core::defaults constants.
macro_rules! default_fns {
    // For Copy types (integers, bool, etc.)
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_shutdown_timeout_secs => DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64,
}

default_string_fns! {
    default_listen => DEFAULT_LISTEN,
}

pub(crate) fn default_data_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_DATA_DIR)
}
