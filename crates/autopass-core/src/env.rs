//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Common environment variable names.
pub mod vars {
    /// Browser executable used to open entry URLs.
    pub const BROWSER: &str = "BROWSER";

    /// Password store root, shared with `pass` itself.
    pub const PASSWORD_STORE_DIR: &str = "PASSWORD_STORE_DIR";

    /// autopass config file override.
    pub const AUTOPASS_CONFIG: &str = "AUTOPASS_CONFIG";

    /// autopass log filter.
    pub const AUTOPASS_LOG: &str = "AUTOPASS_LOG";
}
