//! Environment and configuration utilities.

use indoc::formatdoc;
use std::env;

/// Name of the environment variable holding the X API bearer token.
pub const TOKEN_VAR: &str = "X_BEARER_TOKEN";

/// Returns the bearer token from the environment, if one is set.
///
/// An empty value is treated the same as an unset variable. The token is
/// read once at startup and handed to the API service explicitly; nothing
/// else in the program reads the environment.
///
/// # Examples
///
/// ```
/// use birdwatch::conf::{bearer_token, TOKEN_VAR};
/// # use temp_env::with_var;
/// # with_var(TOKEN_VAR, Some("sekrit"), || {
/// assert_eq!(bearer_token(), Some(String::from("sekrit")));
/// # });
/// ```
///
/// ```
/// use birdwatch::conf::{bearer_token, TOKEN_VAR};
/// # use temp_env::with_var_unset;
/// # with_var_unset(TOKEN_VAR, || {
/// assert_eq!(bearer_token(), None);
/// # });
/// ```
pub fn bearer_token() -> Option<String> {
    env::var(TOKEN_VAR).ok().filter(|token| !token.is_empty())
}

/// The message printed when no bearer token is configured.
pub fn setup_hint() -> String {
    formatdoc! {"
        Error: {TOKEN_VAR} is not set.
        Create a bearer token in the X developer portal and export it:
          export {TOKEN_VAR}='your-token'"
    }
}
