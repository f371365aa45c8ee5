/// Database configuration and connection management
pub mod database;

/// HTTP server settings from environment variables
pub mod server;

/// Subject and template seed loading from templates.toml
pub mod templates;

use crate::errors::Result;
use std::env::VarError;

/// Reads an optional environment variable.
///
/// Unset is `Ok(None)`. A value that is set but not valid Unicode is an
/// [`Error::EnvVar`](crate::errors::Error::EnvVar) rather than being silently ignored.
pub fn optional_env(key: &str) -> Result<Option<String>> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_unset() -> Result<()> {
        assert_eq!(optional_env("STUDENTBOARD_UNSET_FOR_TESTS")?, None);
        Ok(())
    }
}
