//! Unified error types for `StudentBoard`.
//!
//! Every core operation returns [`Result`]. The HTTP layer maps each variant onto a status
//! code; see `api::error`.

use thiserror::Error;

/// All failures surfaced by the core and its configuration layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed caller input.
    #[error("Invalid input: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// No authenticated actor was supplied with the request.
    #[error("Authentication required")]
    Unauthenticated,

    /// The entity does not exist, or it exists but belongs to someone else.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"board"`
        entity: &'static str,
        /// Identifier the caller asked for
        id: String,
    },

    /// Seeded data is inconsistent (e.g. a template without cards).
    #[error("Data integrity error: {message}")]
    Integrity {
        /// Description of the inconsistency
        message: String,
    },

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Persistence gateway failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (binding sockets, reading files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable was malformed.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`] error.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
