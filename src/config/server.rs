//! HTTP server settings loaded from environment variables.
//!
//! Authentication itself happens upstream; the service only trusts the header named by
//! `STUDENTBOARD_ACTOR_HEADER` to carry the id of the signed-in user.

use crate::errors::{Error, Result};
use std::net::SocketAddr;

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_ACTOR_HEADER: &str = "x-user-id";
const DEFAULT_COUNTRY: &str = "LK";
const DEFAULT_TEMPLATES_PATH: &str = "templates.toml";

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds to
    pub bind: SocketAddr,
    /// Request header carrying the authenticated user id
    pub actor_header: String,
    /// Curriculum country used when listing subjects
    pub country: String,
    /// Path of the subject/template seed file
    pub templates_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            actor_header: DEFAULT_ACTOR_HEADER.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            templates_path: DEFAULT_TEMPLATES_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads `STUDENTBOARD_BIND`, `STUDENTBOARD_ACTOR_HEADER`, `STUDENTBOARD_COUNTRY` and
    /// `STUDENTBOARD_TEMPLATES`, using defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(super::optional_env)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Result<Option<String>>) -> Result<Self> {
        let bind_raw = lookup("STUDENTBOARD_BIND")?.unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().map_err(|e| Error::Config {
            message: format!("Invalid STUDENTBOARD_BIND '{bind_raw}': {e}"),
        })?;

        let actor_header = lookup("STUDENTBOARD_ACTOR_HEADER")?
            .unwrap_or_else(|| DEFAULT_ACTOR_HEADER.to_string())
            .to_ascii_lowercase();
        if actor_header.trim().is_empty() {
            return Err(Error::Config {
                message: "STUDENTBOARD_ACTOR_HEADER cannot be empty".to_string(),
            });
        }

        Ok(Self {
            bind,
            actor_header,
            country: lookup("STUDENTBOARD_COUNTRY")?
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            templates_path: lookup("STUDENTBOARD_TEMPLATES")?
                .unwrap_or_else(|| DEFAULT_TEMPLATES_PATH.to_string()),
        })
    }
}
