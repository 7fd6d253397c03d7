//! Credential settings read from the process environment.
//!
//! Loaded once at startup and passed explicitly into backend selection,
//! never consulted as ambient global state. Missing variables default to
//! the empty string; an empty credential surfaces later as an
//! authentication failure from the backend that needed it.

use std::env;

/// API credentials for the remote backends
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub anthropic_api_key: String,
    pub openai_api_key: String,
    pub openai_org_id: String,
}

impl Settings {
    /// Read all credentials from the environment.
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_org_id: env::var("OPENAI_ORG_ID").unwrap_or_default(),
        }
    }
}
