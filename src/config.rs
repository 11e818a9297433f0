//! Startup configuration, resolved once before any work begins.
//!
//! A missing token is a fatal startup condition, not something discovered
//! halfway through a delivery run.

use std::fmt;

use crate::error::{ConfigError, Result};

/// Environment variables consulted for the store token, in order.
const TOKEN_VARS: [&str; 2] = ["GITHUB_FINE_GRAINED_PAT", "GITHUB_PAT"];

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// Personal access token for the secret store.
    pub token: String,
    /// API base URL, normalized without a trailing slash.
    pub api_url: String,
}

impl Config {
    /// Resolve configuration from the process environment and the given
    /// API base URL.
    ///
    /// The token is taken from `GITHUB_FINE_GRAINED_PAT`, falling back to
    /// `GITHUB_PAT`. An empty value counts as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if neither variable is set, or
    /// `ConfigError::InvalidApiUrl` if the base URL does not parse as an
    /// http(s) URL.
    pub fn resolve(api_url: &str) -> Result<Self> {
        let token = token_from_env().ok_or(ConfigError::MissingToken)?;
        let api_url = normalize_api_url(api_url)?;

        Ok(Self { token, api_url })
    }
}

// Keep the token out of debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn token_from_env() -> Option<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
}

fn normalize_api_url(api_url: &str) -> Result<String> {
    let url = reqwest::Url::parse(api_url)
        .map_err(|e| ConfigError::InvalidApiUrl(format!("{}: {}", api_url, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidApiUrl(format!(
            "{}: expected an http(s) URL",
            api_url
        ))
        .into());
    }

    Ok(api_url.trim_end_matches('/').to_string())
}
