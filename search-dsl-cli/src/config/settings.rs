//! Settings read from the environment.

use std::env;
use std::time::Duration;

use crate::CliError;
use search_dsl_repository::{config::DEFAULT_URL, ClientSettings};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub opensearch_url: String,
    /// `None` disables the per-request timeout (`OPENSEARCH_TIMEOUT_SECS=0`).
    pub request_timeout: Option<Duration>,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_TIMEOUT_SECS`: request timeout in seconds, 0 for none (default: 30)
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let opensearch_url = lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_URL.to_string());

        let timeout_secs = match lookup("OPENSEARCH_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                CliError::config(format!("OPENSEARCH_TIMEOUT_SECS must be a number: {}", e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            opensearch_url,
            request_timeout,
        })
    }

    /// Client settings for the OpenSearch client.
    pub fn client_settings(&self) -> ClientSettings {
        let settings = ClientSettings::new(self.opensearch_url.clone());
        match self.request_timeout {
            Some(timeout) => settings.with_request_timeout(timeout),
            None => settings.without_request_timeout(),
        }
    }
}
