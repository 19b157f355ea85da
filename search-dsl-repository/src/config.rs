//! Configuration types for search clients.

use std::time::Duration;

/// Default search engine URL.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings of a search client.
///
/// Exposed read-only through `SearchClient::settings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL of the search engine (e.g. "http://localhost:9200").
    pub url: String,
    /// Timeout applied to every request. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
    /// Skip any system proxy configuration.
    pub disable_proxy: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            disable_proxy: true,
        }
    }
}

impl ClientSettings {
    /// Create settings for the given URL with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Use a custom request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Disable the per-request timeout (use with caution).
    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ClientSettings::default();

        assert_eq!(settings.url, DEFAULT_URL);
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
        assert!(settings.disable_proxy);
    }

    #[test]
    fn test_settings_builders() {
        let settings = ClientSettings::new("http://search:9200")
            .with_request_timeout(Duration::from_secs(5));
        assert_eq!(settings.url, "http://search:9200");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(5)));

        let settings = settings.without_request_timeout();
        assert!(settings.request_timeout.is_none());
    }
}
