/// Client configuration for the Upbit REST API.
use std::time::Duration;

/// Production API host.
pub const UPBIT_API_URL: &str = "https://api.upbit.com";

/// Endpoint and transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpbitConfig {
    pub api_base: String,
    /// Per-request timeout applied by the default transport. `None` leaves it unset.
    pub timeout: Option<Duration>,
}

impl UpbitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Absolute URL for an API path. Leading slashes on `path` are ignored.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for UpbitConfig {
    fn default() -> Self {
        Self {
            api_base: UPBIT_API_URL.into(),
            timeout: None,
        }
    }
}
