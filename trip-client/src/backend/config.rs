//! Backend client configuration.

/// Default base URL for the aggregation backend.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default cap on the number of stops fetched for the metadata layer.
const DEFAULT_STOPS_LIMIT: u32 = 500;

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the aggregation backend.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// `limit` query parameter for the stops endpoint.
    pub stops_limit: u32,
}

impl BackendConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            stops_limit: DEFAULT_STOPS_LIMIT,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the stops fetch limit.
    pub fn with_stops_limit(mut self, limit: u32) -> Self {
        self.stops_limit = limit;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new()
    }
}
