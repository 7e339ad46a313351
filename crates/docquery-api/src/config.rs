//! Backend client configuration.

use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
// Answer generation routinely takes much longer than the other endpoints.
const DEFAULT_ASK_TIMEOUT: Duration = Duration::from_secs(120);

/// Explicitly injected configuration for the HTTP backend client.
///
/// There is deliberately no ambient default base URL and no process-wide
/// state; whoever constructs the client says where it points.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend service, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to every endpoint except ask.
    pub request_timeout: Duration,
    /// Timeout applied to the ask endpoint.
    pub ask_timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            ask_timeout: DEFAULT_ASK_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_ask_timeout(mut self, timeout: Duration) -> Self {
        self.ask_timeout = timeout;
        self
    }
}
