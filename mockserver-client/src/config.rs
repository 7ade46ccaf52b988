//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for a [`Client`](crate::Client).
///
/// Deserializable so it can sit inside a caller's own configuration file:
///
/// ```
/// # use mockserver_client::ClientConfig;
/// let config: ClientConfig =
///     serde_json::from_str(r#"{"address": "mockserver:1080", "timeout_ms": 5000}"#).unwrap();
/// assert_eq!(config.address(), "mockserver:1080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// MockServer address, with or without scheme.
    address: String,
    /// Per-request timeout in milliseconds. Zero is rejected when the client
    /// is built.
    timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: "localhost:1080".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl ClientConfig {
    /// Configuration for the given address with the default timeout.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Set the per-request timeout, at millisecond precision.
    ///
    /// A non-zero timeout shorter than a millisecond rounds up to one.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = if millis == 0 && !timeout.is_zero() {
            1
        } else {
            millis
        };
        self
    }

    /// Get the configured address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
