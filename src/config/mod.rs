//! Configuration module for the relay client.
//!
//! The relay carries no credentials of its own (authentication headers pass
//! through from the caller verbatim), so configuration is limited to transport
//! behavior: timeouts, the user agent, and headers applied to every outbound
//! request.

use std::time::Duration;

use crate::errors::{RelayError, RelayResult};

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent string.
pub const DEFAULT_USER_AGENT: &str = concat!("relay-client/", env!("CARGO_PKG_VERSION"));

/// Configuration for the relay client.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Total per-request timeout.
    pub timeout: Duration,
    /// Timeout for establishing the connection.
    pub connect_timeout: Duration,
    /// User agent sent with every outbound request.
    pub user_agent: String,
    /// Headers applied to every outbound request before the caller's own;
    /// per-request headers win on conflict.
    pub default_headers: Vec<(String, String)>,
}

impl RelayConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RelayConfigBuilder {
        RelayConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RELAY_TIMEOUT` (optional): request timeout in seconds
    /// - `RELAY_CONNECT_TIMEOUT` (optional): connect timeout in seconds
    /// - `RELAY_USER_AGENT` (optional): user agent string
    pub fn from_env() -> RelayResult<Self> {
        let mut builder = RelayConfigBuilder::new();

        if let Ok(timeout_str) = std::env::var("RELAY_TIMEOUT") {
            match timeout_str.parse::<u64>() {
                Ok(secs) => builder = builder.timeout_secs(secs),
                Err(_) => {
                    tracing::warn!(value = %timeout_str, "Ignoring unparseable RELAY_TIMEOUT");
                }
            }
        }

        if let Ok(timeout_str) = std::env::var("RELAY_CONNECT_TIMEOUT") {
            match timeout_str.parse::<u64>() {
                Ok(secs) => builder = builder.connect_timeout(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(value = %timeout_str, "Ignoring unparseable RELAY_CONNECT_TIMEOUT");
                }
            }
        }

        if let Ok(user_agent) = std::env::var("RELAY_USER_AGENT") {
            builder = builder.user_agent(user_agent);
        }

        builder.build()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: Vec::new(),
        }
    }
}

/// Builder for `RelayConfig`.
#[derive(Debug, Default)]
pub struct RelayConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl RelayConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Adds a header applied to every outbound request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> RelayResult<RelayConfig> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(RelayError::configuration("Timeout cannot be zero"));
        }

        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        if connect_timeout.is_zero() {
            return Err(RelayError::configuration("Connect timeout cannot be zero"));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            return Err(RelayError::configuration("User agent cannot be empty"));
        }

        Ok(RelayConfig {
            timeout,
            connect_timeout,
            user_agent,
            default_headers: self.default_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_success() {
        let config = RelayConfig::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .user_agent("relay-test/1.0")
            .default_header("X-Relay", "1")
            .build()
            .unwrap();

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.user_agent, "relay-test/1.0");
        assert_eq!(
            config.default_headers,
            vec![("X-Relay".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = RelayConfig::builder().build().unwrap();

        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_config_builder_zero_timeout() {
        let result = RelayConfig::builder().timeout(Duration::ZERO).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder_empty_user_agent() {
        let result = RelayConfig::builder().user_agent("  ").build();
        assert!(result.is_err());
    }
}
