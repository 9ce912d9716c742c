//! Relay client.
//!
//! The top-level handle callers hold: owns the configuration, the transport,
//! and the dispatch service.

use std::sync::Arc;

use crate::config::{RelayConfig, RelayConfigBuilder};
use crate::errors::{RelayError, RelayResult};
use crate::observability::{MetricsSnapshot, RequestMetrics};
use crate::services::RelayService;
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::{RelayRequest, RelayResponse};

/// The main relay client.
///
/// Cheap to share behind an `Arc`; every [`execute`](RelayClient::execute)
/// call is an independent round trip with no state shared between calls
/// beyond the connection pool inside the transport.
///
/// # Example
///
/// ```rust,no_run
/// use relay_client::{RelayClient, RelayRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RelayClient::builder().timeout_secs(10).build()?;
///
///     let response = client
///         .execute(RelayRequest::new("https://api.example.com/health", "get"))
///         .await?;
///     println!("status {}", response.status_code);
///     Ok(())
/// }
/// ```
pub struct RelayClient {
    config: RelayConfig,
    service: RelayService,
    metrics: Arc<RequestMetrics>,
}

impl RelayClient {
    /// Creates a new client builder.
    pub fn builder() -> RelayClientBuilder {
        RelayClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `RELAY_TIMEOUT`, `RELAY_CONNECT_TIMEOUT`, and
    /// `RELAY_USER_AGENT`, all optional.
    pub fn from_env() -> RelayResult<Self> {
        let config = RelayConfig::from_env()?;
        RelayClientBuilder::from_config(config).build()
    }

    /// Executes the described request and returns the normalized result.
    pub async fn execute(&self, request: RelayRequest) -> RelayResult<RelayResponse> {
        self.service.execute(request).await
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Returns a snapshot of the request counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the relay client.
pub struct RelayClientBuilder {
    config_builder: RelayConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl RelayClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: RelayConfigBuilder::new(),
            transport: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: RelayConfig) -> Self {
        let mut config_builder = RelayConfigBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone());
        for (name, value) in config.default_headers {
            config_builder = config_builder.default_header(name, value);
        }

        Self {
            config_builder,
            transport: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.connect_timeout(timeout);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(user_agent);
        self
    }

    /// Adds a header applied to every outbound request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.default_header(name, value);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> RelayResult<RelayClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransportImpl::new(&config).map_err(|e| {
                RelayError::Configuration {
                    message: e.to_string(),
                }
            })?),
        };

        let metrics = Arc::new(RequestMetrics::new());
        let service = RelayService::new(
            Arc::clone(&transport),
            config.clone(),
            Arc::clone(&metrics),
        );

        Ok(RelayClient {
            config,
            service,
            metrics,
        })
    }
}

impl Default for RelayClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
