//! Error types for the relay client.
//!
//! Remote responses with error statuses are *not* errors here; they come back
//! as ordinary [`crate::RelayResponse`] values. This module covers only the
//! failures that never produce a remote response: bad configuration, an
//! unrecognized method token, and transport-level breakdowns.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Error type for relay dispatch failures.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration error (invalid timeout, user agent, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Unrecognized HTTP method token.
    #[error("Unrecognized HTTP method: {token:?}")]
    Method {
        /// The token that failed to resolve.
        token: String,
    },

    /// Network/connection error (DNS failure, connection refused).
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
        /// Underlying cause.
        cause: Option<String>,
    },

    /// Timeout while waiting for the remote.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Other transport-layer failure (malformed response, request build failure).
    #[error("Transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// Request body could not be serialized.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl RelayError {
    /// Returns true if the failure was caused by the caller's input rather
    /// than by the network.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::Configuration { .. }
                | RelayError::Method { .. }
                | RelayError::Serialization { .. }
        )
    }

    /// Status code the inbound boundary should report for this failure.
    ///
    /// Client-input failures map to 400, timeouts to 504, and everything the
    /// network ate to 502.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Configuration { .. }
            | RelayError::Method { .. }
            | RelayError::Serialization { .. } => 400,
            RelayError::Timeout { .. } => 504,
            RelayError::Network { .. } | RelayError::Transport { .. } => 502,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        RelayError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a method resolution error.
    pub fn method(token: impl Into<String>) -> Self {
        RelayError::Method {
            token: token.into(),
        }
    }
}

impl From<TransportError> for RelayError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connection { message } => RelayError::Network {
                message,
                cause: None,
            },
            TransportError::Timeout { timeout } => RelayError::Timeout {
                message: format!("no response within {timeout:?}"),
            },
            // Status-carrying errors are captured by the dispatcher before
            // this conversion; reaching here means a bug upstream, so report
            // the status rather than lose it.
            TransportError::Status { status, .. } => RelayError::Transport {
                message: format!("unhandled status-carrying transport error (HTTP {status})"),
            },
            TransportError::InvalidResponse { message } => RelayError::Transport { message },
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            RelayError::Network {
                message: err.to_string(),
                cause: None,
            }
        } else {
            RelayError::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Serialization {
            message: err.to_string(),
        }
    }
}
