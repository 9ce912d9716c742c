//! Dynamic HTTP Request Relay Client
//!
//! A production-ready Rust client for executing arbitrarily shaped outbound
//! HTTP requests. The caller describes a request (URL, method, headers, body)
//! at runtime; the relay performs the call and returns one uniform response
//! descriptor whether the remote answered 200 or 500. Only failures that never
//! produce a remote response (unknown method token, DNS failure, connection
//! refused, timeout) surface as errors.
//!
//! # Features
//!
//! - **Uniform Results**: 2xx and 4xx/5xx responses collapse into one
//!   [`RelayResponse`] shape, differing only in status code
//! - **Format Sniffing**: response bodies are parsed as JSON when possible and
//!   fall back to the raw string otherwise, never failing the call
//! - **Pluggable Transport**: the HTTP layer sits behind a trait and can be
//!   swapped for a mock in tests
//! - **Observability**: tracing instrumentation and request metrics
//! - **Async/Await**: built on Tokio and reqwest
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use relay_client::{RelayClient, RelayRequest};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RelayClient::builder().build()?;
//!
//!     let request = RelayRequest::new("https://api.example.com/items", "post")
//!         .with_header("Content-Type", "application/json")
//!         .with_body(json!({"name": "widget"}));
//!
//!     let response = client.execute(request).await?;
//!     println!("{} -> {:?}", response.status_code, response.body);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{RelayClient, RelayClientBuilder};
pub use config::RelayConfig;
pub use errors::{RelayError, RelayResult};
pub use services::RelayService;
pub use transport::{HttpMethod, HttpTransport};
pub use types::{RelayRequest, RelayResponse, ResponseHeaders};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
