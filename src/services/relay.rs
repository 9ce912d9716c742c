//! Request dispatch service.
//!
//! Resolves the caller's method token, attaches headers and (for
//! payload-carrying methods) the body, executes one round trip through the
//! transport, and normalizes whatever came back into a [`RelayResponse`].
//! Remote error statuses are captured, not raised; only failures without a
//! remote response become [`RelayError`]s.

use chrono::{DateTime, Local, NaiveDate};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

use crate::config::RelayConfig;
use crate::errors::{RelayError, RelayResult};
use crate::observability::RequestMetrics;
use crate::transport::{HttpMethod, HttpRequest, HttpTransport, TransportError};
use crate::types::{RelayRequest, RelayResponse, ResponseHeaders};

/// Stateless request dispatcher. Safe to share across tasks; each call is one
/// independent round trip.
pub struct RelayService {
    transport: Arc<dyn HttpTransport>,
    config: RelayConfig,
    metrics: Arc<RequestMetrics>,
}

impl RelayService {
    /// Creates a new relay service.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        config: RelayConfig,
        metrics: Arc<RequestMetrics>,
    ) -> Self {
        Self {
            transport,
            config,
            metrics,
        }
    }

    /// Executes the described request and returns the normalized result.
    ///
    /// Fails only when the method token is unrecognized or the transport
    /// could not complete a round trip; a remote 4xx/5xx comes back as an
    /// ordinary [`RelayResponse`].
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: RelayRequest) -> RelayResult<RelayResponse> {
        // Resolve the method before touching the network.
        let method = match HttpMethod::from_str(&request.method) {
            Ok(method) => method,
            Err(unknown) => {
                self.metrics.record_dispatch_failure();
                return Err(RelayError::method(unknown.0));
            }
        };
        self.metrics.record_request();

        let http_request = self.build_request(method, &request)?;

        match self.transport.send(http_request).await {
            Ok(response) => {
                tracing::debug!(status = response.status, "Round trip completed");
                Ok(self.capture(response.status, &response.headers, &response.body))
            }
            // Some transports surface non-2xx responses as status-carrying
            // errors; fold those into the same capture path.
            Err(TransportError::Status {
                status,
                headers,
                body,
            }) => {
                tracing::debug!(status, "Round trip completed via status error");
                Ok(self.capture(status, &headers, &body))
            }
            Err(err) => {
                self.metrics.record_dispatch_failure();
                tracing::warn!(error = %err, "Dispatch failed");
                Err(err.into())
            }
        }
    }

    /// Builds the outbound transport request.
    fn build_request(
        &self,
        method: HttpMethod,
        request: &RelayRequest,
    ) -> RelayResult<HttpRequest> {
        let mut headers: HashMap<String, String> = self
            .config
            .default_headers
            .iter()
            .cloned()
            .collect();

        // Caller headers attach verbatim and win over configured defaults.
        if let Some(caller_headers) = &request.headers {
            for (name, value) in caller_headers {
                headers.insert(name.clone(), value.clone());
            }
        }

        // The body rides along only on payload-carrying methods. Presence of
        // headers plays no part in this decision.
        let body = match &request.body {
            Some(body) if method.is_payload_carrying() => Some(serde_json::to_vec(body)?),
            _ => None,
        };

        Ok(HttpRequest {
            method,
            url: request.url.clone(),
            headers,
            body,
            timeout: None,
        })
    }

    /// Captures a completed round trip into the uniform response shape.
    fn capture(
        &self,
        status: u16,
        headers: &HashMap<String, String>,
        body: &[u8],
    ) -> RelayResponse {
        self.metrics.record_response(status);
        let raw = String::from_utf8_lossy(body);

        RelayResponse {
            status_code: status,
            body: normalize_body(&raw),
            headers: Some(derive_headers(headers)),
        }
    }
}

impl std::fmt::Debug for RelayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayService")
            .field("config", &self.config)
            .finish()
    }
}

/// Normalizes a raw response payload.
///
/// Blank payloads vanish, valid JSON text becomes the parsed tree, and
/// anything else falls back to the raw string. Parse failures never escape.
fn normalize_body(raw: &str) -> Option<serde_json::Value> {
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(raw) {
        Ok(tree) => Some(tree),
        Err(_) => Some(serde_json::Value::String(raw.to_string())),
    }
}

/// Derives the fixed header subset from the remote's response headers.
fn derive_headers(headers: &HashMap<String, String>) -> ResponseHeaders {
    ResponseHeaders {
        content_type: header_value(headers, "content-type").and_then(parse_charset),
        date: header_value(headers, "date").and_then(parse_local_date),
        connection: header_value(headers, "connection").map(str::to_string),
    }
}

/// Case-insensitive header lookup. reqwest lowercases names, but headers from
/// status-carrying transport errors may arrive in any casing.
fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Extracts the charset parameter from a Content-Type value.
fn parse_charset(content_type: &str) -> Option<String> {
    content_type
        .parse::<mime::Mime>()
        .ok()?
        .get_param(mime::CHARSET)
        .map(|charset| charset.as_str().to_string())
}

/// Converts an RFC 2822 Date header to a calendar date in the local zone.
fn parse_local_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|date| date.with_timezone(&Local).date_naive())
}
