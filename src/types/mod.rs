//! Wire types exchanged with the inbound collaborator.
//!
//! [`RelayRequest`] is the caller-supplied description of the call to make;
//! [`RelayResponse`] is the uniform result shape every completed round trip
//! produces, whatever the remote's status was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::RelayError;

/// Caller-supplied description of an outbound HTTP call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayRequest {
    /// Absolute target URL. Not validated beyond what the transport requires.
    pub url: String,
    /// Case-insensitive HTTP method token (e.g. `"get"`, `"POST"`).
    pub method: String,
    /// Headers to attach verbatim, one value per name.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    /// Arbitrary payload, attached only for payload-carrying methods.
    #[serde(default)]
    pub body: Option<Value>,
}

impl RelayRequest {
    /// Creates a request for the given URL and method token.
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: None,
            body: None,
        }
    }

    /// Adds a header. Re-adding a name overwrites the previous value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Uniform result of an executed request.
///
/// Produced for every call that completed a transport round trip, whether the
/// remote answered 2xx or 4xx/5xx; the two differ only in `status_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    /// HTTP status, verbatim from the remote response.
    pub status_code: u16,
    /// Normalized payload: `None` for blank bodies, the parsed JSON tree when
    /// the payload is valid JSON text, the raw string otherwise.
    pub body: Option<Value>,
    /// Derived response headers, when captured.
    pub headers: Option<ResponseHeaders>,
}

impl RelayResponse {
    /// Encodes a dispatch failure into the fixed-shape payload the inbound
    /// boundary returns to its own caller.
    pub fn failure(error: &RelayError) -> Self {
        Self {
            status_code: error.status_code(),
            body: Some(Value::String(format!("Failed to execute request: {error}"))),
            headers: None,
        }
    }
}

/// Fixed derived subset of the remote's response headers.
///
/// This is deliberately narrower than a full passthrough map; downstream
/// consumers get these three derived fields and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseHeaders {
    /// Charset parameter of the `Content-Type` header, when declared.
    pub content_type: Option<String>,
    /// `Date` header converted to a calendar date in the local time zone.
    pub date: Option<NaiveDate>,
    /// `Connection` header value.
    pub connection: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_without_headers_or_body() {
        let request: RelayRequest =
            serde_json::from_value(json!({"url": "https://example.com", "method": "get"}))
                .unwrap();

        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.method, "get");
        assert!(request.headers.is_none());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_request_body_supports_nested_structures() {
        let request: RelayRequest = serde_json::from_value(json!({
            "url": "https://example.com",
            "method": "post",
            "body": {"items": [1, 2, {"deep": null}], "flag": true}
        }))
        .unwrap();

        assert_eq!(
            request.body,
            Some(json!({"items": [1, 2, {"deep": null}], "flag": true}))
        );
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = RelayResponse {
            status_code: 201,
            body: Some(json!({"k": "v"})),
            headers: None,
        };

        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(
            encoded,
            json!({"statusCode": 201, "body": {"k": "v"}, "headers": null})
        );
    }

    #[test]
    fn test_failure_payload_shape() {
        let payload = RelayResponse::failure(&RelayError::method("FETCH"));

        assert_eq!(payload.status_code, 400);
        assert!(payload.headers.is_none());
        match payload.body {
            Some(Value::String(message)) => {
                assert!(message.starts_with("Failed to execute request:"));
                assert!(message.contains("FETCH"));
            }
            other => panic!("expected string body, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_payload_distinguishes_transport_errors() {
        let payload = RelayResponse::failure(&RelayError::Timeout {
            message: "no response within 30s".to_string(),
        });
        assert_eq!(payload.status_code, 504);
    }
}
