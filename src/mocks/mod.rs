//! Mock implementations for testing.
//!
//! Provides a mock transport for unit testing the dispatcher without making
//! real network calls. Besides plain responses, outcomes can be queued as
//! status-carrying or connection-level transport errors, so both transport
//! conventions are testable.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport for testing.
pub struct MockTransport {
    outcomes: Mutex<Vec<MockOutcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

/// A recorded outbound request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates an empty response with the given status.
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a JSON response with the given status.
    pub fn json_with_status<T: serde::Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a 200 JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        Self::json_with_status(200, value)
    }

    /// Creates a plain-text response with the given status.
    pub fn text_with_status(status: u16, body: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            "text/plain; charset=utf-8".to_string(),
        );

        Self {
            status,
            headers,
            body: body.as_bytes().to_vec(),
        }
    }

    /// Adds a header to the response.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

enum MockOutcome {
    Response(MockResponse),
    StatusError {
        status: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    },
    ConnectionError(String),
    TimeoutError(Duration),
}

impl MockTransport {
    /// Creates a new mock transport with no queued outcomes.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Response(response));
    }

    /// Queues a 200 JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues a status-carrying transport error, emulating clients that raise
    /// non-2xx responses instead of returning them.
    pub fn queue_status_error(&self, status: u16, body: Vec<u8>) {
        self.outcomes.lock().unwrap().push(MockOutcome::StatusError {
            status,
            headers: HashMap::new(),
            body,
        });
    }

    /// Queues a connection-level failure.
    pub fn queue_connection_error(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::ConnectionError(message.into()));
    }

    /// Queues a timeout failure.
    pub fn queue_timeout(&self, timeout: Duration) {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::TimeoutError(timeout));
    }

    /// Sets the response used when the queue is empty.
    pub fn set_default(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_outcome(&self) -> MockOutcome {
        let mut outcomes = self.outcomes.lock().unwrap();
        if !outcomes.is_empty() {
            outcomes.remove(0)
        } else {
            MockOutcome::Response(
                self.default_response
                    .lock()
                    .unwrap()
                    .clone()
                    .unwrap_or_else(|| MockResponse::with_status(500)),
            )
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body: request.body,
        });

        match self.next_outcome() {
            MockOutcome::Response(response) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            MockOutcome::StatusError {
                status,
                headers,
                body,
            } => Err(TransportError::Status {
                status,
                headers,
                body,
            }),
            MockOutcome::ConnectionError(message) => Err(TransportError::Connection { message }),
            MockOutcome::TimeoutError(timeout) => Err(TransportError::Timeout { timeout }),
        }
    }
}
