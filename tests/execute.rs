//! End-to-end tests for request dispatch using a WireMock server.
//!
//! These drive the real reqwest transport through the full
//! dispatch/normalization path: header and body attachment, uniform capture
//! of remote error statuses, body format sniffing, and derived headers.

use pretty_assertions::assert_eq;
use relay_client::{RelayClient, RelayError, RelayRequest};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> RelayClient {
    let _ = relay_client::observability::init_tracing("relay_client=debug");
    RelayClient::builder()
        .timeout_secs(5)
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn test_post_echo_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/x"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"k": "v"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = RelayRequest::new(format!("{}/x", server.uri()), "POST")
        .with_header("Content-Type", "application/json")
        .with_body(json!({"k": "v"}));

    let response = client().execute(request).await.unwrap();

    assert_eq!(response.status_code, 201);
    assert_eq!(response.body, Some(json!({"k": "v"})));

    let received = &server.received_requests().await.unwrap()[0];
    assert_eq!(received.body, serde_json::to_vec(&json!({"k": "v"})).unwrap());
}

#[tokio::test]
async fn test_remote_404_is_a_response_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let response = client()
        .execute(RelayRequest::new(format!("{}/missing", server.uri()), "get"))
        .await
        .unwrap();

    assert_eq!(response.status_code, 404);
    assert_eq!(response.body, Some(json!({"error": "not found"})));
}

#[tokio::test]
async fn test_non_json_body_falls_back_to_raw_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&server)
        .await;

    let response = client()
        .execute(RelayRequest::new(server.uri(), "get"))
        .await
        .unwrap();

    assert_eq!(response.body, Some(json!("plain text")));
}

#[tokio::test]
async fn test_malformed_json_body_falls_back_to_raw_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{a:}"))
        .mount(&server)
        .await;

    let response = client()
        .execute(RelayRequest::new(server.uri(), "get"))
        .await
        .unwrap();

    assert_eq!(response.body, Some(json!("{a:}")));
}

#[tokio::test]
async fn test_blank_bodies_normalize_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/whitespace"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n\t "))
        .mount(&server)
        .await;

    let client = client();

    let empty = client
        .execute(RelayRequest::new(format!("{}/empty", server.uri()), "get"))
        .await
        .unwrap();
    assert_eq!(empty.status_code, 204);
    assert_eq!(empty.body, None);

    let whitespace = client
        .execute(RelayRequest::new(
            format!("{}/whitespace", server.uri()),
            "get",
        ))
        .await
        .unwrap();
    assert_eq!(whitespace.body, None);
}

#[tokio::test]
async fn test_body_never_sent_for_non_payload_methods() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let request = RelayRequest::new(server.uri(), "get")
        .with_header("Content-Type", "application/json")
        .with_body(json!({"should": "not appear"}));

    client().execute(request).await.unwrap();

    let received = &server.received_requests().await.unwrap()[0];
    assert!(received.body.is_empty());
}

#[tokio::test]
async fn test_body_sent_for_payload_method_without_headers() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let request = RelayRequest::new(server.uri(), "put").with_body(json!([1, 2, 3]));
    client().execute(request).await.unwrap();

    let received = &server.received_requests().await.unwrap()[0];
    assert_eq!(received.body, serde_json::to_vec(&json!([1, 2, 3])).unwrap());
}

#[tokio::test]
async fn test_unknown_method_fails_without_network_access() {
    let server = MockServer::start().await;

    let err = client()
        .execute(RelayRequest::new(server.uri(), "FETCH"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Method { ref token } if token == "FETCH"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_refused_propagates_as_dispatch_error() {
    // A dropped listener leaves a port that refuses connections. A pooled
    // MockServer::start() server would keep listening after drop and answer
    // the request; an exclusive wiremock server tears down asynchronously and
    // can yield a connection reset instead of a refusal.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client()
        .execute(RelayRequest::new(dead_uri, "get"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Network { .. }));
}

#[tokio::test]
async fn test_slow_remote_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = RelayClient::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = client
        .execute(RelayRequest::new(server.uri(), "get"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Timeout { .. }));
}

#[tokio::test]
async fn test_derived_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            // set_body_raw carries the content type; wiremock would overwrite
            // an insert_header("Content-Type", ...) with the body's own mime.
            ResponseTemplate::new(200)
                .set_body_raw("ok", "text/plain; charset=utf-8")
                .insert_header("Date", "Wed, 21 Oct 2015 07:28:00 GMT")
                .insert_header("Connection", "keep-alive"),
        )
        .mount(&server)
        .await;

    let response = client()
        .execute(RelayRequest::new(server.uri(), "get"))
        .await
        .unwrap();

    let headers = response.headers.unwrap();
    assert_eq!(headers.content_type, Some("utf-8".to_string()));
    assert_eq!(headers.connection, Some("keep-alive".to_string()));
    assert!(headers.date.is_some());
}

#[tokio::test]
async fn test_default_headers_apply_and_caller_wins() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("X-Relay-Env", "prod"))
        .and(header("Accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = RelayClient::builder()
        .default_header("X-Relay-Env", "prod")
        .default_header("Accept", "application/json")
        .build()
        .unwrap();

    let request = RelayRequest::new(server.uri(), "get").with_header("Accept", "text/plain");
    let response = client.execute(request).await.unwrap();

    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_metrics_reflect_round_trips() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client();
    client
        .execute(RelayRequest::new(server.uri(), "get"))
        .await
        .unwrap();

    let snapshot = client.metrics();
    assert_eq!(snapshot.requests_total, 1);
    assert_eq!(snapshot.responses_5xx, 1);
    assert_eq!(snapshot.dispatch_failures, 0);
}
