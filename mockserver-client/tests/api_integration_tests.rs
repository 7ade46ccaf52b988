//! Integration tests for mockserver-client control operations.
//!
//! These tests use wiremock to stand in for MockServer and check that the
//! client sends the right requests over the real network transport.

use mockserver_client::{
    BodyMatcher, CallBounds, CallPolicy, Client, ClientConfig, ClientError, Expectation, Operation,
    ReqwestTransport, RequestMatcher, ResponseTemplate as Template, TransportError,
    VerificationMatcher, VerificationRequest, MATCH_ONLY_MATCHING_FIELDS,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn default_expectation() -> Expectation {
    Expectation::new(
        RequestMatcher::new("POST", "/some/resource"),
        Template::new(201).with_body(json!({"field": "value"})),
        CallPolicy::once(),
    )
}

#[tokio::test]
async fn test_create_expectation_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/expectation"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "httpRequest": {"method": "POST", "path": "/some/resource"},
            "httpResponse": {"statusCode": 201, "body": {"field": "value"}},
            "times": {"remainingTimes": 1, "unlimited": false}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let result = client.create_expectation(&default_expectation()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_expectation_with_request_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/expectation"))
        .and(body_json(json!({
            "httpRequest": {"method": "PUT", "path": "/items/7", "body": {"name": "widget", "tags": ["a", "b"]}},
            "httpResponse": {"statusCode": 204},
            "times": {"remainingTimes": 0, "unlimited": true}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let expectation = Expectation::new(
        RequestMatcher::new("PUT", "/items/7").with_body(json!({"name": "widget", "tags": ["a", "b"]})),
        Template::new(204),
        CallPolicy::unlimited(),
    );

    client.create_expectation(&expectation).await.unwrap();
}

#[tokio::test]
async fn test_create_expectation_not_created() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/expectation"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let result = client.create_expectation(&default_expectation()).await;

    match result {
        Err(ClientError::Rejected {
            operation,
            status,
            body,
        }) => {
            assert_eq!(operation, Operation::CreateExpectation);
            assert_eq!(status, 404);
            assert_eq!(body, "{}");
        }
        _ => panic!("Expected rejection"),
    }
}

#[tokio::test]
async fn test_verify_request_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/verify"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "httpRequest": {
                "method": "POST",
                "path": "/orders",
                "body": {"type": "JSON", "matchType": "ONLY_MATCHING_FIELDS"}
            },
            "times": {"atLeast": 2}
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let verification = VerificationRequest::new(
        VerificationMatcher::new("POST", "/orders")
            .with_body(BodyMatcher::json(MATCH_ONLY_MATCHING_FIELDS)),
        CallBounds::at_least(2),
    );

    let result = client.verify_request(&verification).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_verify_request_not_observed() {
    let mock_server = MockServer::start().await;
    let reason = "Request not found exactly once, expected:<{ \"path\" : \"/orders\" }> but was:<>";

    Mock::given(method("PUT"))
        .and(path("/mockserver/verify"))
        .respond_with(ResponseTemplate::new(406).set_body_string(reason))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let verification = VerificationRequest::new(
        VerificationMatcher::new("POST", "/orders"),
        CallBounds::once(),
    );

    let err = client.verify_request(&verification).await.unwrap_err();
    assert_eq!(err.status(), Some(406));
    assert!(err.to_string().contains(reason));
}

#[tokio::test]
async fn test_reset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/reset"))
        .and(body_string(""))
        .and(|request: &Request| !request.headers.contains_key("content-type"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    assert!(client.reset().await.is_ok());
}

#[tokio::test]
async fn test_reset_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/reset"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let err = client.reset().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "error resetting mockserver. received status code: 500 with body: internal error"
    );
}

#[tokio::test]
async fn test_address_without_scheme() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/reset"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let address = mock_server.address().to_string();
    let client = Client::new(address.as_str()).unwrap();

    assert_eq!(client.base_url(), format!("http://{}", address));
    client.reset().await.unwrap();
}

#[tokio::test]
async fn test_connection_refused() {
    // Grab a free port, then close it so nothing is listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = Client::new(format!("127.0.0.1:{}", port)).unwrap();
    let err = client.reset().await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::ConnectionFailed(_))
    ));
}

#[tokio::test]
async fn test_transport_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/reset"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::with_timeout(Duration::from_millis(100)).unwrap();
    let client = Client::with_transport(mock_server.uri(), transport).unwrap();

    let result = client.reset().await;
    assert!(matches!(
        result,
        Err(ClientError::Transport(TransportError::Timeout))
    ));
}

#[tokio::test]
async fn test_sub_second_config_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mockserver/reset"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new(mock_server.uri()).with_timeout(Duration::from_millis(500));
    assert_eq!(config.timeout(), Duration::from_millis(500));

    let client = Client::from_config(&config).unwrap();
    assert!(client.reset().await.is_ok());
}
