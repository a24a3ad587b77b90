//! Transport integration tests.
//!
//! These verify how responses are classified against a mock server.

mod common;

use serde_json::{json, Value};
use signalmgr_client::{Error, Method, ReceivedMessage, SendMessageRequest};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Responds with the request body.
struct Echo;

impl Respond for Echo {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(request.body.clone(), "application/json")
    }
}

#[tokio::test]
async fn test_error_field_with_200_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/send"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let result = client
        .messages("+1555")
        .send_text(vec!["+1666".to_string()], "hi")
        .await;

    match result {
        Err(Error::Server(message)) => assert_eq!(message, "Rate limit exceeded"),
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_field_wins_over_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/groups/+1555"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "User +1555 is not\nregistered"})),
        )
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client.groups("+1555").list().await.unwrap_err();

    assert!(matches!(err, Error::Server(ref m) if m == "User +1555 is notregistered"));
}

#[tokio::test]
async fn test_500_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/about"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client.service().about().await.unwrap_err();

    match err {
        Error::HttpStatus { status, ref body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "");
        }
        ref other => panic!("expected status error, got {:?}", other),
    }
    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_non_json_error_body_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/attachments/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client.attachments().get("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, Error::HttpStatus { ref body, .. } if body == "404 page not found"));
}

#[tokio::test]
async fn test_success_decodes_requested_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["+1555", "+1666"])))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let accounts = client.accounts().list().await.unwrap();

    let numbers: Vec<_> = accounts.iter().map(|a| a.number.as_str()).collect();
    assert_eq!(numbers, vec!["+1555", "+1666"]);
}

#[tokio::test]
async fn test_shape_mismatch_is_a_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": []})))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client.accounts().list().await.unwrap_err();

    assert!(matches!(err, Error::Decoding(_)));
}

#[tokio::test]
async fn test_connection_failure_is_a_transport_error() {
    let addr = common::unused_addr().await;
    let client = signalmgr_client::SignalClient::builder()
        .base_url(format!("http://{}", addr))
        .build()
        .unwrap();

    let err = client.service().about().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_request_body_is_json() {
    let server = MockServer::start().await;
    let request = SendMessageRequest::new("+1555", vec!["+1666".to_string()], "hello");
    Mock::given(method("POST"))
        .and(path("/v2/send"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "number": "+1555",
            "recipients": ["+1666"],
            "message": "hello"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"timestamp": "1700000000000"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let response = client.messages("+1555").send(&request).await.unwrap();

    assert_eq!(response.timestamp, "1700000000000");
}

#[tokio::test]
async fn test_echo_round_trip_preserves_keys_and_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/echo"))
        .respond_with(Echo)
        .mount(&server)
        .await;

    let body = json!({
        "envelope": {
            "sourceNumber": "+1555",
            "timestamp": 1000,
            "dataMessage": {"message": "hi", "mentions": [{"start": 0, "length": 1}]}
        },
        "account": "+1666",
        "extra": {"nested": [1, 2, 3], "flag": true}
    });

    let client = common::client_for(&server);
    let echoed: Value = client
        .request(Method::POST, "/echo", Some(&body))
        .await
        .unwrap();
    let message = ReceivedMessage::from_tree(echoed).unwrap();

    let reparsed: Value = serde_json::from_str(&message.raw).unwrap();
    assert_eq!(reparsed, body);
    assert_eq!(message.envelope.source_number.as_deref(), Some("+1555"));
    assert_eq!(message.envelope.text(), Some("hi"));
}
