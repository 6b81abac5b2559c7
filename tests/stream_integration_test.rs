//! End-to-end streaming tests against a real HTTP server using wiremock.
//!
//! These drive the reqwest transport, the decoder and the session fold
//! together.

mod common;

use common::{config_for, message_stop, sse_body, text_delta};
use futures_util::StreamExt;
use serde_json::json;
use streamchat::client::ChatClient;
use streamchat::error::{ChatError, ErrorCategory, NetworkError};
use streamchat::models::Sender;
use streamchat::session::ChatSession;
use streamchat::sse::SemanticDelta;
use streamchat::traits::RecordingObserver;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/event-stream")
        .set_body_string(body)
}

#[tokio::test]
async fn test_two_part_reply_becomes_one_complete_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .respond_with(sse_response(sse_body(&[
            text_delta("Part 1. "),
            text_delta("Part 2."),
        ])))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(config_for(&mock_server.uri())).unwrap();
    let mut session = ChatSession::new();

    session.submit(&client, "Hello").await.unwrap();

    let messages: Vec<_> = session.history().iter().collect();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[1].sender, Sender::Model);
    assert_eq!(messages[1].text, "Part 1. Part 2.");
    assert!(messages[1].is_complete);
    assert!(!session.is_in_flight());
}

#[tokio::test]
async fn test_request_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "text/event-stream"))
        .and(body_json(json!({
            "app_name": "chat_app",
            "user_id": "user_1",
            "session_id": "session_1",
            "message": {"human_message": "What's the weather?"},
            "streaming": true
        })))
        .respond_with(sse_response(sse_body(&[json!({"text": "Sunny"})])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(config_for(&mock_server.uri())).unwrap();
    let mut observer = RecordingObserver::new();

    client
        .send_with_observer("What's the weather?", &mut observer)
        .await
        .unwrap();

    assert_eq!(observer.text(), "Sunny");
    assert_eq!(observer.ended, 1);
}

#[tokio::test]
async fn test_server_error_becomes_system_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(config_for(&mock_server.uri())).unwrap();
    let mut session = ChatSession::new();

    let err = session.submit(&client, "Hello").await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Server);
    let last = session.history().last().unwrap();
    assert_eq!(last.sender, Sender::System);
    assert_eq!(last.text, "Error: HTTP error 500: boom");
    assert!(!session.is_in_flight());
}

#[tokio::test]
async fn test_empty_error_body_uses_status_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(config_for(&mock_server.uri())).unwrap();
    let result = client.send("Hello").await;

    match result {
        Err(ChatError::Network(NetworkError::HttpStatus { status, message })) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        Err(other) => panic!("Expected HttpStatus, got {:?}", other),
        Ok(_) => panic!("Expected HttpStatus, got a stream"),
    }
}

#[tokio::test]
async fn test_delta_stream_with_noise_and_tail() {
    let mock_server = MockServer::start().await;

    // Comment, event field, bad JSON, and a final line without a newline.
    let body = format!(
        ": keep-alive\nevent: message\n{}data: {{bad json\n\n{}data: {}",
        common::data_line(&text_delta("a")),
        common::data_line(&json!({"content": {"parts": [{"text": "b"}]}})),
        message_stop()
    );

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .respond_with(sse_response(body))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(config_for(&mock_server.uri())).unwrap();
    let deltas: Vec<SemanticDelta> = client
        .send("Hello")
        .await
        .unwrap()
        .map(|delta| delta.unwrap())
        .collect()
        .await;

    assert_eq!(
        deltas,
        vec![
            SemanticDelta::TextAppend("a".to_string()),
            SemanticDelta::TextAppend("b".to_string()),
            SemanticDelta::SegmentComplete,
        ]
    );
}

#[tokio::test]
async fn test_custom_run_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/run"))
        .respond_with(sse_response(sse_body(&[json!({"text": "ok"})])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server.uri()).with_run_path("/api/run");
    let client = ChatClient::new(config).unwrap();
    let mut observer = RecordingObserver::new();

    client.send_with_observer("hi", &mut observer).await.unwrap();
    assert_eq!(observer.text(), "ok");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = ChatClient::new(config_for("http://127.0.0.1:1")).unwrap();
    let mut session = ChatSession::new();

    let err = session.submit(&client, "Hello").await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Network);
    assert_eq!(session.history().last().unwrap().sender, Sender::System);
}
