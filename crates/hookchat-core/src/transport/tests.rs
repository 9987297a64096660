//! WebhookTransport tests against a mock webhook.

use hookchat_common::{SessionId, TransportError};
use hookchat_config::{ChatOptions, HttpMethod};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{Transport, WebhookTransport};
use crate::message::Attachment;
use crate::response::OriginMarker;
use crate::testing::RecordingHandlers;

fn options(server: &MockServer) -> ChatOptions {
    ChatOptions::new(format!("{}/webhook/chat", server.uri()))
}

fn session() -> SessionId {
    SessionId::from("sess-42")
}

#[tokio::test]
async fn send_message_posts_json_and_parses_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .and(body_partial_json(json!({
            "action": "sendMessage",
            "chatInput": "hello",
            "sessionId": "sess-42"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output": "hi there"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let response = transport
        .send_message("hello", &[], &session(), &options(&server))
        .await
        .unwrap();

    assert_eq!(response.as_value(), &json!({"output": "hi there"}));
}

#[tokio::test]
async fn send_message_sends_configured_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let options = options(&server).with_header("X-Api-Key", "secret");
    let response = transport
        .send_message("hello", &[], &session(), &options)
        .await
        .unwrap();

    assert_eq!(response.as_value()["text"], "ok");
}

#[tokio::test]
async fn send_message_over_get_uses_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/webhook/chat"))
        .and(query_param("action", "sendMessage"))
        .and(query_param("chatInput", "hello"))
        .and(query_param("sessionId", "sess-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "got it"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let options = options(&server).with_method(HttpMethod::Get);
    let response = transport
        .send_message("hello", &[], &session(), &options)
        .await
        .unwrap();

    assert_eq!(response.as_value()["message"], "got it");
}

#[tokio::test]
async fn send_message_with_files_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output": "saw file"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let files = [Attachment::new("notes.txt", "text/plain", b"abc".to_vec())];
    let response = transport
        .send_message("see attached", &files, &session(), &options(&server))
        .await
        .unwrap();

    assert_eq!(response.as_value()["output"], "saw file");
    let received = server.received_requests().await.unwrap();
    let content_type = received[0].headers["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn empty_send_body_is_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let response = transport
        .send_message("hello", &[], &session(), &options(&server))
        .await
        .unwrap();

    assert_eq!(response.as_value(), &json!({}));
}

#[tokio::test]
async fn non_json_send_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let err = transport
        .send_message("hello", &[], &session(), &options(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Parse(_)));
}

#[tokio::test]
async fn server_error_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("workflow crashed"))
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let err = transport
        .send_message("hello", &[], &session(), &options(&server))
        .await
        .unwrap_err();

    match err {
        TransportError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "workflow crashed");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_webhook_is_network_error() {
    let transport = WebhookTransport::new().unwrap();
    let options = ChatOptions::new("http://127.0.0.1:1/webhook/chat");

    let err = transport
        .send_message("hello", &[], &session(), &options)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn load_previous_session_parses_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .and(body_partial_json(json!({
            "action": "loadPreviousSession",
            "sessionId": "sess-42"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": ["langchain", "schema", "HumanMessage"], "kwargs": {"content": "hi"}},
                {"id": ["langchain", "schema", "AIMessage"], "kwargs": {"content": "hello"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let history = transport
        .load_previous_session(&session(), &options(&server))
        .await
        .unwrap()
        .expect("history body");

    assert_eq!(history.data.len(), 2);
    assert!(history.data[0].id.is_human());
    assert!(!history.data[1].id.is_human());
    assert_eq!(history.data[1].kwargs.content, "hello");
}

#[tokio::test]
async fn load_previous_session_without_chat_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    transport
        .load_previous_session(&session(), &options(&server))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert!(body.get("chatInput").is_none());
}

#[tokio::test]
async fn empty_history_body_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let history = transport
        .load_previous_session(&session(), &options(&server))
        .await
        .unwrap();

    assert!(history.is_none());
}

#[tokio::test]
async fn history_with_name_markers_parses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "HumanMessage", "kwargs": {"content": "hey"}}]
        })))
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let history = transport
        .load_previous_session(&session(), &options(&server))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(history.data[0].id, OriginMarker::Name("HumanMessage".into()));
}

#[tokio::test]
async fn streaming_reply_is_delivered_in_chunks() {
    let server = MockServer::start().await;
    let body = concat!(
        "{\"type\":\"begin\"}\n",
        "{\"type\":\"item\",\"content\":\"Hel\"}\n",
        "{\"type\":\"item\",\"content\":\"lo\"}\n",
        "{\"type\":\"end\"}\n",
    );
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .and(body_partial_json(json!({"action": "sendMessage", "chatInput": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let handlers = RecordingHandlers::default();
    let outcome = transport
        .send_message_streaming("hi", &[], &session(), &options(&server), &handlers)
        .await
        .unwrap();

    assert!(outcome.has_received_chunks);
    assert_eq!(handlers.chunks(), vec!["Hel", "lo"]);
    assert_eq!(handlers.begins(), 1);
    assert_eq!(handlers.ends(), 1);
}

#[tokio::test]
async fn streaming_reply_without_items_reports_no_chunks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("{\"type\":\"begin\"}\n{\"type\":\"end\"}\n"),
        )
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let handlers = RecordingHandlers::default();
    let outcome = transport
        .send_message_streaming("hi", &[], &session(), &options(&server), &handlers)
        .await
        .unwrap();

    assert!(!outcome.has_received_chunks);
    assert!(handlers.chunks().is_empty());
}

#[tokio::test]
async fn streaming_server_error_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such webhook"))
        .mount(&server)
        .await;

    let transport = WebhookTransport::new().unwrap();
    let handlers = RecordingHandlers::default();
    let err = transport
        .send_message_streaming("hi", &[], &session(), &options(&server), &handlers)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Http { status: 404, .. }));
    assert!(handlers.chunks().is_empty());
}
