//! Gemini client and chat bridge tests
//!
//! Tests request shape, reply extraction, error mapping, and the bridge's
//! fixed fallbacks against a mock `generateContent` endpoint.

use std::time::Duration;

use mockito::{Matcher, Server};

use dramashorts::api::bridge::{EMPTY_REPLY, MISSING_KEY_MESSAGE, OUTAGE_MESSAGE};
use dramashorts::api::{ChatBridge, GeminiClient, GeminiError};
use dramashorts::config::Config;
use dramashorts::models::ChatMessage;

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn reply_body(parts: &[&str]) -> String {
    let parts: Vec<serde_json::Value> = parts
        .iter()
        .map(|t| serde_json::json!({ "text": t }))
        .collect();
    serde_json::json!({
        "candidates": [
            { "content": { "role": "model", "parts": parts } }
        ]
    })
    .to_string()
}

// =============================================================================
// Client Tests
// =============================================================================

#[tokio::test]
async fn test_generate_concatenates_parts() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", ENDPOINT)
        .match_header("x-goog-api-key", "test_key")
        .match_body(Matcher::Regex("\"role\":\"user\"".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply_body(&["Meu pai ", "esconde tudo."]))
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("test_key", server.url());
    let text = client.generate("oi").await.unwrap();

    mock.assert_async().await;
    assert_eq!(text, "Meu pai esconde tudo.");
}

#[tokio::test]
async fn test_generate_uses_configured_model() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/v1beta/models/gemini-pro:generateContent")
        .with_status(200)
        .with_body(reply_body(&["ok"]))
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("k", format!("{}/", server.url())).model("gemini-pro");
    assert_eq!(client.generate("x").await.unwrap(), "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_no_candidates_is_empty() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("k", server.url());
    assert_eq!(client.generate("x").await.unwrap(), "");
}

#[tokio::test]
async fn test_generate_unauthorized() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", ENDPOINT)
        .with_status(403)
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("bad", server.url());
    let err = client.generate("x").await.unwrap_err();
    assert!(matches!(err, GeminiError::Unauthorized(403)));
}

#[tokio::test]
async fn test_generate_rate_limited() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", ENDPOINT)
        .with_status(429)
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("k", server.url());
    let err = client.generate("x").await.unwrap_err();
    assert!(matches!(err, GeminiError::RateLimited));
}

#[tokio::test]
async fn test_generate_server_error_message() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", ENDPOINT)
        .with_status(500)
        .with_body(r#"{"error": {"code": 500, "message": "internal"}}"#)
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("k", server.url());
    match client.generate("x").await {
        Err(GeminiError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal");
        }
        other => panic!("Expected ServerError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_invalid_json() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("k", server.url());
    let err = client.generate("x").await.unwrap_err();
    assert!(matches!(err, GeminiError::InvalidResponse(_)));
}

// =============================================================================
// Bridge Tests
// =============================================================================

#[tokio::test]
async fn test_bridge_sends_persona_history_and_message() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", ENDPOINT)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("Histórico da conversa".into()),
            Matcher::Regex("Sofia: Olá!".into()),
            Matcher::Regex("Fã: Quem é seu pai\\?".into()),
        ]))
        .with_status(200)
        .with_body(reply_body(&["Não posso dizer... ainda."]))
        .expect(1)
        .create_async()
        .await;

    let bridge = ChatBridge::new(Some(GeminiClient::with_base_url("k", server.url())));
    let history = vec![ChatMessage::model("Olá!")];
    let reply = bridge.reply("Sofia", &history, "Quem é seu pai?").await;

    mock.assert_async().await;
    assert_eq!(reply, "Não posso dizer... ainda.");
}

#[tokio::test]
async fn test_bridge_empty_reply_placeholder() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(r#"{"candidates": [{"content": {"parts": []}}]}"#)
        .create_async()
        .await;

    let bridge = ChatBridge::new(Some(GeminiClient::with_base_url("k", server.url())));
    assert_eq!(bridge.reply("Sofia", &[], "oi").await, EMPTY_REPLY);
}

#[tokio::test]
async fn test_bridge_service_failure_is_in_character() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let bridge = ChatBridge::new(Some(GeminiClient::with_base_url("k", server.url())));
    assert_eq!(bridge.reply("Sofia", &[], "oi").await, OUTAGE_MESSAGE);

    // No retry
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bridge_unreachable_service_is_in_character() {
    // Nothing listens on the discard port
    let client = GeminiClient::with_base_url("k", "http://127.0.0.1:9").timeout(Duration::from_secs(2));
    let bridge = ChatBridge::new(Some(client));
    assert_eq!(bridge.reply("Sofia", &[], "oi").await, OUTAGE_MESSAGE);
}

#[tokio::test]
async fn test_stalled_service_times_out_in_character() {
    // Accepts connections and never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = GeminiClient::with_base_url("k", format!("http://{}", addr))
        .timeout(Duration::from_millis(200));
    let bridge = ChatBridge::new(Some(client));

    let reply = tokio::time::timeout(
        Duration::from_secs(10),
        bridge.reply("Sofia", &[], "oi"),
    )
    .await
    .expect("request should end on the client timeout");
    assert_eq!(reply, OUTAGE_MESSAGE);
}

#[tokio::test]
async fn test_config_timeout_reaches_client() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = Config {
        gemini_base_url: Some(format!("http://{}", addr)),
        request_timeout_secs: Some(1),
        ..Config::default()
    };
    let bridge = ChatBridge::new(Some(config.gemini_client("k".into())));

    let reply = tokio::time::timeout(
        Duration::from_secs(10),
        bridge.reply("Sofia", &[], "oi"),
    )
    .await
    .expect("configured timeout should apply");
    assert_eq!(reply, OUTAGE_MESSAGE);
}

#[tokio::test]
async fn test_missing_credential_makes_no_call() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = Config {
        gemini_base_url: Some(server.url()),
        gemini_api_key: Some("   ".into()),
        ..Config::default()
    };
    let bridge = ChatBridge::new(config.api_key_from(|_| None).map(|k| config.gemini_client(k)));
    assert!(!bridge.is_configured());

    let reply = bridge.reply("Sofia", &[], "oi").await;
    assert_eq!(reply, MISSING_KEY_MESSAGE);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_config_client_targets_configured_endpoint() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/v1beta/models/gemini-test:generateContent")
        .match_header("x-goog-api-key", "from-file")
        .with_status(200)
        .with_body(reply_body(&["ok"]))
        .create_async()
        .await;

    let config = Config {
        gemini_base_url: Some(server.url()),
        gemini_model: Some("gemini-test".into()),
        gemini_api_key: Some("from-file".into()),
        ..Config::default()
    };
    let key = config.api_key_from(|_| None).unwrap();
    let bridge = ChatBridge::new(Some(config.gemini_client(key)));

    assert_eq!(bridge.reply("Sofia", &[], "oi").await, "ok");
    mock.assert_async().await;
}
