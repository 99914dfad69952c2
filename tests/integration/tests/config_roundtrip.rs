//! Config save/load roundtrip and config-driven client construction.

use linebot_core::config::{Config, ConfigBuilder, LogLevel};
use linebot_integration_tests::{mock_client, ACCESS_TOKEN, CHANNEL_SECRET};
use linebot_messaging::{Client, SendingMessage};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linebot.json5");

    let config = ConfigBuilder::new()
        .credentials(CHANNEL_SECRET, ACCESS_TOKEN)
        .port(9090)
        .webhook_path("/hooks/line")
        .log_level(LogLevel::Debug)
        .build();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.channel.channel_secret.expose_secret(), CHANNEL_SECRET);
    assert_eq!(loaded.webhook.port, 9090);
    assert_eq!(loaded.webhook.path, "/hooks/line");
    assert_eq!(loaded.logging.level, LogLevel::Debug);
    loaded.validate().unwrap();
}

#[test]
fn test_json5_config_from_hand_written_file() {
    let config = Config::parse(
        r#"{
            // credentials
            channel: {
                channel_secret: "secret",
                channel_access_token: "token",
            },
            api: { timeout_secs: 3 },
        }"#,
    )
    .unwrap();
    let client = Client::from_config(&config).unwrap();
    assert_eq!(client.endpoint_base(), "https://api.line.me");
    assert_eq!(client.data_endpoint_base(), "https://api-data.line.me");
}

#[test]
fn test_client_from_config_requires_credentials() {
    let err = Client::from_config(&Config::default()).unwrap_err();
    assert!(err.to_string().contains("missing channel secret"));
}

#[tokio::test]
async fn test_configured_client_sends_push() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/push"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .and(body_json(json!({
            "to": "U4af4980629",
            "messages": [{"type": "text", "text": "hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).insert_header("x-line-request-id", "req-1"))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let response = client
        .push_message("U4af4980629", [SendingMessage::text("hello")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.request_id.as_deref(), Some("req-1"));
}
