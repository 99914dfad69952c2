//! Signed callbacks through the axum router, with replies sent back
//! through the API client.

use axum::http::StatusCode;
use linebot_cli::commands::serve::EchoBot;
use linebot_integration_tests::{mock_client, mock_config, signed_callback, CHANNEL_SECRET};
use linebot_webhook::{Event, WebhookHandler, WebhookServer};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_CALLBACK: &str = r#"{
    "destination": "Uxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx",
    "events": [
        {
            "type": "message",
            "mode": "active",
            "timestamp": 1462629479859,
            "source": {"type": "user", "userId": "U4af4980629"},
            "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
            "deliveryContext": {"isRedelivery": false},
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "message": {"id": "325708", "type": "text", "text": "Hello, world"}
        },
        {
            "type": "brandNewEvent",
            "timestamp": 1462629479860
        }
    ]
}"#;

#[tokio::test]
async fn test_echo_bot_replies_through_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .and(body_json(json!({
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "messages": [{"type": "text", "text": "Hello, world"}]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let router = WebhookHandler::new(CHANNEL_SECRET)
        .unwrap()
        .with_handler(Arc::new(EchoBot::new(mock_client(&server))))
        .router("/callback");

    let response = router
        .oneshot(signed_callback("/callback", TEXT_CALLBACK))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_events_reach_handler_in_order() {
    let kinds = Arc::new(Mutex::new(Vec::new()));
    let sink = kinds.clone();
    let router = WebhookHandler::new(CHANNEL_SECRET)
        .unwrap()
        .on_events(move |request| {
            let sink = sink.clone();
            async move {
                let mut sink = sink.lock().unwrap();
                for event in &request.events {
                    sink.push((event.kind().to_string(), matches!(event, Event::Unknown(_))));
                }
            }
        })
        .router("/callback");

    let response = router
        .oneshot(signed_callback("/callback", TEXT_CALLBACK))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *kinds.lock().unwrap(),
        [
            ("message".to_string(), false),
            ("brandNewEvent".to_string(), true)
        ]
    );
}

#[tokio::test]
async fn test_tampered_body_is_rejected() {
    let handled = Arc::new(Mutex::new(false));
    let flag = handled.clone();
    let router = WebhookHandler::new(CHANNEL_SECRET)
        .unwrap()
        .on_events(move |_| {
            let flag = flag.clone();
            async move {
                *flag.lock().unwrap() = true;
            }
        })
        .router("/callback");

    let mut request = signed_callback("/callback", TEXT_CALLBACK);
    *request.body_mut() = axum::body::Body::from(TEXT_CALLBACK.replace("Hello", "Bye"));

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!*handled.lock().unwrap());
}

#[tokio::test]
async fn test_server_router_serves_configured_path_and_health() {
    let server = MockServer::start().await;
    let mut config = mock_config(&server);
    config.webhook.path = "/line/webhook".to_string();

    let webhook = WebhookServer::new(config.webhook, WebhookHandler::new(CHANNEL_SECRET).unwrap());
    let router = webhook.router();

    let response = router
        .clone()
        .oneshot(signed_callback("/line/webhook", r#"{"destination":"U0","events":[]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health = axum::http::Request::get("/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router.oneshot(health).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
