//! CLI commands driven end to end through a config file and a mock API.

use clap::Parser;
use linebot_cli::{run, Cli};
use linebot_core::config::ConfigBuilder;
use linebot_integration_tests::{write_config, CHANNEL_SECRET};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("linebot").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_cli_unknown_command() {
    assert!(Cli::try_parse_from(["linebot", "nonexistent-command"]).is_err());
}

#[tokio::test]
async fn test_cli_push_uses_configured_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/push"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&server, dir.path());
    let config = config.to_str().unwrap();

    run(cli(&["--config", config, "push", "U1", "hello"])).await.unwrap();
}

#[tokio::test]
async fn test_cli_followers_walks_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/followers/ids"))
        .and(query_param("start", "next-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"userIds": ["U3"]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/followers/ids"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"userIds": ["U1", "U2"], "next": "next-1"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&server, dir.path());
    let config = config.to_str().unwrap();

    run(cli(&["--config", config, "followers"])).await.unwrap();
}

#[tokio::test]
async fn test_cli_api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/profile/U404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&server, dir.path());
    let config = config.to_str().unwrap();

    let err = run(cli(&["--config", config, "profile", "U404"])).await.unwrap_err();
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_cli_token_issue_without_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/oauth/accessToken"))
        .and(body_string(format!(
            "grant_type=client_credentials&client_id=1234&client_secret={}",
            CHANNEL_SECRET
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "W1TeHCgfH2Liwa",
            "expires_in": 2592000,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;

    // Channel ID and secret only: the token being issued is the first one.
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("linebot.json5");
    ConfigBuilder::new()
        .credentials(CHANNEL_SECRET, "")
        .channel_id("1234")
        .endpoints(server.uri())
        .build()
        .save(&config)
        .unwrap();
    let config = config.to_str().unwrap();

    run(cli(&["--config", config, "token", "issue"])).await.unwrap();
}

#[tokio::test]
async fn test_cli_token_kids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth2/v2.1/tokens/kid"))
        .and(query_param("client_assertion", "signed-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kids": ["k1"]})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("linebot.json5");
    ConfigBuilder::new().endpoints(server.uri()).build().save(&config).unwrap();
    let config = config.to_str().unwrap();

    run(cli(&["--config", config, "token", "kids", "--client-assertion", "signed-jwt"]))
        .await
        .unwrap();
}
