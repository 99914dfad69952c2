//! Shared helpers for the integration tests.

use axum::body::Body;
use axum::http::Request;
use linebot_core::config::{Config, ConfigBuilder};
use linebot_messaging::Client;
use linebot_webhook::{sign, SIGNATURE_HEADER};
use std::path::{Path, PathBuf};
use wiremock::MockServer;

pub const CHANNEL_SECRET: &str = "integration-channel-secret";
pub const ACCESS_TOKEN: &str = "integration-access-token";

/// Config whose API and data endpoints both point at `server`.
pub fn mock_config(server: &MockServer) -> Config {
    ConfigBuilder::new()
        .credentials(CHANNEL_SECRET, ACCESS_TOKEN)
        .endpoints(server.uri())
        .timeout_secs(5)
        .build()
}

/// Client talking to `server`.
pub fn mock_client(server: &MockServer) -> Client {
    Client::from_config(&mock_config(server)).expect("client from mock config")
}

/// Write the mock config to `dir` and return its path.
pub fn write_config(server: &MockServer, dir: &Path) -> PathBuf {
    let path = dir.join("linebot.json5");
    mock_config(server).save(&path).expect("save config");
    path
}

/// A webhook POST signed with [`CHANNEL_SECRET`].
pub fn signed_callback(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, sign(CHANNEL_SECRET, body.as_bytes()))
        .body(Body::from(body.to_string()))
        .expect("request")
}
