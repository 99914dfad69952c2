//! CLI command implementations.

pub mod config;
pub mod insight;
pub mod message;
pub mod profile;
pub mod richmenu;
pub mod serve;
pub mod token;

use anyhow::Context;
use linebot_core::Config;
use linebot_messaging::Client;
use std::path::Path;
use std::time::Duration;

/// Load the config file (explicit path or default location) with the
/// environment overlay applied.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load_from(path).context("Failed to load configuration")
}

/// Build an API client from the config and environment.
pub fn client(path: Option<&Path>) -> anyhow::Result<Client> {
    let config = load_config(path)?;
    config.require_credentials().context(
        "Channel credentials are not configured. Set LINE_CHANNEL_SECRET and LINE_CHANNEL_ACCESS_TOKEN or run 'linebot config init'",
    )?;
    Ok(Client::from_config(&config)?)
}

/// Client for the token endpoints, which need no configured credentials.
pub fn oauth_client(config: &Config) -> anyhow::Result<Client> {
    Ok(Client::unauthenticated()?
        .with_endpoint_base(&config.api.endpoint)?
        .with_timeout(Duration::from_secs(config.api.timeout_secs)))
}
