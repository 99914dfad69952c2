//! Channel access token commands.
//!
//! These talk to the OAuth endpoints, which authenticate with the form
//! body, so no channel access token has to be configured.

use super::{load_config, oauth_client};
use crate::render::{print_basic, print_json};
use clap::{Args, Subcommand};
use linebot_core::Config;
use std::path::Path;

/// Token command arguments.
#[derive(Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

#[derive(Subcommand)]
pub enum TokenCommand {
    /// Issue a short-lived channel access token
    Issue {
        /// Channel ID (defaults to the configured one)
        #[arg(long)]
        channel_id: Option<String>,

        /// Channel secret (defaults to the configured one)
        #[arg(long)]
        channel_secret: Option<String>,
    },

    /// Revoke a channel access token
    Revoke {
        token: String,
    },

    /// Show the channel and expiry of a token
    Verify {
        token: String,
    },

    /// Issue a v2.1 channel access token from a signed JWT
    IssueV2 {
        /// JWT signed with the channel's assertion private key
        #[arg(long, env = "LINE_CLIENT_ASSERTION")]
        client_assertion: String,
    },

    /// List the key IDs of valid v2.1 tokens
    Kids {
        /// JWT signed with the channel's assertion private key
        #[arg(long, env = "LINE_CLIENT_ASSERTION")]
        client_assertion: String,
    },

    /// Revoke a v2.1 channel access token
    RevokeV2 {
        token: String,

        /// Channel ID (defaults to the configured one)
        #[arg(long)]
        channel_id: Option<String>,

        /// Channel secret (defaults to the configured one)
        #[arg(long)]
        channel_secret: Option<String>,
    },
}

/// Channel ID and secret from the flags, falling back to the config.
fn channel_credentials(
    config: &Config,
    channel_id: Option<String>,
    channel_secret: Option<String>,
) -> anyhow::Result<(String, String)> {
    let channel_id = match channel_id.or_else(|| config.channel.channel_id.clone()) {
        Some(id) if !id.trim().is_empty() => id,
        _ => anyhow::bail!("Channel ID is required: pass --channel-id or set LINE_CHANNEL_ID"),
    };
    let channel_secret = channel_secret
        .unwrap_or_else(|| config.channel.channel_secret.expose_secret().to_string());
    if channel_secret.trim().is_empty() {
        anyhow::bail!("Channel secret is required: pass --channel-secret or set LINE_CHANNEL_SECRET");
    }
    Ok((channel_id, channel_secret))
}

/// Run the token command.
pub async fn run(args: TokenArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let client = oauth_client(&config)?;

    match args.command {
        TokenCommand::Issue { channel_id, channel_secret } => {
            let (channel_id, channel_secret) = channel_credentials(&config, channel_id, channel_secret)?;
            print_json(&client.issue_access_token(&channel_id, &channel_secret).await?)
        }
        TokenCommand::Revoke { token } => print_basic(&client.revoke_access_token(&token).await?),
        TokenCommand::Verify { token } => print_json(&client.verify_access_token(&token).await?),
        TokenCommand::IssueV2 { client_assertion } => {
            print_json(&client.issue_access_token_v2(&client_assertion).await?)
        }
        TokenCommand::Kids { client_assertion } => {
            print_json(&client.get_access_token_key_ids_v2(&client_assertion).await?)
        }
        TokenCommand::RevokeV2 { token, channel_id, channel_secret } => {
            let (channel_id, channel_secret) = channel_credentials(&config, channel_id, channel_secret)?;
            print_basic(
                &client
                    .revoke_access_token_v2(&channel_id, &channel_secret, &token)
                    .await?,
            )
        }
    }
}
