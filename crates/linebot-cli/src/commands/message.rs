//! Text sending commands.

use super::client;
use crate::render::print_basic;
use linebot_messaging::SendingMessage;
use std::path::Path;
use tracing::info;

/// Push a text message.
pub async fn push(to: &str, text: &str, config: Option<&Path>) -> anyhow::Result<()> {
    let client = client(config)?;
    let response = client
        .push_message(to, [SendingMessage::text(text)])
        .send()
        .await?;
    info!("Pushed message to {}", to);
    print_basic(&response)
}

/// Broadcast a text message.
pub async fn broadcast(text: &str, config: Option<&Path>) -> anyhow::Result<()> {
    let client = client(config)?;
    let response = client
        .broadcast_message([SendingMessage::text(text)])
        .send()
        .await?;
    info!("Broadcast message sent");
    print_basic(&response)
}
