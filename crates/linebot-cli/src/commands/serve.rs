//! Echo bot served on the webhook server.

use super::{client, load_config};
use async_trait::async_trait;
use clap::Args;
use linebot_messaging::models::TextMessage;
use linebot_messaging::{Client, SendingMessage};
use linebot_webhook::event::MessageContent;
use linebot_webhook::{CallbackRequest, Event, EventHandler, WebhookHandler, WebhookServer};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Serve command arguments.
#[derive(Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides webhook.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port number (overrides webhook.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Callback path (overrides webhook.path)
    #[arg(long)]
    pub path: Option<String>,
}

/// Replies to text with the same text and to stickers with the same sticker.
pub struct EchoBot {
    client: Client,
}

impl EchoBot {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// The echo for one inbound message, if it is a kind that gets one.
pub fn echo_reply(message: &MessageContent) -> Option<SendingMessage> {
    match message {
        MessageContent::Text(text) => {
            let mut reply = TextMessage::new(text.text.clone());
            if let Some(token) = &text.quote_token {
                reply = reply.with_quote_token(token.clone());
            }
            Some(SendingMessage::new(reply))
        }
        MessageContent::Sticker(sticker) => Some(SendingMessage::sticker(
            sticker.package_id.clone(),
            sticker.sticker_id.clone(),
        )),
        _ => None,
    }
}

#[async_trait]
impl EventHandler for EchoBot {
    async fn handle_events(&self, request: CallbackRequest) {
        for event in request.events {
            let Event::Message(message) = &event else {
                debug!("Ignoring {} event", event.kind());
                continue;
            };
            let (Some(token), Some(reply)) = (message.reply_token.as_deref(), echo_reply(&message.message))
            else {
                continue;
            };
            if let Err(e) = self.client.reply_message(token, [reply]).send().await {
                warn!("Failed to reply: {}", e);
            }
        }
    }
}

/// Run the serve command.
pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(host) = args.host {
        config.webhook.host = host;
    }
    if let Some(port) = args.port {
        config.webhook.port = port;
    }
    if let Some(path) = args.path {
        config.webhook.path = path;
    }

    let client = client(config_path)?;
    let handler = WebhookHandler::new(client.channel_secret().expose_secret())?
        .with_handler(Arc::new(EchoBot::new(client)))
        .on_error(|e| warn!("Webhook error: {}", e));

    let server = WebhookServer::new(config.webhook, handler);
    info!("Echo bot listening on {}", server.bind_address());
    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: serde_json::Value) -> MessageContent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_echo_text_keeps_quote_token() {
        let reply = echo_reply(&content(json!({
            "type": "text",
            "id": "1",
            "text": "hello",
            "quoteToken": "q1"
        })))
        .unwrap();
        let wire = serde_json::to_value(&reply).unwrap();
        assert_eq!(wire["type"], "text");
        assert_eq!(wire["text"], "hello");
        assert_eq!(wire["quoteToken"], "q1");
    }

    #[test]
    fn test_echo_sticker() {
        let reply = echo_reply(&content(json!({
            "type": "sticker",
            "id": "2",
            "packageId": "446",
            "stickerId": "1988",
            "stickerResourceType": "STATIC"
        })))
        .unwrap();
        let wire = serde_json::to_value(&reply).unwrap();
        assert_eq!(wire["type"], "sticker");
        assert_eq!(wire["packageId"], "446");
        assert_eq!(wire["stickerId"], "1988");
    }

    #[test]
    fn test_no_echo_for_images() {
        let image = content(json!({
            "type": "image",
            "id": "3",
            "contentProvider": {"type": "line"}
        }));
        assert!(echo_reply(&image).is_none());
    }

    #[test]
    fn test_parse_serve_overrides() {
        use crate::{Cli, Commands};
        use clap::Parser;

        let cli = Cli::try_parse_from(["linebot", "serve", "--port", "9000", "--path", "/hook"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.path.as_deref(), Some("/hook"));
                assert!(args.host.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }
}
