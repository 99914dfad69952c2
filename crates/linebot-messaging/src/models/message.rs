//! Outgoing messages.

use super::action::Action;
use super::flex::FlexContainer;
use super::imagemap::{ImagemapAction, ImagemapBaseSize, ImagemapVideo};
use super::template::Template;
use crate::error::LineError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Maximum number of messages in one send request.
pub const MAX_MESSAGES_PER_REQUEST: usize = 5;

/// Maximum number of quick reply buttons.
pub const MAX_QUICK_REPLY_ITEMS: usize = 13;

/// A message plus the per-message options every message type accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendingMessage {
    #[serde(flatten)]
    pub message: Message,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_reply: Option<QuickReply>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Sender>,
}

impl SendingMessage {
    pub fn new(message: impl Into<Message>) -> Self {
        Self {
            message: message.into(),
            quick_reply: None,
            sender: None,
        }
    }

    /// Plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(TextMessage::new(text))
    }

    /// Sticker message.
    pub fn sticker(package_id: impl Into<String>, sticker_id: impl Into<String>) -> Self {
        Self::new(StickerMessage {
            package_id: package_id.into(),
            sticker_id: sticker_id.into(),
            quote_token: None,
        })
    }

    /// Image message.
    pub fn image(original_content_url: impl Into<String>, preview_image_url: impl Into<String>) -> Self {
        Self::new(Message::Image(ImageMessage {
            original_content_url: original_content_url.into(),
            preview_image_url: preview_image_url.into(),
        }))
    }

    /// Flex message.
    pub fn flex(alt_text: impl Into<String>, contents: impl Into<FlexContainer>) -> Self {
        Self::new(Message::Flex(FlexMessage {
            alt_text: alt_text.into(),
            contents: contents.into(),
        }))
    }

    /// Template message.
    pub fn template(alt_text: impl Into<String>, template: impl Into<Template>) -> Self {
        Self::new(Message::Template(TemplateMessage {
            alt_text: alt_text.into(),
            template: template.into(),
        }))
    }

    pub fn with_quick_reply(mut self, quick_reply: QuickReply) -> Self {
        self.quick_reply = Some(quick_reply);
        self
    }

    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Local checks the API would otherwise reject with a 400.
    pub fn validate(&self) -> Result<()> {
        if let Some(quick_reply) = &self.quick_reply {
            quick_reply.validate()?;
        }
        if let Message::Template(t) = &self.message {
            t.template.validate()?;
        }
        Ok(())
    }
}

impl From<Message> for SendingMessage {
    fn from(message: Message) -> Self {
        Self::new(message)
    }
}

/// Check the message count of a send request, then each message.
pub(crate) fn validate_messages(messages: &[SendingMessage]) -> Result<()> {
    if messages.is_empty() {
        return Err(LineError::invalid_request("at least one message is required"));
    }
    if messages.len() > MAX_MESSAGES_PER_REQUEST {
        return Err(LineError::invalid_request(format!(
            "too many messages: {} (max {})",
            messages.len(),
            MAX_MESSAGES_PER_REQUEST
        )));
    }
    messages.iter().try_for_each(SendingMessage::validate)
}

/// Message body, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text(TextMessage),
    Image(ImageMessage),
    Video(VideoMessage),
    Audio(AudioMessage),
    Location(LocationMessage),
    Sticker(StickerMessage),
    Template(TemplateMessage),
    Imagemap(ImagemapMessage),
    Flex(FlexMessage),
}

impl From<TextMessage> for Message {
    fn from(m: TextMessage) -> Self {
        Self::Text(m)
    }
}

impl From<StickerMessage> for Message {
    fn from(m: StickerMessage) -> Self {
        Self::Sticker(m)
    }
}

impl From<ImagemapMessage> for Message {
    fn from(m: ImagemapMessage) -> Self {
        Self::Imagemap(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emojis: Vec<Emoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

impl TextMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Append a LINE emoji. `index` must point at a `$` in the text, see
    /// [`find_dollar_sign_indexes`].
    pub fn with_emoji(mut self, emoji: Emoji) -> Self {
        self.emojis.push(emoji);
        self
    }

    /// Quote an earlier message.
    pub fn with_quote_token(mut self, token: impl Into<String>) -> Self {
        self.quote_token = Some(token.into());
        self
    }
}

/// LINE emoji placed at a `$` in a text message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    /// UTF-16 offset of the `$` placeholder.
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    pub product_id: String,
    pub emoji_id: String,
}

impl Emoji {
    pub fn new(index: usize, product_id: impl Into<String>, emoji_id: impl Into<String>) -> Self {
        Self {
            index,
            length: None,
            product_id: product_id.into(),
            emoji_id: emoji_id.into(),
        }
    }
}

/// UTF-16 code-unit offsets of every `$` in `text`.
///
/// Emoji indexes are counted in UTF-16, so characters outside the BMP
/// count twice.
pub fn find_dollar_sign_indexes(text: &str) -> Vec<usize> {
    text.encode_utf16()
        .enumerate()
        .filter(|&(_, unit)| unit == u16::from(b'$'))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    pub original_content_url: String,
    pub preview_image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMessage {
    pub original_content_url: String,
    pub preview_image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    pub original_content_url: String,
    /// Length in milliseconds.
    pub duration: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationMessage {
    pub title: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessage {
    pub package_id: String,
    pub sticker_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMessage {
    pub alt_text: String,
    pub template: Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapMessage {
    pub base_url: String,
    pub alt_text: String,
    pub base_size: ImagemapBaseSize,
    pub actions: Vec<ImagemapAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<ImagemapVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexMessage {
    pub alt_text: String,
    pub contents: FlexContainer,
}

/// Quick reply buttons shown above the keyboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
    pub items: Vec<QuickReplyItem>,
}

impl QuickReply {
    pub fn new(items: impl IntoIterator<Item = QuickReplyItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.items.len() > MAX_QUICK_REPLY_ITEMS {
            return Err(LineError::invalid_request(format!(
                "too many quick reply items: {} (max {})",
                self.items.len(),
                MAX_QUICK_REPLY_ITEMS
            )));
        }
        match self.items.iter().find(|i| !i.action.allowed_in_quick_reply()) {
            Some(item) => Err(LineError::invalid_request(format!(
                "{} action is not allowed in a quick reply",
                item.action.kind()
            ))),
            None => Ok(()),
        }
    }
}

/// One quick reply button. Serialized with `"type": "action"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "action", rename_all = "camelCase")]
pub struct QuickReplyItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub action: Action,
}

impl QuickReplyItem {
    pub fn new(action: Action) -> Self {
        Self {
            image_url: None,
            action,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Overrides the display name and icon of the bot for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::template::ConfirmTemplate;
    use serde_json::json;

    #[test]
    fn test_text_message_with_options() {
        let message = SendingMessage::new(
            TextMessage::new("$ LINE emoji $").with_emoji(Emoji::new(0, "5ac1bfd5040ab15980c9b435", "001")),
        )
        .with_quick_reply(QuickReply::new([
            QuickReplyItem::new(Action::message("Sushi", "Sushi")).with_image_url("https://example.com/sushi.png"),
            QuickReplyItem::new(Action::location("Send location")),
        ]))
        .with_sender(Sender {
            name: Some("Cony".to_string()),
            icon_url: None,
        });

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "text",
                "text": "$ LINE emoji $",
                "emojis": [{"index": 0, "productId": "5ac1bfd5040ab15980c9b435", "emojiId": "001"}],
                "quickReply": {"items": [
                    {"type": "action", "imageUrl": "https://example.com/sushi.png",
                     "action": {"type": "message", "label": "Sushi", "text": "Sushi"}},
                    {"type": "action", "action": {"type": "location", "label": "Send location"}}
                ]},
                "sender": {"name": "Cony"}
            })
        );
    }

    #[test]
    fn test_sticker_and_audio_messages() {
        assert_eq!(
            serde_json::to_value(SendingMessage::sticker("446", "1988")).unwrap(),
            json!({"type": "sticker", "packageId": "446", "stickerId": "1988"})
        );

        let audio = SendingMessage::new(Message::Audio(AudioMessage {
            original_content_url: "https://example.com/a.m4a".to_string(),
            duration: 60000,
        }));
        assert_eq!(
            serde_json::to_value(audio).unwrap(),
            json!({"type": "audio", "originalContentUrl": "https://example.com/a.m4a", "duration": 60000})
        );
    }

    #[test]
    fn test_decode_sending_message() {
        let message: SendingMessage = serde_json::from_value(json!({
            "type": "location",
            "title": "my location",
            "address": "Tokyo",
            "latitude": 35.65910807942215,
            "longitude": 139.70372892916203
        }))
        .unwrap();
        assert!(matches!(message.message, Message::Location(ref l) if l.title == "my location"));
        assert!(message.quick_reply.is_none());
    }

    #[test]
    fn test_find_dollar_sign_indexes() {
        assert_eq!(find_dollar_sign_indexes("$ LINE emoji $"), vec![0, 13]);
        assert_eq!(find_dollar_sign_indexes("no emoji"), Vec::<usize>::new());
        // U+1F600 is two UTF-16 code units.
        assert_eq!(find_dollar_sign_indexes("\u{1F600}$"), vec![2]);
        assert_eq!(find_dollar_sign_indexes("日本$語$"), vec![2, 4]);
    }

    #[test]
    fn test_validate_message_count() {
        assert!(validate_messages(&[]).is_err());
        let five = vec![SendingMessage::text("x"); 5];
        assert!(validate_messages(&five).is_ok());
        let six = vec![SendingMessage::text("x"); 6];
        let err = validate_messages(&six).unwrap_err();
        assert!(err.to_string().contains("too many messages"));
    }

    #[test]
    fn test_validate_quick_reply_rejects_clipboard() {
        let message = SendingMessage::text("x").with_quick_reply(QuickReply::new([QuickReplyItem::new(
            Action::clipboard("Copy", "code"),
        )]));
        let err = message.validate().unwrap_err();
        assert!(matches!(err, LineError::InvalidRequest(_)));
    }

    #[test]
    fn test_validate_nested_template() {
        let bad = SendingMessage::template(
            "confirm",
            ConfirmTemplate {
                text: "Sure?".to_string(),
                actions: vec![Action::message("Yes", "yes")],
            },
        );
        assert!(bad.validate().is_err());
    }
}
