//! Webhook event model.
//!
//! A callback body is a [`CallbackRequest`] holding a list of [`Event`]s.
//! Events are tagged by `type`; types this crate does not know are kept as
//! [`Event::Unknown`] with their raw JSON so that new platform events never
//! break decoding.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Body of a webhook callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackRequest {
    /// User ID of the bot that should receive the events.
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Fields shared by every event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub mode: EventMode,
    #[serde(default)]
    pub webhook_event_id: String,
    #[serde(default)]
    pub delivery_context: DeliveryContext,
}

impl EventBase {
    /// Event time as a UTC datetime.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Channel state when the event was sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    #[default]
    Active,
    Standby,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    /// Set when the platform resends an event that was not acknowledged.
    pub is_redelivery: bool,
}

/// Where an event came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    #[serde(rename_all = "camelCase")]
    User { user_id: String },
    #[serde(rename_all = "camelCase")]
    Group {
        group_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Room {
        room_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl Source {
    /// The acting user, when known.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { user_id, .. } | Self::Room { user_id, .. } => user_id.as_deref(),
            Self::Unknown => None,
        }
    }

    /// The ID to push replies to: the group, the room, or the user.
    pub fn chat_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { group_id, .. } => Some(group_id),
            Self::Room { room_id, .. } => Some(room_id),
            Self::Unknown => None,
        }
    }
}

// --- Message content ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text(TextContent),
    Image(ImageContent),
    Video(VideoContent),
    Audio(AudioContent),
    File(FileContent),
    Location(LocationContent),
    Sticker(StickerContent),
    #[serde(other)]
    Unknown,
}

impl MessageContent {
    /// Message ID, used to fetch binary content.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Text(m) => Some(&m.id),
            Self::Image(m) => Some(&m.id),
            Self::Video(m) => Some(&m.id),
            Self::Audio(m) => Some(&m.id),
            Self::File(m) => Some(&m.id),
            Self::Location(m) => Some(&m.id),
            Self::Sticker(m) => Some(&m.id),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emojis: Vec<Emoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<Mention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    pub index: u32,
    pub length: u32,
    pub product_id: String,
    pub emoji_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub mentionees: Vec<Mentionee>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentionee {
    #[serde(rename = "type", default)]
    pub kind: MentioneeType,
    pub index: u32,
    pub length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_self: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentioneeType {
    #[default]
    User,
    All,
}

/// Where the binary content of an image, video or audio message lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProvider {
    #[serde(rename = "type")]
    pub kind: ContentProviderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentProviderType {
    /// Stored by the platform; fetch with the content endpoint.
    Line,
    External,
}

/// Groups images sent together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    pub id: String,
    pub content_provider: ContentProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_set: Option<ImageSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContent {
    pub id: String,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    pub content_provider: ContentProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioContent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    pub content_provider: ContentProvider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub id: String,
    pub file_name: String,
    pub file_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationContent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerContent {
    pub id: String,
    pub package_id: String,
    pub sticker_id: String,
    /// `STATIC`, `ANIMATION`, `SOUND`, ...
    #[serde(default)]
    pub sticker_resource_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

// --- Events ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    pub message: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsendEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub unsend: Unsend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unsend {
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub follow: Option<FollowDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowDetail {
    /// The user unblocked the bot rather than adding it for the first time.
    pub is_unblocked: bool,
}

/// Events that carry nothing beyond the common fields: `unfollow`, `leave`,
/// `botSuspended`, `botResumed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainEvent {
    #[serde(flatten)]
    pub base: EventBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberJoinedEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    pub joined: Members,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberLeftEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub left: Members,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Members {
    pub members: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostbackEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    pub postback: Postback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Postback {
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<PostbackParams>,
}

/// Values picked by datetime picker or rich menu switch actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostbackParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_rich_menu_alias_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPlayCompleteEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    pub video_play_complete: VideoPlayComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPlayComplete {
    pub tracking_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    pub beacon: Beacon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    pub hwid: String,
    #[serde(rename = "type")]
    pub kind: BeaconEventType,
    /// Device message, hex encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm: Option<String>,
}

impl Beacon {
    /// Decoded device message. `None` when absent or not valid hex.
    pub fn device_message(&self) -> Option<Vec<u8>> {
        self.dm.as_deref().and_then(|dm| hex::decode(dm).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeaconEventType {
    Enter,
    Banner,
    Stay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLinkEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    pub link: AccountLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLink {
    pub result: AccountLinkResult,
    pub nonce: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountLinkResult {
    Ok,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingsEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    pub things: Things,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Things {
    pub device_id: String,
    #[serde(rename = "type")]
    pub kind: ThingsEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ScenarioResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThingsEventType {
    Link,
    Unlink,
    ScenarioResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_id: Option<String>,
    #[serde(default)]
    pub revision: i64,
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub end_time: i64,
    pub result_code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_results: Vec<ActionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ble_notification_payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// `void` or `binary`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub reply_token: Option<String>,
    pub membership: Membership,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(rename = "type")]
    pub kind: MembershipEventType,
    pub membership_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipEventType {
    Joined,
    Left,
    Renewed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub module: Module,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(rename = "type")]
    pub kind: ModuleEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleEventType {
    Attached,
    Detached,
}

/// `activated` and `deactivated` events of module channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatControlEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_control: Option<ChatControl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatControl {
    pub expire_at: i64,
}

macro_rules! events {
    ($($variant:ident($ty:ty) = $tag:literal,)*) => {
        /// A webhook event.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Event {
            $($variant($ty),)*
            /// An event type this crate does not model, kept as raw JSON.
            Unknown(Value),
        }

        #[derive(Deserialize)]
        #[serde(tag = "type")]
        enum Tagged {
            $(#[serde(rename = $tag)] $variant($ty),)*
        }

        #[derive(Serialize)]
        #[serde(tag = "type")]
        enum TaggedRef<'a> {
            $(#[serde(rename = $tag)] $variant(&'a $ty),)*
        }

        const KNOWN_EVENT_TYPES: &[&str] = &[$($tag),*];

        impl Serialize for Event {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Event::$variant(e) => TaggedRef::$variant(e).serialize(serializer),)*
                    Event::Unknown(raw) => raw.serialize(serializer),
                }
            }
        }

        impl From<Tagged> for Event {
            fn from(tagged: Tagged) -> Self {
                match tagged {
                    $(Tagged::$variant(e) => Event::$variant(e),)*
                }
            }
        }

        impl Event {
            /// Value of the `type` discriminator.
            pub fn kind(&self) -> &str {
                match self {
                    $(Event::$variant(_) => $tag,)*
                    Event::Unknown(raw) => raw.get("type").and_then(Value::as_str).unwrap_or(""),
                }
            }

            /// Common fields. `None` for unknown events.
            pub fn base(&self) -> Option<&EventBase> {
                match self {
                    $(Event::$variant(e) => Some(&e.base),)*
                    Event::Unknown(_) => None,
                }
            }
        }
    };
}

events! {
    Message(MessageEvent) = "message",
    Unsend(UnsendEvent) = "unsend",
    Follow(FollowEvent) = "follow",
    Unfollow(PlainEvent) = "unfollow",
    Join(JoinEvent) = "join",
    Leave(PlainEvent) = "leave",
    MemberJoined(MemberJoinedEvent) = "memberJoined",
    MemberLeft(MemberLeftEvent) = "memberLeft",
    Postback(PostbackEvent) = "postback",
    VideoPlayComplete(VideoPlayCompleteEvent) = "videoPlayComplete",
    Beacon(BeaconEvent) = "beacon",
    AccountLink(AccountLinkEvent) = "accountLink",
    Things(ThingsEvent) = "things",
    Membership(MembershipEvent) = "membership",
    Module(ModuleEvent) = "module",
    Activated(ChatControlEvent) = "activated",
    Deactivated(ChatControlEvent) = "deactivated",
    BotSuspended(PlainEvent) = "botSuspended",
    BotResumed(PlainEvent) = "botResumed",
}

impl Event {
    pub fn source(&self) -> Option<&Source> {
        self.base().and_then(|b| b.source.as_ref())
    }

    pub fn reply_token(&self) -> Option<&str> {
        let token = match self {
            Self::Message(e) => &e.reply_token,
            Self::Follow(e) => &e.reply_token,
            Self::Join(e) => &e.reply_token,
            Self::MemberJoined(e) => &e.reply_token,
            Self::Postback(e) => &e.reply_token,
            Self::VideoPlayComplete(e) => &e.reply_token,
            Self::Beacon(e) => &e.reply_token,
            Self::AccountLink(e) => &e.reply_token,
            Self::Things(e) => &e.reply_token,
            Self::Membership(e) => &e.reply_token,
            _ => return None,
        };
        token.as_deref()
    }

    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.base().and_then(EventBase::timestamp_utc)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let known = raw
            .get("type")
            .and_then(Value::as_str)
            .map_or(false, |kind| KNOWN_EVENT_TYPES.contains(&kind));
        if !known {
            return Ok(Event::Unknown(raw));
        }
        Tagged::deserialize(raw).map(Event::from).map_err(de::Error::custom)
    }
}
