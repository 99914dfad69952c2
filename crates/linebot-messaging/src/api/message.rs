//! Sending messages, message content, quota and delivery counts.

use crate::client::{with_json, with_retry_key, Base, BasicResponse, Client, MessageContent, MessageContentStream};
use crate::error::LineError;
use crate::models::message::validate_messages;
use crate::models::{
    DemographicFilter, MessageQuotaResponse, MessagesNumberResponse, NarrowcastLimit,
    NarrowcastProgressResponse, QuotaConsumptionResponse, Recipient, SendingMessage,
};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

/// Maximum number of multicast recipients.
pub const MAX_MULTICAST_RECIPIENTS: usize = 500;

fn is_false(b: &bool) -> bool {
    !*b
}

/// Send endpoints that accept message validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Reply,
    Push,
    Multicast,
    Broadcast,
    Narrowcast,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reply => "reply",
            Self::Push => "push",
            Self::Multicast => "multicast",
            Self::Broadcast => "broadcast",
            Self::Narrowcast => "narrowcast",
        }
    }
}

impl std::str::FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "reply" => Ok(Self::Reply),
            "push" => Ok(Self::Push),
            "multicast" => Ok(Self::Multicast),
            "broadcast" => Ok(Self::Broadcast),
            "narrowcast" => Ok(Self::Narrowcast),
            other => Err(format!("unknown message type '{}'", other)),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyBody<'a> {
    reply_token: &'a str,
    messages: &'a [SendingMessage],
    #[serde(skip_serializing_if = "is_false")]
    notification_disabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PushBody<'a> {
    to: &'a str,
    messages: &'a [SendingMessage],
    #[serde(skip_serializing_if = "is_false")]
    notification_disabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MulticastBody<'a> {
    to: &'a [String],
    messages: &'a [SendingMessage],
    #[serde(skip_serializing_if = "is_false")]
    notification_disabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastBody<'a> {
    messages: &'a [SendingMessage],
    #[serde(skip_serializing_if = "is_false")]
    notification_disabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NarrowcastBody<'a> {
    messages: &'a [SendingMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient: Option<&'a Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<NarrowcastFilter<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<&'a NarrowcastLimit>,
    #[serde(skip_serializing_if = "is_false")]
    notification_disabled: bool,
}

#[derive(Serialize)]
struct NarrowcastFilter<'a> {
    demographic: &'a DemographicFilter,
}

#[derive(Serialize)]
struct MessagesBody<'a> {
    messages: &'a [SendingMessage],
}

/// `POST /v2/bot/message/reply`
#[must_use = "call .send() to perform the request"]
pub struct ReplyMessageCall<'a> {
    client: &'a Client,
    reply_token: String,
    messages: Vec<SendingMessage>,
    notification_disabled: bool,
}

impl ReplyMessageCall<'_> {
    /// Deliver without a push notification.
    pub fn notification_disabled(mut self) -> Self {
        self.notification_disabled = true;
        self
    }

    pub async fn send(self) -> Result<BasicResponse> {
        validate_messages(&self.messages)?;
        let body = ReplyBody {
            reply_token: &self.reply_token,
            messages: &self.messages,
            notification_disabled: self.notification_disabled,
        };
        let request = self.client.request(Method::POST, Base::Api, "/v2/bot/message/reply");
        self.client.call_basic(with_json(request, &body)?).await
    }
}

/// `POST /v2/bot/message/push`
#[must_use = "call .send() to perform the request"]
pub struct PushMessageCall<'a> {
    client: &'a Client,
    to: String,
    messages: Vec<SendingMessage>,
    notification_disabled: bool,
    retry_key: Option<Uuid>,
}

impl PushMessageCall<'_> {
    pub fn notification_disabled(mut self) -> Self {
        self.notification_disabled = true;
        self
    }

    /// Make the request idempotent; a retried request with the same key is
    /// accepted only once.
    pub fn retry_key(mut self, key: Uuid) -> Self {
        self.retry_key = Some(key);
        self
    }

    pub async fn send(self) -> Result<BasicResponse> {
        validate_messages(&self.messages)?;
        let body = PushBody {
            to: &self.to,
            messages: &self.messages,
            notification_disabled: self.notification_disabled,
        };
        let request = self.client.request(Method::POST, Base::Api, "/v2/bot/message/push");
        let request = with_retry_key(request, self.retry_key.map(|k| k.to_string()).as_deref());
        self.client.call_basic(with_json(request, &body)?).await
    }
}

/// `POST /v2/bot/message/multicast`
#[must_use = "call .send() to perform the request"]
pub struct MulticastCall<'a> {
    client: &'a Client,
    to: Vec<String>,
    messages: Vec<SendingMessage>,
    notification_disabled: bool,
    retry_key: Option<Uuid>,
}

impl MulticastCall<'_> {
    pub fn notification_disabled(mut self) -> Self {
        self.notification_disabled = true;
        self
    }

    pub fn retry_key(mut self, key: Uuid) -> Self {
        self.retry_key = Some(key);
        self
    }

    pub async fn send(self) -> Result<BasicResponse> {
        if self.to.is_empty() {
            return Err(LineError::invalid_request("multicast requires at least one recipient"));
        }
        if self.to.len() > MAX_MULTICAST_RECIPIENTS {
            return Err(LineError::invalid_request(format!(
                "too many multicast recipients: {} (max {})",
                self.to.len(),
                MAX_MULTICAST_RECIPIENTS
            )));
        }
        validate_messages(&self.messages)?;
        let body = MulticastBody {
            to: &self.to,
            messages: &self.messages,
            notification_disabled: self.notification_disabled,
        };
        let request = self.client.request(Method::POST, Base::Api, "/v2/bot/message/multicast");
        let request = with_retry_key(request, self.retry_key.map(|k| k.to_string()).as_deref());
        self.client.call_basic(with_json(request, &body)?).await
    }
}

/// `POST /v2/bot/message/broadcast`
#[must_use = "call .send() to perform the request"]
pub struct BroadcastMessageCall<'a> {
    client: &'a Client,
    messages: Vec<SendingMessage>,
    notification_disabled: bool,
    retry_key: Option<Uuid>,
}

impl BroadcastMessageCall<'_> {
    pub fn notification_disabled(mut self) -> Self {
        self.notification_disabled = true;
        self
    }

    pub fn retry_key(mut self, key: Uuid) -> Self {
        self.retry_key = Some(key);
        self
    }

    pub async fn send(self) -> Result<BasicResponse> {
        validate_messages(&self.messages)?;
        let body = BroadcastBody {
            messages: &self.messages,
            notification_disabled: self.notification_disabled,
        };
        let request = self.client.request(Method::POST, Base::Api, "/v2/bot/message/broadcast");
        let request = with_retry_key(request, self.retry_key.map(|k| k.to_string()).as_deref());
        self.client.call_basic(with_json(request, &body)?).await
    }
}

/// `POST /v2/bot/message/narrowcast`
///
/// The returned [`BasicResponse::request_id`] identifies the job for
/// [`Client::get_narrowcast_progress`].
#[must_use = "call .send() to perform the request"]
pub struct NarrowcastCall<'a> {
    client: &'a Client,
    messages: Vec<SendingMessage>,
    recipient: Option<Recipient>,
    filter: Option<DemographicFilter>,
    limit: Option<NarrowcastLimit>,
    notification_disabled: bool,
    retry_key: Option<Uuid>,
}

impl NarrowcastCall<'_> {
    pub fn recipient(mut self, recipient: Recipient) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn filter(mut self, filter: DemographicFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn limit(mut self, limit: NarrowcastLimit) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn notification_disabled(mut self) -> Self {
        self.notification_disabled = true;
        self
    }

    pub fn retry_key(mut self, key: Uuid) -> Self {
        self.retry_key = Some(key);
        self
    }

    pub async fn send(self) -> Result<BasicResponse> {
        validate_messages(&self.messages)?;
        let body = NarrowcastBody {
            messages: &self.messages,
            recipient: self.recipient.as_ref(),
            filter: self
                .filter
                .as_ref()
                .map(|demographic| NarrowcastFilter { demographic }),
            limit: self.limit.as_ref(),
            notification_disabled: self.notification_disabled,
        };
        let request = self.client.request(Method::POST, Base::Api, "/v2/bot/message/narrowcast");
        let request = with_retry_key(request, self.retry_key.map(|k| k.to_string()).as_deref());
        self.client.call_basic(with_json(request, &body)?).await
    }
}

impl Client {
    /// Reply to an event using its reply token.
    pub fn reply_message(
        &self,
        reply_token: impl Into<String>,
        messages: impl IntoIterator<Item = SendingMessage>,
    ) -> ReplyMessageCall<'_> {
        ReplyMessageCall {
            client: self,
            reply_token: reply_token.into(),
            messages: messages.into_iter().collect(),
            notification_disabled: false,
        }
    }

    /// Push messages to a user, group or room.
    pub fn push_message(
        &self,
        to: impl Into<String>,
        messages: impl IntoIterator<Item = SendingMessage>,
    ) -> PushMessageCall<'_> {
        PushMessageCall {
            client: self,
            to: to.into(),
            messages: messages.into_iter().collect(),
            notification_disabled: false,
            retry_key: None,
        }
    }

    /// Send the same messages to multiple users.
    pub fn multicast(
        &self,
        to: impl IntoIterator<Item = impl Into<String>>,
        messages: impl IntoIterator<Item = SendingMessage>,
    ) -> MulticastCall<'_> {
        MulticastCall {
            client: self,
            to: to.into_iter().map(Into::into).collect(),
            messages: messages.into_iter().collect(),
            notification_disabled: false,
            retry_key: None,
        }
    }

    /// Send messages to every friend of the bot.
    pub fn broadcast_message(
        &self,
        messages: impl IntoIterator<Item = SendingMessage>,
    ) -> BroadcastMessageCall<'_> {
        BroadcastMessageCall {
            client: self,
            messages: messages.into_iter().collect(),
            notification_disabled: false,
            retry_key: None,
        }
    }

    /// Send messages to a targeted subset of friends.
    pub fn narrowcast(&self, messages: impl IntoIterator<Item = SendingMessage>) -> NarrowcastCall<'_> {
        NarrowcastCall {
            client: self,
            messages: messages.into_iter().collect(),
            recipient: None,
            filter: None,
            limit: None,
            notification_disabled: false,
            retry_key: None,
        }
    }

    pub async fn get_narrowcast_progress(&self, request_id: &str) -> Result<NarrowcastProgressResponse> {
        let request = self
            .request(Method::GET, Base::Api, "/v2/bot/message/progress/narrowcast")
            .query(&[("requestId", request_id)]);
        self.call(request).await
    }

    /// Validate messages against the rules of one send endpoint.
    pub async fn validate_messages(
        &self,
        kind: MessageKind,
        messages: &[SendingMessage],
    ) -> Result<BasicResponse> {
        validate_messages(messages)?;
        let path = format!("/v2/bot/message/validate/{}", kind.as_str());
        let request = self.request(Method::POST, Base::Api, &path);
        self.call_basic(with_json(request, &MessagesBody { messages })?).await
    }

    pub async fn validate_reply_messages(&self, messages: &[SendingMessage]) -> Result<BasicResponse> {
        self.validate_messages(MessageKind::Reply, messages).await
    }

    pub async fn validate_push_messages(&self, messages: &[SendingMessage]) -> Result<BasicResponse> {
        self.validate_messages(MessageKind::Push, messages).await
    }

    pub async fn validate_multicast_messages(&self, messages: &[SendingMessage]) -> Result<BasicResponse> {
        self.validate_messages(MessageKind::Multicast, messages).await
    }

    pub async fn validate_broadcast_messages(&self, messages: &[SendingMessage]) -> Result<BasicResponse> {
        self.validate_messages(MessageKind::Broadcast, messages).await
    }

    pub async fn validate_narrowcast_messages(&self, messages: &[SendingMessage]) -> Result<BasicResponse> {
        self.validate_messages(MessageKind::Narrowcast, messages).await
    }

    /// Download the content of an image, video, audio or file message.
    pub async fn get_message_content(&self, message_id: &str) -> Result<MessageContent> {
        let path = format!("/v2/bot/message/{}/content", crate::client::segment(message_id));
        self.call_content(self.request(Method::GET, Base::Data, &path)).await
    }

    /// Like [`get_message_content`](Self::get_message_content) without
    /// buffering the body.
    pub async fn get_message_content_stream(&self, message_id: &str) -> Result<MessageContentStream> {
        let path = format!("/v2/bot/message/{}/content", crate::client::segment(message_id));
        self.call_content_stream(self.request(Method::GET, Base::Data, &path)).await
    }

    pub async fn get_message_quota(&self) -> Result<MessageQuotaResponse> {
        self.call(self.request(Method::GET, Base::Api, "/v2/bot/message/quota"))
            .await
    }

    pub async fn get_message_quota_consumption(&self) -> Result<QuotaConsumptionResponse> {
        self.call(self.request(Method::GET, Base::Api, "/v2/bot/message/quota/consumption"))
            .await
    }

    /// Number of messages sent through one endpoint on `date` (`yyyyMMdd`,
    /// UTC+9). Broadcast and narrowcast are only counted with `Broadcast`.
    pub async fn get_number_messages(
        &self,
        kind: MessageKind,
        date: &str,
    ) -> Result<MessagesNumberResponse> {
        if kind == MessageKind::Narrowcast {
            return Err(LineError::invalid_request(
                "narrowcast deliveries are counted by get_narrowcast_progress",
            ));
        }
        let path = format!("/v2/bot/message/delivery/{}", kind.as_str());
        let request = self
            .request(Method::GET, Base::Api, &path)
            .query(&[("date", date)]);
        self.call(request).await
    }

    pub async fn get_number_reply_messages(&self, date: &str) -> Result<MessagesNumberResponse> {
        self.get_number_messages(MessageKind::Reply, date).await
    }

    pub async fn get_number_push_messages(&self, date: &str) -> Result<MessagesNumberResponse> {
        self.get_number_messages(MessageKind::Push, date).await
    }

    pub async fn get_number_multicast_messages(&self, date: &str) -> Result<MessagesNumberResponse> {
        self.get_number_messages(MessageKind::Multicast, date).await
    }

    pub async fn get_number_broadcast_messages(&self, date: &str) -> Result<MessagesNumberResponse> {
        self.get_number_messages(MessageKind::Broadcast, date).await
    }
}
