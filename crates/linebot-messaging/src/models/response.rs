//! Response bodies of the profile, group, room, quota, delivery and bot
//! endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub user_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummaryResponse {
    pub group_id: String,
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCountResponse {
    pub count: u64,
}

/// One page of follower IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdsResponse {
    #[serde(default)]
    pub user_ids: Vec<String>,
    /// Continuation token; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// One page of group or room member IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberIdsResponse {
    #[serde(default)]
    pub member_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaType {
    None,
    Limited,
}

/// `GET /v2/bot/message/quota`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageQuotaResponse {
    #[serde(rename = "type")]
    pub kind: QuotaType,
    /// Monthly limit; only set for `limited`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// `GET /v2/bot/message/quota/consumption`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaConsumptionResponse {
    pub total_usage: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Ready,
    Unready,
    OutOfService,
}

/// `GET /v2/bot/message/delivery/{type}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesNumberResponse {
    pub status: DeliveryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Chat,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkAsReadMode {
    Auto,
    Manual,
}

/// `GET /v2/bot/info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotInfoResponse {
    pub user_id: String,
    pub basic_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_id: Option<String>,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub chat_mode: ChatMode,
    pub mark_as_read_mode: MarkAsReadMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTokenResponse {
    pub link_token: String,
}

/// `GET /v2/bot/channel/webhook/endpoint`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEndpointInfo {
    pub endpoint: String,
    pub active: bool,
}

/// `POST /v2/bot/channel/webhook/test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestWebhookResponse {
    pub success: bool,
    pub timestamp: String,
    pub status_code: u16,
    pub reason: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrowcastPhase {
    Waiting,
    Sending,
    Succeeded,
    Failed,
}

/// `GET /v2/bot/message/progress/narrowcast`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrowcastProgressResponse {
    pub phase: NarrowcastPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    pub accepted_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_optional_fields() {
        let profile: UserProfileResponse =
            serde_json::from_str(r#"{"userId":"U4af4980629","displayName":"LINE taro"}"#).unwrap();
        assert_eq!(profile.display_name, "LINE taro");
        assert!(profile.picture_url.is_none());
        assert!(profile.language.is_none());
    }

    #[test]
    fn test_last_id_page_has_no_next() {
        let page: UserIdsResponse = serde_json::from_str(r#"{"userIds":["U1","U2"]}"#).unwrap();
        assert_eq!(page.user_ids, ["U1", "U2"]);
        assert!(page.next.is_none());
    }

    #[test]
    fn test_quota_and_bot_info() {
        let quota: MessageQuotaResponse = serde_json::from_str(r#"{"type":"limited","value":1000}"#).unwrap();
        assert_eq!(quota.kind, QuotaType::Limited);
        assert_eq!(quota.value, Some(1000));

        let info: BotInfoResponse = serde_json::from_str(
            r#"{"userId":"Ub9952f8","basicId":"@216ru...","displayName":"Example name","chatMode":"chat","markAsReadMode":"manual"}"#,
        )
        .unwrap();
        assert_eq!(info.chat_mode, ChatMode::Chat);
        assert_eq!(info.mark_as_read_mode, MarkAsReadMode::Manual);
    }

    #[test]
    fn test_narrowcast_progress() {
        let progress: NarrowcastProgressResponse = serde_json::from_str(
            r#"{"phase":"failed","failedDescription":"unknown","errorCode":1,"acceptedTime":"2020-12-03T10:15:30.121Z"}"#,
        )
        .unwrap();
        assert_eq!(progress.phase, NarrowcastPhase::Failed);
        assert_eq!(progress.error_code, Some(1));
        assert!(progress.completed_time.is_none());
    }
}
