//! Audience groups used as narrowcast recipients.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an audience group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudienceStatus {
    InProgress,
    Ready,
    Failed,
    Expired,
    Inactive,
    Activating,
}

impl AudienceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Failed => "FAILED",
            Self::Expired => "EXPIRED",
            Self::Inactive => "INACTIVE",
            Self::Activating => "ACTIVATING",
        }
    }
}

impl std::str::FromStr for AudienceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "READY" => Ok(Self::Ready),
            "FAILED" => Ok(Self::Failed),
            "EXPIRED" => Ok(Self::Expired),
            "INACTIVE" => Ok(Self::Inactive),
            "ACTIVATING" => Ok(Self::Activating),
            other => Err(format!("unknown audience status '{}'", other)),
        }
    }
}

/// Who may use the audience groups of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorityLevel {
    Public,
    Private,
}

/// How an audience group was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudienceGroupType {
    Upload,
    Click,
    Imp,
    ChatTag,
    FriendPath,
    Reservation,
    AppEvent,
    Video,
    Webtraffic,
    ImageClick,
    RichmenuImp,
    RichmenuClick,
    #[serde(other)]
    Other,
}

/// An audience group as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroup {
    pub audience_group_id: i64,
    #[serde(rename = "type")]
    pub kind: AudienceGroupType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AudienceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_type: Option<String>,
    #[serde(default)]
    pub audience_count: i64,
    /// Creation time, Unix seconds.
    pub created: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ifa_audience: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_url: Option<String>,
}

/// One upload job of an audience group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroupJob {
    pub audience_group_job_id: i64,
    pub audience_group_id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub job_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_type: Option<String>,
    #[serde(default)]
    pub audience_count: i64,
    pub created: i64,
}

/// `GET /v2/bot/audienceGroup/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroupResponse {
    pub audience_group: AudienceGroup,
    #[serde(default)]
    pub jobs: Vec<AudienceGroupJob>,
}

/// `GET /v2/bot/audienceGroup/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroupListResponse {
    #[serde(default)]
    pub audience_groups: Vec<AudienceGroup>,
    pub has_next_page: bool,
    pub total_count: i64,
    #[serde(default)]
    pub read_write_audience_group_total_count: i64,
    pub page: i64,
    pub size: i64,
}

/// `GET /v2/bot/audienceGroup/authorityLevel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityLevelResponse {
    pub authority_level: AuthorityLevel,
}

/// One ID entry in a JSON audience upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audience {
    /// User ID or IFA.
    pub id: String,
}
