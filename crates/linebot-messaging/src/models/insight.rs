//! Statistics returned by the insight endpoints.

use serde::{Deserialize, Serialize};

/// Whether aggregated numbers are available for the requested date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightStatus {
    Ready,
    Unready,
    OutOfService,
}

/// `GET /v2/bot/insight/message/delivery`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDeliveryInsight {
    pub status: InsightStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeting: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_response: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_response: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_broadcast: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_push: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_multicast: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_narrowcast: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_reply: Option<i64>,
}

/// `GET /v2/bot/insight/followers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowersInsight {
    pub status: InsightStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeted_reaches: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<i64>,
}

/// `GET /v2/bot/insight/demographic`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendDemographicsInsight {
    pub available: bool,
    #[serde(default)]
    pub genders: Vec<GenderShare>,
    #[serde(default)]
    pub ages: Vec<AgeShare>,
    #[serde(default)]
    pub areas: Vec<AreaShare>,
    #[serde(default)]
    pub app_types: Vec<AppTypeShare>,
    #[serde(default)]
    pub subscription_periods: Vec<SubscriptionPeriodShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderShare {
    pub gender: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeShare {
    pub age: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaShare {
    pub area: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTypeShare {
    pub app_type: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPeriodShare {
    pub subscription_period: String,
    pub percentage: f64,
}
