//! Narrowcast targeting: recipients, demographic filters and limits.

use serde::{Deserialize, Serialize};

/// Who receives a narrowcast, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Recipient {
    Audience {
        #[serde(rename = "audienceGroupId")]
        audience_group_id: i64,
    },
    Redelivery {
        #[serde(rename = "requestId")]
        request_id: String,
    },
    Operator(Operator<Recipient>),
}

impl Recipient {
    pub fn audience(audience_group_id: i64) -> Self {
        Self::Audience { audience_group_id }
    }

    /// Users who received the narrowcast with `request_id`.
    pub fn redelivery(request_id: impl Into<String>) -> Self {
        Self::Redelivery {
            request_id: request_id.into(),
        }
    }

    pub fn and(conditions: impl IntoIterator<Item = Recipient>) -> Self {
        Self::Operator(Operator::and(conditions))
    }

    pub fn or(conditions: impl IntoIterator<Item = Recipient>) -> Self {
        Self::Operator(Operator::or(conditions))
    }

    pub fn not(condition: Recipient) -> Self {
        Self::Operator(Operator::not(condition))
    }
}

/// Logical combination of conditions. Exactly one field is normally set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Operator<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<T>>,
}

impl<T> Operator<T> {
    pub fn and(conditions: impl IntoIterator<Item = T>) -> Self {
        Self {
            and: Some(conditions.into_iter().collect()),
            or: None,
            not: None,
        }
    }

    pub fn or(conditions: impl IntoIterator<Item = T>) -> Self {
        Self {
            and: None,
            or: Some(conditions.into_iter().collect()),
            not: None,
        }
    }

    pub fn not(condition: T) -> Self {
        Self {
            and: None,
            or: None,
            not: Some(Box::new(condition)),
        }
    }
}

/// Demographic filter, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DemographicFilter {
    Gender {
        #[serde(rename = "oneOf")]
        one_of: Vec<Gender>,
    },
    Age {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gte: Option<Age>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lt: Option<Age>,
    },
    AppType {
        #[serde(rename = "oneOf")]
        one_of: Vec<AppType>,
    },
    /// Area codes such as `jp_08`.
    Area {
        #[serde(rename = "oneOf")]
        one_of: Vec<String>,
    },
    SubscriptionPeriod {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gte: Option<SubscriptionPeriod>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lt: Option<SubscriptionPeriod>,
    },
    Operator(Operator<DemographicFilter>),
}

impl DemographicFilter {
    pub fn and(conditions: impl IntoIterator<Item = DemographicFilter>) -> Self {
        Self::Operator(Operator::and(conditions))
    }

    pub fn or(conditions: impl IntoIterator<Item = DemographicFilter>) -> Self {
        Self::Operator(Operator::or(conditions))
    }

    pub fn not(condition: DemographicFilter) -> Self {
        Self::Operator(Operator::not(condition))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    Ios,
    Android,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Age {
    #[serde(rename = "age_15")]
    Age15,
    #[serde(rename = "age_20")]
    Age20,
    #[serde(rename = "age_25")]
    Age25,
    #[serde(rename = "age_30")]
    Age30,
    #[serde(rename = "age_35")]
    Age35,
    #[serde(rename = "age_40")]
    Age40,
    #[serde(rename = "age_45")]
    Age45,
    #[serde(rename = "age_50")]
    Age50,
    #[serde(rename = "age_55")]
    Age55,
    #[serde(rename = "age_60")]
    Age60,
    #[serde(rename = "age_65")]
    Age65,
    #[serde(rename = "age_70")]
    Age70,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubscriptionPeriod {
    #[serde(rename = "day_7")]
    Day7,
    #[serde(rename = "day_30")]
    Day30,
    #[serde(rename = "day_90")]
    Day90,
    #[serde(rename = "day_180")]
    Day180,
    #[serde(rename = "day_365")]
    Day365,
}

/// Caps the number of narrowcast recipients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrowcastLimit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    /// Count only deliveries within the remaining message quota.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to_remaining_quota: Option<bool>,
}
