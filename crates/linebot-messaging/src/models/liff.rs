//! LIFF (LINE Front-end Framework) apps.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiffApp {
    /// Assigned by the server; omitted when adding an app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liff_id: Option<String>,
    pub view: LiffView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<LiffFeatures>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permanent_link_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<LiffScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_prompt: Option<LiffBotPrompt>,
}

impl LiffApp {
    pub fn new(view_type: LiffViewType, url: impl Into<String>) -> Self {
        Self {
            liff_id: None,
            view: LiffView {
                kind: view_type,
                url: url.into(),
                module_mode: None,
            },
            description: None,
            features: None,
            permanent_link_pattern: None,
            scope: Vec::new(),
            bot_prompt: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiffView {
    #[serde(rename = "type")]
    pub kind: LiffViewType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_mode: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiffViewType {
    Compact,
    Tall,
    Full,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiffFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ble: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiffScope {
    #[serde(rename = "openid")]
    OpenId,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "profile")]
    Profile,
    #[serde(rename = "chat_message.write")]
    ChatMessageWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiffBotPrompt {
    Normal,
    Aggressive,
    None,
}

/// `GET /liff/v1/apps`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiffAppsResponse {
    pub apps: Vec<LiffApp>,
}

/// `POST /liff/v1/apps`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiffIdResponse {
    pub liff_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_app_omits_liff_id() {
        let mut app = LiffApp::new(LiffViewType::Tall, "https://example.com/liff");
        app.scope = vec![LiffScope::OpenId, LiffScope::ChatMessageWrite];
        app.bot_prompt = Some(LiffBotPrompt::Aggressive);

        assert_eq!(
            serde_json::to_value(&app).unwrap(),
            json!({
                "view": {"type": "tall", "url": "https://example.com/liff"},
                "scope": ["openid", "chat_message.write"],
                "botPrompt": "aggressive"
            })
        );
    }

    #[test]
    fn test_decode_apps() {
        let body = json!({"apps": [{
            "liffId": "1234567890-AbcdEfgh",
            "view": {"type": "full", "url": "https://example.com/a", "moduleMode": true},
            "description": "Happy New York",
            "features": {"ble": true, "qrCode": true},
            "permanentLinkPattern": "concat"
        }]});
        let apps: LiffAppsResponse = serde_json::from_value(body).unwrap();
        let app = &apps.apps[0];
        assert_eq!(app.liff_id.as_deref(), Some("1234567890-AbcdEfgh"));
        assert_eq!(app.view.module_mode, Some(true));
        assert_eq!(app.features.unwrap().qr_code, Some(true));
        assert!(app.scope.is_empty());
    }
}
