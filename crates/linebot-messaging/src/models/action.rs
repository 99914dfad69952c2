//! Actions attached to buttons, quick replies, rich menus and flex
//! components.

use serde::{Deserialize, Serialize};

/// An action, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Open a URI.
    #[serde(rename = "uri")]
    Uri(UriAction),

    /// Send a text message as the user.
    #[serde(rename = "message")]
    Message(MessageAction),

    /// Send a postback event to the bot.
    #[serde(rename = "postback")]
    Postback(PostbackAction),

    /// Let the user pick a date and/or time.
    #[serde(rename = "datetimepicker")]
    DatetimePicker(DatetimePickerAction),

    /// Open the camera.
    #[serde(rename = "camera")]
    Camera(LabelAction),

    /// Open the camera roll.
    #[serde(rename = "cameraRoll")]
    CameraRoll(LabelAction),

    /// Open the location picker.
    #[serde(rename = "location")]
    Location(LabelAction),

    /// Switch to another rich menu.
    #[serde(rename = "richmenuswitch")]
    RichMenuSwitch(RichMenuSwitchAction),

    /// Copy text to the clipboard.
    #[serde(rename = "clipboard")]
    Clipboard(ClipboardAction),
}

impl Action {
    /// `uri` action.
    pub fn uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::Uri(UriAction {
            label: non_empty(label.into()),
            uri: uri.into(),
            alt_uri: None,
        })
    }

    /// `message` action.
    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message(MessageAction {
            label: non_empty(label.into()),
            text: text.into(),
        })
    }

    /// `postback` action with only label and data set.
    pub fn postback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Postback(PostbackAction {
            label: non_empty(label.into()),
            data: data.into(),
            ..Default::default()
        })
    }

    /// `datetimepicker` action.
    pub fn datetime_picker(
        label: impl Into<String>,
        data: impl Into<String>,
        mode: DatetimePickerMode,
    ) -> Self {
        Self::DatetimePicker(DatetimePickerAction {
            label: non_empty(label.into()),
            data: data.into(),
            mode,
            initial: None,
            max: None,
            min: None,
        })
    }

    /// `camera` action.
    pub fn camera(label: impl Into<String>) -> Self {
        Self::Camera(LabelAction {
            label: label.into(),
        })
    }

    /// `cameraRoll` action.
    pub fn camera_roll(label: impl Into<String>) -> Self {
        Self::CameraRoll(LabelAction {
            label: label.into(),
        })
    }

    /// `location` action.
    pub fn location(label: impl Into<String>) -> Self {
        Self::Location(LabelAction {
            label: label.into(),
        })
    }

    /// `richmenuswitch` action.
    pub fn rich_menu_switch(
        label: impl Into<String>,
        rich_menu_alias_id: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self::RichMenuSwitch(RichMenuSwitchAction {
            label: non_empty(label.into()),
            rich_menu_alias_id: rich_menu_alias_id.into(),
            data: data.into(),
        })
    }

    /// `clipboard` action.
    pub fn clipboard(label: impl Into<String>, clipboard_text: impl Into<String>) -> Self {
        Self::Clipboard(ClipboardAction {
            label: label.into(),
            clipboard_text: clipboard_text.into(),
        })
    }

    /// Wire `type` of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uri(_) => "uri",
            Self::Message(_) => "message",
            Self::Postback(_) => "postback",
            Self::DatetimePicker(_) => "datetimepicker",
            Self::Camera(_) => "camera",
            Self::CameraRoll(_) => "cameraRoll",
            Self::Location(_) => "location",
            Self::RichMenuSwitch(_) => "richmenuswitch",
            Self::Clipboard(_) => "clipboard",
        }
    }

    /// Whether this action may be attached to a quick reply button.
    pub fn allowed_in_quick_reply(&self) -> bool {
        !matches!(self, Self::RichMenuSwitch(_) | Self::Clipboard(_))
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UriAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_uri: Option<AltUri>,
}

impl UriAction {
    /// URI opened on LINE for desktop instead of `uri`.
    pub fn with_desktop_uri(mut self, desktop: impl Into<String>) -> Self {
        self.alt_uri = Some(AltUri {
            desktop: desktop.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AltUri {
    pub desktop: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostbackAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_option: Option<InputOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_in_text: Option<String>,
}

impl PostbackAction {
    pub fn with_display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    pub fn with_input_option(mut self, option: InputOption) -> Self {
        self.input_option = Some(option);
        self
    }

    pub fn with_fill_in_text(mut self, text: impl Into<String>) -> Self {
        self.fill_in_text = Some(text.into());
        self
    }
}

impl From<PostbackAction> for Action {
    fn from(a: PostbackAction) -> Self {
        Self::Postback(a)
    }
}

impl From<UriAction> for Action {
    fn from(a: UriAction) -> Self {
        Self::Uri(a)
    }
}

/// What the client shows after a postback action is tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputOption {
    CloseRichMenu,
    OpenRichMenu,
    OpenKeyboard,
    OpenVoice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimePickerAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: String,
    pub mode: DatetimePickerMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatetimePickerMode {
    Date,
    Time,
    Datetime,
}

/// Payload of the label-only actions (`camera`, `cameraRoll`, `location`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelAction {
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichMenuSwitchAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub rich_menu_alias_id: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardAction {
    pub label: String,
    pub clipboard_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uri_action_omits_empty_label() {
        let value = serde_json::to_value(Action::uri("", "https://example.com")).unwrap();
        assert_eq!(value, json!({"type": "uri", "uri": "https://example.com"}));
    }

    #[test]
    fn test_postback_action_options() {
        let action: Action = PostbackAction {
            label: Some("Buy".to_string()),
            data: "action=buy&itemid=111".to_string(),
            ..Default::default()
        }
        .with_display_text("Buy it")
        .with_input_option(InputOption::OpenKeyboard)
        .with_fill_in_text("---\nName: ")
        .into();

        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "type": "postback",
                "label": "Buy",
                "data": "action=buy&itemid=111",
                "displayText": "Buy it",
                "inputOption": "openKeyboard",
                "fillInText": "---\nName: "
            })
        );
    }

    #[test]
    fn test_decode_each_action_kind() {
        let raw = json!([
            {"type": "uri", "label": "Go", "uri": "https://example.com", "altUri": {"desktop": "https://example.com/pc"}},
            {"type": "message", "label": "Yes", "text": "yes"},
            {"type": "postback", "data": "a=1"},
            {"type": "datetimepicker", "label": "When", "data": "d", "mode": "datetime", "initial": "2017-06-18T06:15"},
            {"type": "camera", "label": "Camera"},
            {"type": "cameraRoll", "label": "Roll"},
            {"type": "location", "label": "Where"},
            {"type": "richmenuswitch", "richMenuAliasId": "alias-b", "data": "switch"},
            {"type": "clipboard", "label": "Copy", "clipboardText": "3B48740B"}
        ]);

        let actions: Vec<Action> = serde_json::from_value(raw).unwrap();
        let kinds: Vec<_> = actions.iter().map(Action::kind).collect();
        assert_eq!(
            kinds,
            [
                "uri",
                "message",
                "postback",
                "datetimepicker",
                "camera",
                "cameraRoll",
                "location",
                "richmenuswitch",
                "clipboard"
            ]
        );

        match &actions[3] {
            Action::DatetimePicker(a) => {
                assert_eq!(a.mode, DatetimePickerMode::Datetime);
                assert_eq!(a.initial.as_deref(), Some("2017-06-18T06:15"));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let err = serde_json::from_str::<Action>(r#"{"type":"teleport","label":"x"}"#).unwrap_err();
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn test_quick_reply_allowed_actions() {
        assert!(Action::camera("c").allowed_in_quick_reply());
        assert!(!Action::clipboard("c", "t").allowed_in_quick_reply());
        assert!(!Action::rich_menu_switch("s", "alias", "d").allowed_in_quick_reply());
    }
}
