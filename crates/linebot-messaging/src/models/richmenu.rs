//! Rich menus and rich menu aliases.

use super::action::Action;
use serde::{Deserialize, Serialize};

/// A rich menu definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichMenu {
    pub size: RichMenuSize,
    /// Whether the menu is displayed by default.
    pub selected: bool,
    pub name: String,
    pub chat_bar_text: String,
    pub areas: Vec<RichMenuArea>,
}

/// Menu image size; width 2500, height 1686 or 843.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichMenuSize {
    pub width: u32,
    pub height: u32,
}

impl RichMenuSize {
    pub const FULL: Self = Self {
        width: 2500,
        height: 1686,
    };
    pub const HALF: Self = Self {
        width: 2500,
        height: 843,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichMenuArea {
    pub bounds: RichMenuBounds,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichMenuBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A stored rich menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichMenuResponse {
    pub rich_menu_id: String,
    #[serde(flatten)]
    pub menu: RichMenu,
}

/// `GET /v2/bot/richmenu/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichMenuListResponse {
    pub richmenus: Vec<RichMenuResponse>,
}

/// Response carrying only a rich menu ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichMenuIdResponse {
    pub rich_menu_id: String,
}

/// Maps a stable alias to a rich menu, used by `richmenuswitch` actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichMenuAlias {
    pub rich_menu_alias_id: String,
    pub rich_menu_id: String,
}

/// `GET /v2/bot/richmenu/alias/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichMenuAliasListResponse {
    pub aliases: Vec<RichMenuAlias>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rich_menu_wire_format() {
        let menu = RichMenu {
            size: RichMenuSize::HALF,
            selected: false,
            name: "Nice rich menu".to_string(),
            chat_bar_text: "Tap to open".to_string(),
            areas: vec![RichMenuArea {
                bounds: RichMenuBounds {
                    x: 0,
                    y: 0,
                    width: 2500,
                    height: 843,
                },
                action: Action::postback("", "action=buy&itemid=123"),
            }],
        };

        assert_eq!(
            serde_json::to_value(&menu).unwrap(),
            json!({
                "size": {"width": 2500, "height": 843},
                "selected": false,
                "name": "Nice rich menu",
                "chatBarText": "Tap to open",
                "areas": [{
                    "bounds": {"x": 0, "y": 0, "width": 2500, "height": 843},
                    "action": {"type": "postback", "data": "action=buy&itemid=123"}
                }]
            })
        );
    }

    #[test]
    fn test_decode_rich_menu_list() {
        let body = json!({"richmenus": [{
            "richMenuId": "richmenu-88c05ef6921ae53f8b58a25f3a65faf7",
            "size": {"width": 2500, "height": 1686},
            "selected": true,
            "name": "Menu",
            "chatBarText": "Open",
            "areas": [{
                "bounds": {"x": 0, "y": 0, "width": 2500, "height": 1686},
                "action": {"type": "richmenuswitch", "richMenuAliasId": "richmenu-alias-b", "data": "richmenu-changed-to-b"}
            }]
        }]});

        let list: RichMenuListResponse = serde_json::from_value(body).unwrap();
        let menu = &list.richmenus[0];
        assert_eq!(menu.rich_menu_id, "richmenu-88c05ef6921ae53f8b58a25f3a65faf7");
        assert_eq!(menu.menu.size, RichMenuSize::FULL);
        assert!(matches!(menu.menu.areas[0].action, Action::RichMenuSwitch(_)));
    }
}
