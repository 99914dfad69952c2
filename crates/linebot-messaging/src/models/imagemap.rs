//! Imagemap message parts.

use serde::{Deserialize, Serialize};

/// Width and height of the base image; width is always 1040.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagemapBaseSize {
    pub width: u32,
    pub height: u32,
}

/// Tappable area, in base-image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagemapArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ImagemapArea {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Imagemap action, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImagemapAction {
    Uri {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(rename = "linkUri")]
        link_uri: String,
        area: ImagemapArea,
    },
    Message {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        text: String,
        area: ImagemapArea,
    },
}

/// Video played inside an imagemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapVideo {
    pub original_content_url: String,
    pub preview_image_url: String,
    pub area: ImagemapArea,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<ImagemapVideoExternalLink>,
}

/// Link shown after the video finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapVideoExternalLink {
    pub link_uri: String,
    pub label: String,
}
