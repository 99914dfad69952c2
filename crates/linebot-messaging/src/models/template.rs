//! Template message layouts.

use super::action::Action;
use crate::error::LineError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Template, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Template {
    #[serde(rename = "buttons")]
    Buttons(ButtonsTemplate),
    #[serde(rename = "confirm")]
    Confirm(ConfirmTemplate),
    #[serde(rename = "carousel")]
    Carousel(CarouselTemplate),
    #[serde(rename = "image_carousel")]
    ImageCarousel(ImageCarouselTemplate),
}

impl Template {
    /// Check the action and column counts the API enforces.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Buttons(t) => check_count("buttons actions", t.actions.len(), 1, 4),
            Self::Confirm(t) => check_count("confirm actions", t.actions.len(), 2, 2),
            Self::Carousel(t) => {
                check_count("carousel columns", t.columns.len(), 1, 10)?;
                t.columns
                    .iter()
                    .try_for_each(|c| check_count("carousel column actions", c.actions.len(), 1, 3))
            }
            Self::ImageCarousel(t) => check_count("image carousel columns", t.columns.len(), 1, 10),
        }
    }
}

fn check_count(what: &str, n: usize, min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&n) {
        Ok(())
    } else if min == max {
        Err(LineError::invalid_request(format!(
            "{} must have exactly {} entries, got {}",
            what, min, n
        )))
    } else {
        Err(LineError::invalid_request(format!(
            "{} must have {} to {} entries, got {}",
            what, min, max, n
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAspectRatio {
    Rectangle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Cover,
    Contain,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonsTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<ImageAspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<Action>,
    pub actions: Vec<Action>,
}

impl ButtonsTemplate {
    pub fn new(text: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            text: text.into(),
            actions,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_image_url = Some(url.into());
        self
    }
}

impl From<ButtonsTemplate> for Template {
    fn from(t: ButtonsTemplate) -> Self {
        Self::Buttons(t)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfirmTemplate {
    pub text: String,
    pub actions: Vec<Action>,
}

impl From<ConfirmTemplate> for Template {
    fn from(t: ConfirmTemplate) -> Self {
        Self::Confirm(t)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselTemplate {
    pub columns: Vec<CarouselColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<ImageAspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

impl From<CarouselTemplate> for Template {
    fn from(t: CarouselTemplate) -> Self {
        Self::Carousel(t)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<Action>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCarouselTemplate {
    pub columns: Vec<ImageCarouselColumn>,
}

impl From<ImageCarouselTemplate> for Template {
    fn from(t: ImageCarouselTemplate) -> Self {
        Self::ImageCarousel(t)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCarouselColumn {
    pub image_url: String,
    pub action: Action,
}
