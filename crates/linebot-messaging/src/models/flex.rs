//! Flex message containers and components.
//!
//! A flex message is a tree: a container (`bubble` or `carousel`) holding
//! blocks of components, where `box` components nest further components.
//! Every node is tagged by `type` on the wire.
//!
//! Containers designed in the Flex Message Simulator can be loaded as-is
//! with [`from_json`].

use super::action::Action;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Parse a raw flex container, e.g. JSON exported from the simulator.
pub fn from_json(raw: &[u8]) -> Result<FlexContainer> {
    Ok(serde_json::from_slice(raw)?)
}

/// Named image aspect ratios. Any `"W:H"` string is accepted on the wire.
pub mod aspect_ratio {
    pub const R1TO1: &str = "1:1";
    pub const R1_51TO1: &str = "1.51:1";
    pub const R1_91TO1: &str = "1.91:1";
    pub const R4TO3: &str = "4:3";
    pub const R16TO9: &str = "16:9";
    pub const R20TO13: &str = "20:13";
    pub const R2TO1: &str = "2:1";
    pub const R3TO1: &str = "3:1";
    pub const R3TO4: &str = "3:4";
    pub const R9TO16: &str = "9:16";
    pub const R1TO2: &str = "1:2";
    pub const R1TO3: &str = "1:3";
}

/// Top-level flex container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexContainer {
    Bubble(BubbleContainer),
    Carousel(CarouselContainer),
}

impl From<BubbleContainer> for FlexContainer {
    fn from(b: BubbleContainer) -> Self {
        Self::Bubble(b)
    }
}

impl From<CarouselContainer> for FlexContainer {
    fn from(c: CarouselContainer) -> Self {
        Self::Carousel(c)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BubbleContainer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<BubbleSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<BubbleDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "tagged_box")]
    pub header: Option<BoxComponent>,
    /// Usually an image or a box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<FlexComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "tagged_box")]
    pub body: Option<BoxComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "tagged_box")]
    pub footer: Option<BoxComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<BubbleStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

/// A horizontally scrolling row of bubbles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselContainer {
    #[serde(with = "tagged_bubbles")]
    pub contents: Vec<BubbleContainer>,
}

// Bubble blocks and carousel entries are typed as concrete structs but
// still carry their `type` tag on the wire.
mod tagged_box {
    use super::BoxComponent;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Ref<'a> {
        Box(&'a BoxComponent),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Owned {
        Box(BoxComponent),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<BoxComponent>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match value {
            Some(b) => serializer.serialize_some(&Ref::Box(b)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<BoxComponent>, D::Error> {
        Ok(Option::<Owned>::deserialize(deserializer)?.map(|Owned::Box(b)| b))
    }
}

mod tagged_bubbles {
    use super::BubbleContainer;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Ref<'a> {
        Bubble(&'a BubbleContainer),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Owned {
        Bubble(BubbleContainer),
    }

    pub fn serialize<S: Serializer>(
        bubbles: &[BubbleContainer],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(bubbles.iter().map(Ref::Bubble))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Vec<BubbleContainer>, D::Error> {
        let bubbles = Vec::<Owned>::deserialize(deserializer)?;
        Ok(bubbles.into_iter().map(|Owned::Bubble(b)| b).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleSize {
    Nano,
    Micro,
    Kilo,
    Mega,
    Giga,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<BlockStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<BlockStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BlockStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<BlockStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator_color: Option<String>,
}

/// Flex component, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexComponent {
    Box(BoxComponent),
    Button(ButtonComponent),
    Filler(FillerComponent),
    Icon(IconComponent),
    Image(ImageComponent),
    Separator(SeparatorComponent),
    Spacer(SpacerComponent),
    Text(TextComponent),
}

macro_rules! component_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FlexComponent {
                fn from(c: $ty) -> Self {
                    Self::$variant(c)
                }
            }
        )*
    };
}

component_from! {
    Box => BoxComponent,
    Button => ButtonComponent,
    Filler => FillerComponent,
    Icon => IconComponent,
    Image => ImageComponent,
    Separator => SeparatorComponent,
    Spacer => SpacerComponent,
    Text => TextComponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxLayout {
    Horizontal,
    Vertical,
    Baseline,
}

/// Component sizes. `Full` applies to images only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexSize {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
    #[serde(rename = "3xl")]
    X3l,
    #[serde(rename = "4xl")]
    X4l,
    #[serde(rename = "5xl")]
    X5l,
    Full,
}

/// Spacing between children of a box, and component margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexSpacing {
    None,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexAlign {
    Start,
    End,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexGravity {
    Top,
    Bottom,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonHeight {
    Sm,
    Md,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Link,
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    Cover,
    Fit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxComponent {
    pub layout: BoxLayout,
    pub contents: Vec<FlexComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<FlexSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<FlexSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_all: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl BoxComponent {
    pub fn new(layout: BoxLayout, contents: Vec<FlexComponent>) -> Self {
        Self {
            layout,
            contents,
            flex: None,
            spacing: None,
            margin: None,
            padding_all: None,
            background_color: None,
            corner_radius: None,
            action: None,
        }
    }

    pub fn vertical(contents: Vec<FlexComponent>) -> Self {
        Self::new(BoxLayout::Vertical, contents)
    }

    pub fn horizontal(contents: Vec<FlexComponent>) -> Self {
        Self::new(BoxLayout::Horizontal, contents)
    }

    pub fn with_spacing(mut self, spacing: FlexSpacing) -> Self {
        self.spacing = Some(spacing);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonComponent {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<FlexSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<ButtonHeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<FlexGravity>,
}

impl ButtonComponent {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            flex: None,
            margin: None,
            height: None,
            style: None,
            color: None,
            gravity: None,
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconComponent {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<FlexSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<FlexSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageComponent {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<FlexSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<FlexAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<FlexGravity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<FlexSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_mode: Option<AspectMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl ImageComponent {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: FlexSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_aspect(mut self, ratio: &str, mode: AspectMode) -> Self {
        self.aspect_ratio = Some(ratio.to_string());
        self.aspect_mode = Some(mode);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<FlexSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacerComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<FlexSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextComponent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<FlexSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<FlexSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<FlexAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<FlexGravity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<TextWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
}

impl TextComponent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = Some(TextWeight::Bold);
        self
    }

    pub fn with_size(mut self, size: FlexSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SIMULATOR_BUBBLE: &str = r##"{
      "type": "bubble",
      "hero": {
        "type": "image",
        "url": "https://scdn.line-apps.com/n/channel_devcenter/img/fx/01_1_cafe.png",
        "size": "full",
        "aspectRatio": "20:13",
        "aspectMode": "cover",
        "action": {"type": "uri", "uri": "http://linecorp.com/"}
      },
      "body": {
        "type": "box",
        "layout": "vertical",
        "contents": [
          {"type": "text", "text": "Brown Cafe", "weight": "bold", "size": "xl"},
          {
            "type": "box",
            "layout": "baseline",
            "margin": "md",
            "contents": [
              {"type": "icon", "size": "sm", "url": "https://example.com/star.png"},
              {"type": "text", "text": "4.0", "size": "sm", "color": "#999999", "margin": "md", "flex": 0}
            ]
          },
          {"type": "separator", "margin": "lg"},
          {"type": "spacer", "size": "3xl"},
          {"type": "filler"}
        ]
      },
      "footer": {
        "type": "box",
        "layout": "vertical",
        "spacing": "sm",
        "contents": [
          {"type": "button", "style": "link", "height": "sm",
           "action": {"type": "uri", "label": "CALL", "uri": "https://linecorp.com"}}
        ],
        "flex": 0
      },
      "styles": {"footer": {"separator": true, "separatorColor": "#DDDDDD"}}
    }"##;

    #[test]
    fn test_from_json_simulator_bubble() {
        let container = from_json(SIMULATOR_BUBBLE.as_bytes()).unwrap();
        let bubble = match &container {
            FlexContainer::Bubble(b) => b,
            other => panic!("unexpected container {:?}", other),
        };

        match bubble.hero.as_ref().unwrap() {
            FlexComponent::Image(image) => {
                assert_eq!(image.size, Some(FlexSize::Full));
                assert_eq!(image.aspect_ratio.as_deref(), Some(aspect_ratio::R20TO13));
                assert_eq!(image.aspect_mode, Some(AspectMode::Cover));
            }
            other => panic!("unexpected hero {:?}", other),
        }

        let body = bubble.body.as_ref().unwrap();
        assert_eq!(body.contents.len(), 5);
        match &body.contents[1] {
            FlexComponent::Box(inner) => {
                assert_eq!(inner.layout, BoxLayout::Baseline);
                assert_eq!(inner.margin, Some(FlexSpacing::Md));
                assert!(matches!(inner.contents[0], FlexComponent::Icon(_)));
            }
            other => panic!("unexpected component {:?}", other),
        }
        assert!(matches!(
            body.contents[3],
            FlexComponent::Spacer(SpacerComponent { size: Some(FlexSize::X3l) })
        ));

        let footer_style = bubble.styles.as_ref().unwrap().footer.as_ref().unwrap();
        assert_eq!(footer_style.separator, Some(true));

        // Re-encoding keeps the tree intact.
        let reencoded = serde_json::to_value(&container).unwrap();
        let original: serde_json::Value = serde_json::from_str(SIMULATOR_BUBBLE).unwrap();
        assert_eq!(reencoded, original);
    }

    #[test]
    fn test_build_carousel() {
        let bubble = BubbleContainer {
            body: Some(BoxComponent::vertical(vec![
                TextComponent::new("hello").bold().into(),
                ButtonComponent::new(Action::message("Say hi", "hi"))
                    .with_style(ButtonStyle::Primary)
                    .into(),
            ])),
            ..Default::default()
        };
        let container: FlexContainer = CarouselContainer {
            contents: vec![bubble],
        }
        .into();

        assert_eq!(
            serde_json::to_value(&container).unwrap(),
            json!({
                "type": "carousel",
                "contents": [{
                    "type": "bubble",
                    "body": {
                        "type": "box",
                        "layout": "vertical",
                        "contents": [
                            {"type": "text", "text": "hello", "weight": "bold"},
                            {"type": "button", "style": "primary",
                             "action": {"type": "message", "label": "Say hi", "text": "hi"}}
                        ]
                    }
                }]
            })
        );
    }

    #[test]
    fn test_unknown_component_type_is_rejected() {
        let raw = br#"{"type":"bubble","body":{"type":"box","layout":"vertical","contents":[{"type":"video"}]}}"#;
        assert!(from_json(raw).is_err());
        assert!(from_json(br#"{"type":"grid"}"#).is_err());
    }
}
