//! Wire types for requests and responses.

pub mod action;
pub mod audience;
pub mod flex;
pub mod imagemap;
pub mod insight;
pub mod liff;
pub mod message;
pub mod oauth;
pub mod recipient;
pub mod response;
pub mod richmenu;
pub mod template;

pub use action::{Action, DatetimePickerMode, InputOption, PostbackAction, UriAction};
pub use audience::{
    Audience, AudienceGroup, AudienceGroupListResponse, AudienceGroupResponse, AudienceStatus,
    AuthorityLevel, AuthorityLevelResponse,
};
pub use flex::{FlexComponent, FlexContainer};
pub use imagemap::{ImagemapAction, ImagemapArea, ImagemapBaseSize, ImagemapVideo};
pub use insight::{FollowersInsight, FriendDemographicsInsight, MessageDeliveryInsight};
pub use liff::{LiffApp, LiffAppsResponse, LiffIdResponse};
pub use message::{
    find_dollar_sign_indexes, Emoji, Message, QuickReply, QuickReplyItem, Sender, SendingMessage,
    TextMessage,
};
pub use oauth::{AccessTokenResponse, ValidKeyIdsResponse, VerifiedAccessTokenResponse};
pub use recipient::{Age, AppType, DemographicFilter, Gender, NarrowcastLimit, Recipient};
pub use response::*;
pub use richmenu::{
    RichMenu, RichMenuAlias, RichMenuAliasListResponse, RichMenuIdResponse, RichMenuListResponse,
    RichMenuResponse,
};
pub use template::Template;
