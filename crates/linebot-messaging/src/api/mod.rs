//! Endpoint operations, grouped by API area. Each module adds methods to
//! [`Client`](crate::Client).

pub mod audience;
pub mod bot;
pub mod insight;
pub mod liff;
pub mod message;
pub mod oauth;
pub mod profile;
pub mod richmenu;

pub use audience::{
    AddAudiencesCall, ClickAudienceGroupCall, ListAudienceGroupsCall, UploadAudienceGroupByFileCall,
    UploadAudienceGroupCall,
};
pub use message::{
    BroadcastMessageCall, MessageKind, MulticastCall, NarrowcastCall, PushMessageCall,
    ReplyMessageCall,
};
pub use profile::{GetFollowerIdsCall, GetMemberIdsCall};
