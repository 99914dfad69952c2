//! User profiles, followers, groups and rooms.

use crate::client::{segment, Base, BasicResponse, Client};
use crate::models::{GroupSummaryResponse, MemberCountResponse, MemberIdsResponse, UserIdsResponse, UserProfileResponse};
use crate::scanner::{clamp_follower_limit, IdScanner, IdSource};
use crate::Result;
use reqwest::Method;

/// `GET /v2/bot/followers/ids`
#[must_use = "call .send() or .scan()"]
pub struct GetFollowerIdsCall<'a> {
    client: &'a Client,
    start: Option<String>,
    limit: Option<u16>,
}

impl GetFollowerIdsCall<'_> {
    /// Page size. 0 means the default of 300; values above 1000 are capped.
    pub fn limit(mut self, limit: u16) -> Self {
        self.limit = Some(clamp_follower_limit(limit));
        self
    }

    /// Fetch a single page.
    pub async fn send(self) -> Result<UserIdsResponse> {
        let source = IdSource::Followers { limit: self.limit };
        let page = self.client.fetch_id_page(&source, self.start.as_deref()).await?;
        Ok(UserIdsResponse {
            user_ids: page.ids,
            next: page.next,
        })
    }

    /// Walk every page starting from this call's token.
    pub fn scan(self) -> IdScanner {
        IdScanner::new(
            self.client.clone(),
            IdSource::Followers { limit: self.limit },
            self.start,
        )
    }
}

/// `GET /v2/bot/{group|room}/{id}/members/ids`
#[must_use = "call .send() or .scan()"]
pub struct GetMemberIdsCall<'a> {
    client: &'a Client,
    source: IdSource,
    start: Option<String>,
}

impl GetMemberIdsCall<'_> {
    pub async fn send(self) -> Result<MemberIdsResponse> {
        let page = self.client.fetch_id_page(&self.source, self.start.as_deref()).await?;
        Ok(MemberIdsResponse {
            member_ids: page.ids,
            next: page.next,
        })
    }

    pub fn scan(self) -> IdScanner {
        IdScanner::new(self.client.clone(), self.source, self.start)
    }
}

impl Client {
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfileResponse> {
        let path = format!("/v2/bot/profile/{}", segment(user_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    /// IDs of users who added the bot as a friend. `start` is the
    /// continuation token of a previous page.
    pub fn get_follower_ids(&self, start: Option<&str>) -> GetFollowerIdsCall<'_> {
        GetFollowerIdsCall {
            client: self,
            start: start.map(str::to_string),
            limit: None,
        }
    }

    pub async fn get_group_summary(&self, group_id: &str) -> Result<GroupSummaryResponse> {
        let path = format!("/v2/bot/group/{}/summary", segment(group_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    pub async fn get_group_member_count(&self, group_id: &str) -> Result<MemberCountResponse> {
        let path = format!("/v2/bot/group/{}/members/count", segment(group_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    pub async fn get_group_member_profile(&self, group_id: &str, user_id: &str) -> Result<UserProfileResponse> {
        let path = format!("/v2/bot/group/{}/member/{}", segment(group_id), segment(user_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    pub fn get_group_member_ids(&self, group_id: &str, start: Option<&str>) -> GetMemberIdsCall<'_> {
        GetMemberIdsCall {
            client: self,
            source: IdSource::GroupMembers {
                group_id: group_id.to_string(),
            },
            start: start.map(str::to_string),
        }
    }

    pub async fn leave_group(&self, group_id: &str) -> Result<BasicResponse> {
        let path = format!("/v2/bot/group/{}/leave", segment(group_id));
        self.call_basic(self.request(Method::POST, Base::Api, &path)).await
    }

    pub async fn get_room_member_count(&self, room_id: &str) -> Result<MemberCountResponse> {
        let path = format!("/v2/bot/room/{}/members/count", segment(room_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    pub async fn get_room_member_profile(&self, room_id: &str, user_id: &str) -> Result<UserProfileResponse> {
        let path = format!("/v2/bot/room/{}/member/{}", segment(room_id), segment(user_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    pub fn get_room_member_ids(&self, room_id: &str, start: Option<&str>) -> GetMemberIdsCall<'_> {
        GetMemberIdsCall {
            client: self,
            source: IdSource::RoomMembers {
                room_id: room_id.to_string(),
            },
            start: start.map(str::to_string),
        }
    }

    pub async fn leave_room(&self, room_id: &str) -> Result<BasicResponse> {
        let path = format!("/v2/bot/room/{}/leave", segment(room_id));
        self.call_basic(self.request(Method::POST, Base::Api, &path)).await
    }
}
