//! Audience group management.
//!
//! Upload groups take user IDs (or IFAs) either as JSON or as a newline
//! separated file; file uploads go to the data endpoint.

use crate::client::{id_file_form, with_json, Base, BasicResponse, Client};
use crate::error::LineError;
use crate::models::{
    Audience, AudienceGroup, AudienceGroupListResponse, AudienceGroupResponse, AudienceStatus,
    AuthorityLevel, AuthorityLevelResponse,
};
use crate::Result;
use reqwest::Method;
use serde::Serialize;

/// Default page size of [`Client::list_audience_groups`].
pub const DEFAULT_AUDIENCE_PAGE_SIZE: u32 = 20;

/// Largest accepted page size.
pub const MAX_AUDIENCE_PAGE_SIZE: u32 = 40;

const UPLOAD_PATH: &str = "/v2/bot/audienceGroup/upload";
const UPLOAD_BY_FILE_PATH: &str = "/v2/bot/audienceGroup/upload/byFile";

fn is_false(b: &bool) -> bool {
    !*b
}

fn to_audiences(ids: &[String]) -> Vec<Audience> {
    ids.iter().map(|id| Audience { id: id.clone() }).collect()
}

fn require_ids(ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(LineError::invalid_request("at least one audience ID is required"));
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadBody<'a> {
    description: &'a str,
    #[serde(skip_serializing_if = "is_false")]
    is_ifa_audience: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    upload_description: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    audiences: Vec<Audience>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddBody<'a> {
    audience_group_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    upload_description: Option<&'a str>,
    audiences: Vec<Audience>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClickBody<'a> {
    description: &'a str,
    request_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    click_url: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImpBody<'a> {
    description: &'a str,
    request_id: &'a str,
}

#[derive(Serialize)]
struct DescriptionBody<'a> {
    description: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorityLevelBody {
    authority_level: AuthorityLevel,
}

/// `POST /v2/bot/audienceGroup/upload`
#[must_use = "call .send() to perform the request"]
pub struct UploadAudienceGroupCall<'a> {
    client: &'a Client,
    description: String,
    is_ifa: bool,
    upload_description: Option<String>,
    audiences: Vec<String>,
}

impl UploadAudienceGroupCall<'_> {
    /// The IDs are IFAs rather than user IDs.
    pub fn ifa(mut self) -> Self {
        self.is_ifa = true;
        self
    }

    pub fn upload_description(mut self, description: impl Into<String>) -> Self {
        self.upload_description = Some(description.into());
        self
    }

    pub fn audiences(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.audiences.extend(ids.into_iter().map(Into::into));
        self
    }

    pub async fn send(self) -> Result<AudienceGroup> {
        let body = UploadBody {
            description: &self.description,
            is_ifa_audience: self.is_ifa,
            upload_description: self.upload_description.as_deref(),
            audiences: to_audiences(&self.audiences),
        };
        let request = self.client.request(Method::POST, Base::Api, UPLOAD_PATH);
        self.client.call(with_json(request, &body)?).await
    }
}

/// `POST /v2/bot/audienceGroup/upload/byFile`
#[must_use = "call .send() to perform the request"]
pub struct UploadAudienceGroupByFileCall<'a> {
    client: &'a Client,
    description: String,
    ids: Vec<String>,
    is_ifa: bool,
    upload_description: Option<String>,
}

impl UploadAudienceGroupByFileCall<'_> {
    pub fn ifa(mut self) -> Self {
        self.is_ifa = true;
        self
    }

    pub fn upload_description(mut self, description: impl Into<String>) -> Self {
        self.upload_description = Some(description.into());
        self
    }

    pub async fn send(self) -> Result<AudienceGroup> {
        require_ids(&self.ids)?;
        let mut fields = vec![("description", self.description)];
        if self.is_ifa {
            fields.push(("isIfaAudience", "true".to_string()));
        }
        if let Some(upload_description) = self.upload_description {
            fields.push(("uploadDescription", upload_description));
        }
        let form = id_file_form(fields, &self.ids)?;
        let request = self
            .client
            .request(Method::POST, Base::Data, UPLOAD_BY_FILE_PATH)
            .multipart(form);
        self.client.call(request).await
    }
}

/// `PUT /v2/bot/audienceGroup/upload`, or its `byFile` variant.
#[must_use = "call .send() to perform the request"]
pub struct AddAudiencesCall<'a> {
    client: &'a Client,
    audience_group_id: i64,
    ids: Vec<String>,
    upload_description: Option<String>,
    by_file: bool,
}

impl AddAudiencesCall<'_> {
    pub fn upload_description(mut self, description: impl Into<String>) -> Self {
        self.upload_description = Some(description.into());
        self
    }

    pub async fn send(self) -> Result<BasicResponse> {
        require_ids(&self.ids)?;
        if self.by_file {
            let mut fields = vec![("audienceGroupId", self.audience_group_id.to_string())];
            if let Some(upload_description) = self.upload_description {
                fields.push(("uploadDescription", upload_description));
            }
            let form = id_file_form(fields, &self.ids)?;
            let request = self
                .client
                .request(Method::PUT, Base::Data, UPLOAD_BY_FILE_PATH)
                .multipart(form);
            return self.client.call_basic(request).await;
        }

        let body = AddBody {
            audience_group_id: self.audience_group_id,
            upload_description: self.upload_description.as_deref(),
            audiences: to_audiences(&self.ids),
        };
        let request = self.client.request(Method::PUT, Base::Api, UPLOAD_PATH);
        self.client.call_basic(with_json(request, &body)?).await
    }
}

/// `POST /v2/bot/audienceGroup/click`
#[must_use = "call .send() to perform the request"]
pub struct ClickAudienceGroupCall<'a> {
    client: &'a Client,
    description: String,
    request_id: String,
    click_url: Option<String>,
}

impl ClickAudienceGroupCall<'_> {
    /// Only users who clicked this URL are included.
    pub fn click_url(mut self, url: impl Into<String>) -> Self {
        self.click_url = Some(url.into());
        self
    }

    pub async fn send(self) -> Result<AudienceGroup> {
        let body = ClickBody {
            description: &self.description,
            request_id: &self.request_id,
            click_url: self.click_url.as_deref(),
        };
        let request = self
            .client
            .request(Method::POST, Base::Api, "/v2/bot/audienceGroup/click");
        self.client.call(with_json(request, &body)?).await
    }
}

/// `GET /v2/bot/audienceGroup/list`
#[must_use = "call .send() to perform the request"]
pub struct ListAudienceGroupsCall<'a> {
    client: &'a Client,
    page: u32,
    size: u32,
    description: Option<String>,
    status: Option<AudienceStatus>,
    includes_external_public_groups: Option<bool>,
    create_route: Option<String>,
}

impl ListAudienceGroupsCall<'_> {
    /// Page size, clamped to 1..=40.
    pub fn size(mut self, size: u32) -> Self {
        self.size = size.clamp(1, MAX_AUDIENCE_PAGE_SIZE);
        self
    }

    /// Substring match on the group description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: AudienceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn includes_external_public_groups(mut self, include: bool) -> Self {
        self.includes_external_public_groups = Some(include);
        self
    }

    /// `OA_MANAGER`, `MESSAGING_API` or `POINT_AD`.
    pub fn create_route(mut self, route: impl Into<String>) -> Self {
        self.create_route = Some(route.into());
        self
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(description) = self.description.as_ref().filter(|d| !d.is_empty()) {
            query.push(("description", description.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(include) = self.includes_external_public_groups {
            query.push(("includesExternalPublicGroups", include.to_string()));
        }
        if let Some(route) = self.create_route.as_ref().filter(|r| !r.is_empty()) {
            query.push(("createRoute", route.clone()));
        }
        query
    }

    pub async fn send(self) -> Result<AudienceGroupListResponse> {
        if self.page < 1 {
            return Err(LineError::invalid_request("page must be at least 1"));
        }
        let request = self
            .client
            .request(Method::GET, Base::Api, "/v2/bot/audienceGroup/list")
            .query(&self.query());
        self.client.call(request).await
    }
}

impl Client {
    /// Create an upload audience group.
    pub fn upload_audience_group(&self, description: impl Into<String>) -> UploadAudienceGroupCall<'_> {
        UploadAudienceGroupCall {
            client: self,
            description: description.into(),
            is_ifa: false,
            upload_description: None,
            audiences: Vec::new(),
        }
    }

    /// Create an upload audience group from a list of IDs sent as a file.
    pub fn upload_audience_group_by_file(
        &self,
        description: impl Into<String>,
        ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> UploadAudienceGroupByFileCall<'_> {
        UploadAudienceGroupByFileCall {
            client: self,
            description: description.into(),
            ids: ids.into_iter().map(Into::into).collect(),
            is_ifa: false,
            upload_description: None,
        }
    }

    /// Add IDs to an existing upload audience group.
    pub fn add_audiences(
        &self,
        audience_group_id: i64,
        ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> AddAudiencesCall<'_> {
        AddAudiencesCall {
            client: self,
            audience_group_id,
            ids: ids.into_iter().map(Into::into).collect(),
            upload_description: None,
            by_file: false,
        }
    }

    /// Like [`Client::add_audiences`], with the IDs sent as a file.
    pub fn add_audiences_by_file(
        &self,
        audience_group_id: i64,
        ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> AddAudiencesCall<'_> {
        AddAudiencesCall {
            by_file: true,
            ..self.add_audiences(audience_group_id, ids)
        }
    }

    /// Create a group of users who clicked a URL in a sent message.
    pub fn click_audience_group(
        &self,
        description: impl Into<String>,
        request_id: impl Into<String>,
    ) -> ClickAudienceGroupCall<'_> {
        ClickAudienceGroupCall {
            client: self,
            description: description.into(),
            request_id: request_id.into(),
            click_url: None,
        }
    }

    /// Create a group of users who viewed a sent message.
    pub async fn imp_audience_group(&self, description: &str, request_id: &str) -> Result<AudienceGroup> {
        let request = self.request(Method::POST, Base::Api, "/v2/bot/audienceGroup/imp");
        self.call(with_json(request, &ImpBody { description, request_id })?)
            .await
    }

    pub async fn update_audience_group_description(
        &self,
        audience_group_id: i64,
        description: &str,
    ) -> Result<BasicResponse> {
        let path = format!("/v2/bot/audienceGroup/{}/updateDescription", audience_group_id);
        let request = self.request(Method::PUT, Base::Api, &path);
        self.call_basic(with_json(request, &DescriptionBody { description })?)
            .await
    }

    /// Reactivate an expired group.
    pub async fn activate_audience_group(&self, audience_group_id: i64) -> Result<BasicResponse> {
        let path = format!("/v2/bot/audienceGroup/{}/activate", audience_group_id);
        self.call_basic(self.request(Method::PUT, Base::Api, &path)).await
    }

    pub async fn delete_audience_group(&self, audience_group_id: i64) -> Result<BasicResponse> {
        let path = format!("/v2/bot/audienceGroup/{}", audience_group_id);
        self.call_basic(self.request(Method::DELETE, Base::Api, &path)).await
    }

    pub async fn get_audience_group(&self, audience_group_id: i64) -> Result<AudienceGroupResponse> {
        let path = format!("/v2/bot/audienceGroup/{}", audience_group_id);
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    /// List audience groups; `page` starts at 1.
    pub fn list_audience_groups(&self, page: u32) -> ListAudienceGroupsCall<'_> {
        ListAudienceGroupsCall {
            client: self,
            page,
            size: DEFAULT_AUDIENCE_PAGE_SIZE,
            description: None,
            status: None,
            includes_external_public_groups: None,
            create_route: None,
        }
    }

    pub async fn get_audience_group_authority_level(&self) -> Result<AuthorityLevelResponse> {
        self.call(self.request(
            Method::GET,
            Base::Api,
            "/v2/bot/audienceGroup/authorityLevel",
        ))
        .await
    }

    pub async fn change_audience_group_authority_level(
        &self,
        authority_level: AuthorityLevel,
    ) -> Result<BasicResponse> {
        let request = self.request(Method::PUT, Base::Api, "/v2/bot/audienceGroup/authorityLevel");
        self.call_basic(with_json(request, &AuthorityLevelBody { authority_level })?)
            .await
    }
}
