//! Rich menus, per-user links, images and aliases.

use crate::client::{segment, with_json, Base, BasicResponse, Client, MessageContent};
use crate::error::LineError;
use crate::models::{
    RichMenu, RichMenuAlias, RichMenuAliasListResponse, RichMenuIdResponse, RichMenuListResponse,
    RichMenuResponse,
};
use crate::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkLinkBody<'a> {
    rich_menu_id: &'a str,
    user_ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkUnlinkBody<'a> {
    user_ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AliasUpdateBody<'a> {
    rich_menu_id: &'a str,
}

impl Client {
    pub async fn create_rich_menu(&self, menu: &RichMenu) -> Result<RichMenuIdResponse> {
        let request = self.request(Method::POST, Base::Api, "/v2/bot/richmenu");
        self.call(with_json(request, menu)?).await
    }

    /// Check a menu definition without creating it.
    pub async fn validate_rich_menu(&self, menu: &RichMenu) -> Result<BasicResponse> {
        let request = self.request(Method::POST, Base::Api, "/v2/bot/richmenu/validate");
        self.call_basic(with_json(request, menu)?).await
    }

    pub async fn get_rich_menu(&self, rich_menu_id: &str) -> Result<RichMenuResponse> {
        let path = format!("/v2/bot/richmenu/{}", segment(rich_menu_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    pub async fn delete_rich_menu(&self, rich_menu_id: &str) -> Result<BasicResponse> {
        let path = format!("/v2/bot/richmenu/{}", segment(rich_menu_id));
        self.call_basic(self.request(Method::DELETE, Base::Api, &path)).await
    }

    pub async fn get_rich_menu_list(&self) -> Result<RichMenuListResponse> {
        self.call(self.request(Method::GET, Base::Api, "/v2/bot/richmenu/list"))
            .await
    }

    /// ID of the menu linked to a user.
    pub async fn get_user_rich_menu(&self, user_id: &str) -> Result<RichMenuIdResponse> {
        let path = format!("/v2/bot/user/{}/richmenu", segment(user_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    pub async fn link_user_rich_menu(&self, user_id: &str, rich_menu_id: &str) -> Result<BasicResponse> {
        let path = format!(
            "/v2/bot/user/{}/richmenu/{}",
            segment(user_id),
            segment(rich_menu_id)
        );
        self.call_basic(self.request(Method::POST, Base::Api, &path)).await
    }

    pub async fn unlink_user_rich_menu(&self, user_id: &str) -> Result<BasicResponse> {
        let path = format!("/v2/bot/user/{}/richmenu", segment(user_id));
        self.call_basic(self.request(Method::DELETE, Base::Api, &path)).await
    }

    pub async fn set_default_rich_menu(&self, rich_menu_id: &str) -> Result<BasicResponse> {
        let path = format!("/v2/bot/user/all/richmenu/{}", segment(rich_menu_id));
        self.call_basic(self.request(Method::POST, Base::Api, &path)).await
    }

    pub async fn get_default_rich_menu(&self) -> Result<RichMenuIdResponse> {
        self.call(self.request(Method::GET, Base::Api, "/v2/bot/user/all/richmenu"))
            .await
    }

    pub async fn cancel_default_rich_menu(&self) -> Result<BasicResponse> {
        self.call_basic(self.request(Method::DELETE, Base::Api, "/v2/bot/user/all/richmenu"))
            .await
    }

    /// Link one menu to many users.
    pub async fn bulk_link_rich_menu(&self, rich_menu_id: &str, user_ids: &[String]) -> Result<BasicResponse> {
        if user_ids.is_empty() {
            return Err(LineError::invalid_request("at least one user ID is required"));
        }
        let body = BulkLinkBody { rich_menu_id, user_ids };
        let request = self.request(Method::POST, Base::Api, "/v2/bot/richmenu/bulk/link");
        self.call_basic(with_json(request, &body)?).await
    }

    pub async fn bulk_unlink_rich_menu(&self, user_ids: &[String]) -> Result<BasicResponse> {
        if user_ids.is_empty() {
            return Err(LineError::invalid_request("at least one user ID is required"));
        }
        let body = BulkUnlinkBody { user_ids };
        let request = self.request(Method::POST, Base::Api, "/v2/bot/richmenu/bulk/unlink");
        self.call_basic(with_json(request, &body)?).await
    }

    /// Upload the menu image (JPEG or PNG).
    pub async fn upload_rich_menu_image(
        &self,
        rich_menu_id: &str,
        content_type: &str,
        image: impl Into<reqwest::Body>,
    ) -> Result<BasicResponse> {
        let path = format!("/v2/bot/richmenu/{}/content", segment(rich_menu_id));
        let request = self
            .request(Method::POST, Base::Data, &path)
            .header(CONTENT_TYPE, content_type)
            .body(image);
        self.call_basic(request).await
    }

    /// Upload the menu image from a file, guessing the content type from its
    /// extension.
    pub async fn upload_rich_menu_image_file(
        &self,
        rich_menu_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<BasicResponse> {
        let path = path.as_ref();
        let content_type = mime_guess::from_path(path)
            .first()
            .filter(|m| m.type_() == mime::IMAGE)
            .ok_or_else(|| {
                LineError::invalid_request(format!(
                    "cannot determine image type of {}",
                    path.display()
                ))
            })?;
        let image = tokio::fs::read(path).await?;
        debug!("Uploading {} ({} bytes, {})", path.display(), image.len(), content_type);
        self.upload_rich_menu_image(rich_menu_id, content_type.as_ref(), image)
            .await
    }

    pub async fn download_rich_menu_image(&self, rich_menu_id: &str) -> Result<MessageContent> {
        let path = format!("/v2/bot/richmenu/{}/content", segment(rich_menu_id));
        self.call_content(self.request(Method::GET, Base::Data, &path))
            .await
    }

    pub async fn create_rich_menu_alias(&self, alias: &RichMenuAlias) -> Result<BasicResponse> {
        let request = self.request(Method::POST, Base::Api, "/v2/bot/richmenu/alias");
        self.call_basic(with_json(request, alias)?).await
    }

    /// Point an existing alias at another menu.
    pub async fn update_rich_menu_alias(&self, alias_id: &str, rich_menu_id: &str) -> Result<BasicResponse> {
        let path = format!("/v2/bot/richmenu/alias/{}", segment(alias_id));
        let request = self.request(Method::POST, Base::Api, &path);
        self.call_basic(with_json(request, &AliasUpdateBody { rich_menu_id })?)
            .await
    }

    pub async fn delete_rich_menu_alias(&self, alias_id: &str) -> Result<BasicResponse> {
        let path = format!("/v2/bot/richmenu/alias/{}", segment(alias_id));
        self.call_basic(self.request(Method::DELETE, Base::Api, &path)).await
    }

    pub async fn get_rich_menu_alias(&self, alias_id: &str) -> Result<RichMenuAlias> {
        let path = format!("/v2/bot/richmenu/alias/{}", segment(alias_id));
        self.call(self.request(Method::GET, Base::Api, &path)).await
    }

    pub async fn get_rich_menu_alias_list(&self) -> Result<RichMenuAliasListResponse> {
        self.call(self.request(Method::GET, Base::Api, "/v2/bot/richmenu/alias/list"))
            .await
    }
}
