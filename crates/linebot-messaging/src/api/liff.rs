//! LIFF app management.

use crate::client::{segment, with_json, Base, BasicResponse, Client};
use crate::models::{LiffApp, LiffAppsResponse, LiffIdResponse};
use crate::Result;
use reqwest::Method;

impl Client {
    pub async fn get_liff_apps(&self) -> Result<LiffAppsResponse> {
        self.call(self.request(Method::GET, Base::Api, "/liff/v1/apps"))
            .await
    }

    /// Register an app; the response carries the assigned LIFF ID.
    pub async fn add_liff_app(&self, app: &LiffApp) -> Result<LiffIdResponse> {
        let request = self.request(Method::POST, Base::Api, "/liff/v1/apps");
        self.call(with_json(request, &without_id(app))?).await
    }

    pub async fn update_liff_app(&self, liff_id: &str, app: &LiffApp) -> Result<BasicResponse> {
        let path = format!("/liff/v1/apps/{}", segment(liff_id));
        let request = self.request(Method::PUT, Base::Api, &path);
        self.call_basic(with_json(request, &without_id(app))?).await
    }

    pub async fn delete_liff_app(&self, liff_id: &str) -> Result<BasicResponse> {
        let path = format!("/liff/v1/apps/{}", segment(liff_id));
        self.call_basic(self.request(Method::DELETE, Base::Api, &path)).await
    }
}

// The ID travels in the path, never in the body.
fn without_id(app: &LiffApp) -> LiffApp {
    LiffApp {
        liff_id: None,
        ..app.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::liff::{LiffScope, LiffViewType};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> Client {
        Client::new("secret", "token")
            .unwrap()
            .with_endpoint_base(server.uri())
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_liff_app() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/liff/v1/apps"))
            .and(body_json(json!({
                "view": {"type": "full", "url": "https://example.com/app"},
                "scope": ["profile", "chat_message.write"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"liffId": "1234-abcd"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = LiffApp::new(LiffViewType::Full, "https://example.com/app");
        app.scope = vec![LiffScope::Profile, LiffScope::ChatMessageWrite];

        let client = client_for(&server).await;
        let res = client.add_liff_app(&app).await.unwrap();
        assert_eq!(res.liff_id, "1234-abcd");
    }

    #[tokio::test]
    async fn test_update_uses_put_and_strips_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/liff/v1/apps/1234-abcd"))
            .and(body_json(json!({"view": {"type": "tall", "url": "https://example.com/v2"}})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = LiffApp::new(LiffViewType::Tall, "https://example.com/v2");
        app.liff_id = Some("1234-abcd".to_string());

        let client = client_for(&server).await;
        client.update_liff_app("1234-abcd", &app).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/liff/v1/apps"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "apps": [{"liffId": "a", "view": {"type": "compact", "url": "https://example.com"}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/liff/v1/apps/a"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let apps = client.get_liff_apps().await.unwrap();
        assert_eq!(apps.apps[0].liff_id.as_deref(), Some("a"));
        client.delete_liff_app("a").await.unwrap();
    }
}
