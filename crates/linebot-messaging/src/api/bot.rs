//! Bot information, account linking and webhook endpoint settings.

use crate::client::{segment, with_json, Base, BasicResponse, Client};
use crate::models::{BotInfoResponse, LinkTokenResponse, TestWebhookResponse, WebhookEndpointInfo};
use crate::Result;
use reqwest::Method;
use serde::Serialize;

const WEBHOOK_ENDPOINT_PATH: &str = "/v2/bot/channel/webhook/endpoint";

#[derive(Serialize)]
struct EndpointBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<&'a str>,
}

impl Client {
    pub async fn get_bot_info(&self) -> Result<BotInfoResponse> {
        self.call(self.request(Method::GET, Base::Api, "/v2/bot/info"))
            .await
    }

    /// Issue a link token for account linking.
    pub async fn issue_link_token(&self, user_id: &str) -> Result<LinkTokenResponse> {
        let path = format!("/v2/bot/user/{}/linkToken", segment(user_id));
        self.call(self.request(Method::POST, Base::Api, &path)).await
    }

    pub async fn get_webhook_endpoint_info(&self) -> Result<WebhookEndpointInfo> {
        self.call(self.request(Method::GET, Base::Api, WEBHOOK_ENDPOINT_PATH))
            .await
    }

    pub async fn set_webhook_endpoint_url(&self, endpoint: &str) -> Result<BasicResponse> {
        let body = EndpointBody {
            endpoint: Some(endpoint),
        };
        let request = self.request(Method::PUT, Base::Api, WEBHOOK_ENDPOINT_PATH);
        self.call_basic(with_json(request, &body)?).await
    }

    /// Ask the platform to send a test event. Without `endpoint` the
    /// configured webhook URL is used.
    pub async fn test_webhook(&self, endpoint: Option<&str>) -> Result<TestWebhookResponse> {
        let request = self.request(Method::POST, Base::Api, "/v2/bot/channel/webhook/test");
        self.call(with_json(request, &EndpointBody { endpoint })?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn test_set_webhook_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v2/bot/channel/webhook/endpoint"))
            .and(body_json(json!({"endpoint": "https://example.com/callback"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .set_webhook_endpoint_url("https://example.com/callback")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_webhook_test_without_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/channel/webhook/test"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "timestamp": "2020-09-30T05:38:20.031Z",
                "statusCode": 200,
                "reason": "OK",
                "detail": "200"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let res = client.test_webhook(None).await.unwrap();
        assert!(res.success);
        assert_eq!(res.status_code, 200);
    }

    #[tokio::test]
    async fn test_link_token_and_bot_info() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/user/U1/linkToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"linkToken": "NMZTNuVrPTqlr2IF8Bnymkb7rXfYv5EY"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/bot/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "Ub9952f8",
                "basicId": "@216ru...",
                "displayName": "Example name",
                "chatMode": "bot",
                "markAsReadMode": "auto"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let token = client.issue_link_token("U1").await.unwrap();
        assert_eq!(token.link_token, "NMZTNuVrPTqlr2IF8Bnymkb7rXfYv5EY");
        let info = client.get_bot_info().await.unwrap();
        assert_eq!(info.display_name, "Example name");
    }

    #[tokio::test]
    async fn test_webhook_endpoint_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/bot/channel/webhook/endpoint"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "endpoint": "https://example.com/test",
                "active": true
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let info = client.get_webhook_endpoint_info().await.unwrap();
        assert!(info.active);
    }
}
