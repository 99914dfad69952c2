//! HTTP client for the LINE Messaging API.
//!
//! [`Client`] owns the credentials and endpoint bases and provides the
//! request plumbing every endpoint goes through: bearer auth, user agent,
//! JSON/form/multipart bodies, and mapping of non-2xx responses to
//! [`ApiError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use linebot_messaging::{Client, SendingMessage};
//!
//! let client = Client::new("channel-secret", "channel-access-token")?;
//! client
//!     .push_message("U4af4980629...", vec![SendingMessage::text("hello")])
//!     .send()
//!     .await?;
//! ```

use crate::error::{ApiError, ErrorResponse, LineError};
use crate::Result;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use linebot_core::config::{Config, DEFAULT_API_ENDPOINT, DEFAULT_DATA_ENDPOINT};
use linebot_core::env;
use linebot_core::SecretString;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE, RETRY_AFTER, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Content type sent with JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Header carrying the request ID assigned by the platform.
pub const REQUEST_ID_HEADER: &str = "x-line-request-id";

/// Header carrying the accepted request ID when a retry key was reused.
pub const ACCEPTED_REQUEST_ID_HEADER: &str = "x-line-accepted-request-id";

/// Header used for idempotent retries of send operations.
pub const RETRY_KEY_HEADER: &str = "X-Line-Retry-Key";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which host an endpoint lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Base {
    /// `api.line.me`
    Api,
    /// `api-data.line.me`, used for binary content.
    Data,
}

/// LINE Messaging API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    channel_secret: SecretString,
    channel_access_token: SecretString,
    endpoint_base: String,
    data_endpoint_base: String,
    user_agent: String,
    timeout: Duration,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint_base", &self.endpoint_base)
            .field("data_endpoint_base", &self.data_endpoint_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Empty success response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicResponse {
    /// Value of `x-line-request-id`.
    pub request_id: Option<String>,

    /// Value of `x-line-accepted-request-id`, set when a retry key matched
    /// an already accepted request.
    pub accepted_request_id: Option<String>,
}

impl BasicResponse {
    fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            request_id: header_string(headers, REQUEST_ID_HEADER),
            accepted_request_id: header_string(headers, ACCEPTED_REQUEST_ID_HEADER),
        }
    }
}

/// Downloaded binary content.
#[derive(Debug, Clone)]
pub struct MessageContent {
    /// `Content-Type` of the payload.
    pub content_type: Option<String>,

    /// `Content-Length`, when the server sent one.
    pub content_length: Option<u64>,

    /// The payload.
    pub body: Bytes,
}

/// Streaming variant of [`MessageContent`].
pub struct MessageContentStream {
    /// `Content-Type` of the payload.
    pub content_type: Option<String>,

    /// `Content-Length`, when the server sent one.
    pub content_length: Option<u64>,

    /// Body chunks.
    pub body: BoxStream<'static, Result<Bytes>>,
}

impl Client {
    /// Create a client from a channel secret and channel access token.
    pub fn new(
        channel_secret: impl Into<String>,
        channel_access_token: impl Into<String>,
    ) -> Result<Self> {
        let channel_secret = SecretString::new(channel_secret);
        if channel_secret.is_empty() {
            return Err(LineError::config("missing channel secret"));
        }
        let channel_access_token = SecretString::new(channel_access_token);
        if channel_access_token.is_empty() {
            return Err(LineError::config("missing channel access token"));
        }
        Self::build(channel_secret, channel_access_token)
    }

    /// Create a client without channel credentials.
    ///
    /// Only the channel access token endpoints (`issue_access_token`,
    /// `revoke_access_token`, the v2.1 variants, ...) work with it; they
    /// carry their credentials in the request body. Anything else is
    /// rejected by the platform with 401.
    pub fn unauthenticated() -> Result<Self> {
        Self::build(SecretString::default(), SecretString::default())
    }

    fn build(channel_secret: SecretString, channel_access_token: SecretString) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| LineError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            channel_secret,
            channel_access_token,
            endpoint_base: DEFAULT_API_ENDPOINT.to_string(),
            data_endpoint_base: DEFAULT_DATA_ENDPOINT.to_string(),
            user_agent: format!("linebot-rs/{}", env!("CARGO_PKG_VERSION")),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create a client from `LINE_CHANNEL_SECRET` and
    /// `LINE_CHANNEL_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let secret = env::get_var(env::vars::LINE_CHANNEL_SECRET).ok_or_else(|| {
            LineError::config("LINE_CHANNEL_SECRET environment variable not set")
        })?;
        let token = env::get_var(env::vars::LINE_CHANNEL_ACCESS_TOKEN).ok_or_else(|| {
            LineError::config("LINE_CHANNEL_ACCESS_TOKEN environment variable not set")
        })?;
        Self::new(secret, token)
    }

    /// Create a client from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.channel.channel_secret.expose_secret(),
            config.channel.channel_access_token.expose_secret(),
        )?
        .with_endpoint_base(&config.api.endpoint)?
        .with_data_endpoint_base(&config.api.data_endpoint)
        .map(|c| c.with_timeout(Duration::from_secs(config.api.timeout_secs)))
    }

    /// Set the API endpoint base.
    pub fn with_endpoint_base(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.endpoint_base = normalize_base(url.as_ref())?;
        Ok(self)
    }

    /// Set the data API endpoint base.
    pub fn with_data_endpoint_base(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.data_endpoint_base = normalize_base(url.as_ref())?;
        Ok(self)
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a caller-provided HTTP client (proxies, custom TLS, ...).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Channel secret, e.g. to build a webhook handler.
    pub fn channel_secret(&self) -> &SecretString {
        &self.channel_secret
    }

    /// API endpoint base.
    pub fn endpoint_base(&self) -> &str {
        &self.endpoint_base
    }

    /// Data API endpoint base.
    pub fn data_endpoint_base(&self) -> &str {
        &self.data_endpoint_base
    }

    pub(crate) fn url(&self, base: Base, path: &str) -> String {
        let root = match base {
            Base::Api => &self.endpoint_base,
            Base::Data => &self.data_endpoint_base,
        };
        format!("{}{}", root, path)
    }

    /// Build an authenticated request.
    pub(crate) fn request(&self, method: Method, base: Base, path: &str) -> RequestBuilder {
        debug!("LINE API {} {}", method, path);
        self.http
            .request(method, self.url(base, path))
            .bearer_auth(self.channel_access_token.expose_secret())
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
    }

    /// Build a request without the bearer token (OAuth endpoints).
    pub(crate) fn anonymous_request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("LINE API {} {} (unauthenticated)", method, path);
        self.http
            .request(method, self.url(Base::Api, path))
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
    }

    /// Send a request and map non-2xx statuses to [`LineError::Api`].
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        let request_id = header_string(response.headers(), REQUEST_ID_HEADER);
        debug!(
            "LINE API response {} (request id: {})",
            status.as_u16(),
            request_id.as_deref().unwrap_or("-")
        );

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read error response body: {}", e);
                Bytes::new()
            }
        };
        let error = ApiError {
            status: status.as_u16(),
            response: serde_json::from_slice::<ErrorResponse>(&body).ok(),
            request_id,
            retry_after,
        };
        warn!("{}", error);
        Err(LineError::Api(error))
    }

    /// Send and decode a JSON response body.
    pub(crate) async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.execute(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send and discard the (empty) response body.
    pub(crate) async fn call_basic(&self, request: RequestBuilder) -> Result<BasicResponse> {
        let response = self.execute(request).await?;
        Ok(BasicResponse::from_headers(response.headers()))
    }

    /// Send and buffer a binary response body.
    pub(crate) async fn call_content(&self, request: RequestBuilder) -> Result<MessageContent> {
        let response = self.execute(request).await?;
        let (content_type, content_length) = content_meta(response.headers());
        let body = response.bytes().await?;
        Ok(MessageContent {
            content_type,
            content_length,
            body,
        })
    }

    /// Send and stream a binary response body.
    pub(crate) async fn call_content_stream(
        &self,
        request: RequestBuilder,
    ) -> Result<MessageContentStream> {
        let response = self.execute(request).await?;
        let (content_type, content_length) = content_meta(response.headers());
        let body = response.bytes_stream().map_err(LineError::from).boxed();
        Ok(MessageContentStream {
            content_type,
            content_length,
            body,
        })
    }

    /// `GET` an arbitrary API path. The escape hatch for endpoints without a
    /// typed wrapper.
    pub async fn get_raw(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let request = self.request(Method::GET, Base::Api, path).query(query);
        self.execute(request).await
    }

    /// `POST` a raw JSON body to an arbitrary API path.
    pub async fn post_raw(&self, path: &str, body: impl Into<reqwest::Body>) -> Result<Response> {
        let request = self
            .request(Method::POST, Base::Api, path)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.execute(request).await
    }

    /// `PUT` a raw JSON body to an arbitrary API path.
    pub async fn put_raw(&self, path: &str, body: impl Into<reqwest::Body>) -> Result<Response> {
        let request = self
            .request(Method::PUT, Base::Api, path)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.execute(request).await
    }

    /// `DELETE` an arbitrary API path.
    pub async fn delete_raw(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::DELETE, Base::Api, path);
        self.execute(request).await
    }
}

/// Attach a JSON body with the charset-qualified content type.
pub(crate) fn with_json<B: Serialize + ?Sized>(
    request: RequestBuilder,
    body: &B,
) -> Result<RequestBuilder> {
    let bytes = serde_json::to_vec(body)?;
    Ok(request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(bytes))
}

/// Attach an optional retry key.
pub(crate) fn with_retry_key(request: RequestBuilder, retry_key: Option<&str>) -> RequestBuilder {
    match retry_key {
        Some(key) => request.header(RETRY_KEY_HEADER, key),
        None => request,
    }
}

/// Build a multipart form whose `file` part is the newline-joined IDs.
pub(crate) fn id_file_form(fields: Vec<(&'static str, String)>, ids: &[String]) -> Result<Form> {
    let file_name = format!(
        "{}.txt",
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );
    let part = Part::text(ids.join("\n"))
        .file_name(file_name)
        .mime_str(mime::TEXT_PLAIN.as_ref())?;

    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));
    Ok(form.part("file", part))
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn normalize_base(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(url.trim_end_matches('/').to_string()),
        other => Err(LineError::config(format!(
            "unsupported endpoint scheme '{}'",
            other
        ))),
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

fn content_meta(headers: &HeaderMap) -> (Option<String>, Option<u64>) {
    let content_type = header_string(headers, CONTENT_TYPE.as_str());
    let content_length = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    (content_type, content_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> Client {
        Client::new("secret", "token")
            .unwrap()
            .with_endpoint_base(server.uri())
            .unwrap()
            .with_data_endpoint_base(server.uri())
            .unwrap()
    }

    #[test]
    fn test_new_requires_credentials() {
        let err = Client::new("", "token").unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: missing channel secret");

        let err = Client::new("secret", "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: missing channel access token"
        );
    }

    #[test]
    fn test_endpoint_defaults_and_override() {
        let client = Client::new("secret", "token").unwrap();
        assert_eq!(client.endpoint_base(), "https://api.line.me");
        assert_eq!(client.data_endpoint_base(), "https://api-data.line.me");

        let client = client.with_endpoint_base("http://localhost:9000/").unwrap();
        assert_eq!(client.url(Base::Api, "/v2/bot/info"), "http://localhost:9000/v2/bot/info");

        assert!(Client::new("s", "t").unwrap().with_endpoint_base("not a url").is_err());
        assert!(Client::new("s", "t").unwrap().with_endpoint_base("ftp://x").is_err());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = Client::new("super-secret", "super-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("super-token"));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("U1234"), "U1234");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }

    #[tokio::test]
    async fn test_auth_and_user_agent_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/bot/anything"))
            .and(header("authorization", "Bearer token"))
            .and(header(
                "user-agent",
                format!("linebot-rs/{}", env!("CARGO_PKG_VERSION")).as_str(),
            ))
            .and(query_param("a", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.get_raw("/v2/bot/anything", &[("a", "1")]).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_post_raw_sends_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/raw"))
            .and(header("content-type", JSON_CONTENT_TYPE))
            .and(body_string(r#"{"k":"v"}"#))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.post_raw("/v2/bot/raw", r#"{"k":"v"}"#).await.unwrap();
    }

    #[tokio::test]
    async fn test_error_body_is_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2/bot/raw"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("x-line-request-id", "req-429")
                    .insert_header("retry-after", "7")
                    .set_body_string(r#"{"message":"Too many requests"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.delete_raw("/v2/bot/raw").await.unwrap_err();
        let api = err.as_api().unwrap();
        assert_eq!(api.status, 429);
        assert_eq!(api.message(), Some("Too many requests"));
        assert_eq!(api.request_id.as_deref(), Some("req-429"));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_undecodable_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_raw("/v2/bot/info", &[]).await.unwrap_err();
        assert!(err.as_api().unwrap().response.is_none());
        assert_eq!(err.to_string(), "linebot: APIError 503 ");
    }

    #[tokio::test]
    async fn test_truncated_error_body_still_maps_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // Promise more body than is sent, then hang up.
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\n{\"mess")
                .await
                .unwrap();
        });

        let client = Client::new("secret", "token")
            .unwrap()
            .with_endpoint_base(format!("http://{}", addr))
            .unwrap();
        let err = client.get_raw("/v2/bot/info", &[]).await.unwrap_err();
        let api = err.as_api().unwrap();
        assert_eq!(api.status, 500);
        assert!(api.response.is_none());
    }

    #[test]
    fn test_unauthenticated_client_builds() {
        let client = Client::unauthenticated().unwrap();
        assert!(client.channel_secret().is_empty());
        assert_eq!(client.endpoint_base(), "https://api.line.me");
    }

    #[test]
    fn test_id_file_form_builds() {
        let ids = vec!["U1".to_string(), "U2".to_string()];
        let form = id_file_form(vec![("description", "test".to_string())], &ids).unwrap();
        assert!(!form.boundary().is_empty());
    }
}
