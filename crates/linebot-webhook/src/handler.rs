//! Webhook request handling and the axum route that serves it.

use crate::error::WebhookError;
use crate::event::CallbackRequest;
use crate::signature::parse_request;
use crate::Result;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use linebot_core::SecretString;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Receives the events of each verified callback.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle_events(&self, request: CallbackRequest);
}

/// Adapts an async closure to [`EventHandler`].
struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> EventHandler for FnHandler<F>
where
    F: Fn(CallbackRequest) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn handle_events(&self, request: CallbackRequest) {
        (self.0)(request).await
    }
}

type ErrorCallback = Arc<dyn Fn(&WebhookError) + Send + Sync>;

/// Verifies callbacks and dispatches their events.
#[derive(Clone)]
pub struct WebhookHandler {
    channel_secret: SecretString,
    events: Option<Arc<dyn EventHandler>>,
    on_error: Option<ErrorCallback>,
}

impl std::fmt::Debug for WebhookHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookHandler")
            .field("channel_secret", &self.channel_secret)
            .field("has_event_handler", &self.events.is_some())
            .field("has_error_handler", &self.on_error.is_some())
            .finish()
    }
}

impl WebhookHandler {
    pub fn new(channel_secret: impl Into<String>) -> Result<Self> {
        let channel_secret = SecretString::new(channel_secret);
        if channel_secret.is_empty() {
            return Err(WebhookError::Config("missing channel secret".to_string()));
        }
        Ok(Self {
            channel_secret,
            events: None,
            on_error: None,
        })
    }

    /// Register an async closure called with every verified callback.
    pub fn on_events<F, Fut>(self, f: F) -> Self
    where
        F: Fn(CallbackRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.with_handler(Arc::new(FnHandler(f)))
    }

    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.events = Some(handler);
        self
    }

    /// Register a callback invoked before an error response is sent.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&WebhookError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Verify and dispatch one callback, returning the status to answer with.
    pub async fn handle(&self, headers: &HeaderMap, body: &[u8]) -> StatusCode {
        match parse_request(self.channel_secret.expose_secret(), headers, body) {
            Ok(request) => {
                debug!(
                    "Webhook callback for {} with {} event(s)",
                    request.destination,
                    request.events.len()
                );
                if let Some(handler) = &self.events {
                    handler.handle_events(request).await;
                }
                StatusCode::OK
            }
            Err(e) => {
                if let Some(callback) = &self.on_error {
                    callback(&e);
                }
                if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    error!("Webhook handling failed: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        }
    }

    /// Router serving POST `path`. A missing leading `/` is added.
    pub fn router(self, path: &str) -> Router {
        let path = route_path(path);
        Router::new()
            .route(&path, post(callback_handler))
            .with_state(Arc::new(self))
    }
}

fn route_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        return trimmed.to_string();
    }
    warn!("Webhook path {:?} does not start with '/', serving /{}", path, trimmed);
    format!("/{}", trimmed)
}

async fn callback_handler(
    State(handler): State<Arc<WebhookHandler>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    handler.handle(&headers, &body).await
}
