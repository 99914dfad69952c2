//! Standalone webhook server.

use crate::error::WebhookError;
use crate::handler::WebhookHandler;
use crate::Result;
use axum::{response::IntoResponse, routing::get, Json, Router};
use linebot_core::config::WebhookConfig;
use std::future::Future;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Serves a [`WebhookHandler`] on the configured host, port and path.
#[derive(Debug, Clone)]
pub struct WebhookServer {
    config: WebhookConfig,
    handler: WebhookHandler,
}

impl WebhookServer {
    pub fn new(config: WebhookConfig, handler: WebhookHandler) -> Self {
        Self { config, handler }
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// The callback route plus `/health`, wrapped in request tracing.
    pub fn router(&self) -> Router {
        self.handler
            .clone()
            .router(&self.config.path)
            .route("/health", get(health_handler))
            .layer(TraceLayer::new_for_http())
    }

    /// Run until the process is stopped.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run until `shutdown` completes.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.bind_address();
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(
            "Webhook server listening on {} (path {})",
            listener.local_addr()?,
            self.config.path
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(WebhookError::Io)?;

        info!("Webhook server stopped");
        Ok(())
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{sign, SIGNATURE_HEADER};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server(path: &str) -> WebhookServer {
        let config = WebhookConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            path: path.to_string(),
        };
        WebhookServer::new(config, WebhookHandler::new("secret").unwrap())
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(server("/callback").bind_address(), "127.0.0.1:0");
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = server("/callback")
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_callback_on_configured_path() {
        let body = r#"{"destination":"U0","events":[]}"#;
        let request = Request::post("/hooks/line")
            .header(SIGNATURE_HEADER, sign("secret", body.as_bytes()))
            .body(Body::from(body))
            .unwrap();
        let response = server("/hooks/line").router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let handle = tokio::spawn(server("/callback").run_until(async {}));
        handle.await.unwrap().unwrap();
    }
}
