//! Messaging API error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by [`Client`](crate::Client) operations.
#[derive(Debug, Error)]
pub enum LineError {
    /// The API answered with a non-2xx status.
    #[error("{0}")]
    Api(ApiError),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed endpoint or request URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error, e.g. reading an image to upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request was rejected before it was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl LineError {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// The API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        self.as_api().map(|e| e.status)
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.status == 429 || e.status >= 500,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Server-provided retry delay, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        self.as_api().and_then(|e| e.retry_after)
    }
}

impl From<ApiError> for LineError {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

/// A non-2xx response from the API.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,

    /// Decoded error body; `None` when the body was not the documented shape.
    pub response: Option<ErrorResponse>,

    /// Value of the `x-line-request-id` header.
    pub request_id: Option<String>,

    /// Value of the `Retry-After` header.
    pub retry_after: Option<Duration>,
}

impl ApiError {
    /// Top-level error message, if the body decoded.
    pub fn message(&self) -> Option<&str> {
        self.response.as_ref().map(|r| r.message.as_str())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linebot: APIError {} ", self.status)?;
        if let Some(response) = &self.response {
            f.write_str(&response.message)?;
            for detail in &response.details {
                write!(f, "\n[{}] {}", detail.property, detail.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Error body returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Summary message.
    pub message: String,

    /// Per-property details.
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

/// One entry of [`ErrorResponse::details`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Detail message.
    #[serde(default)]
    pub message: String,

    /// Offending request property.
    #[serde(default)]
    pub property: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, response: Option<ErrorResponse>) -> LineError {
        LineError::Api(ApiError {
            status,
            response,
            request_id: None,
            retry_after: None,
        })
    }

    #[test]
    fn test_api_error_display_with_details() {
        let err = api_error(
            400,
            Some(ErrorResponse {
                message: "The request body has 2 error(s)".to_string(),
                details: vec![
                    ErrorDetail {
                        message: "May not be empty".to_string(),
                        property: "messages[0].text".to_string(),
                    },
                    ErrorDetail {
                        message: "Must be one of the following values: [text, image]".to_string(),
                        property: "messages[1].type".to_string(),
                    },
                ],
            }),
        );

        assert_eq!(
            err.to_string(),
            "linebot: APIError 400 The request body has 2 error(s)\n\
             [messages[0].text] May not be empty\n\
             [messages[1].type] Must be one of the following values: [text, image]"
        );
    }

    #[test]
    fn test_api_error_display_without_body() {
        assert_eq!(api_error(502, None).to_string(), "linebot: APIError 502 ");
    }

    #[test]
    fn test_is_retryable() {
        assert!(api_error(429, None).is_retryable());
        assert!(api_error(500, None).is_retryable());
        assert!(!api_error(400, None).is_retryable());
        assert!(!LineError::config("missing channel secret").is_retryable());
    }

    #[test]
    fn test_retry_after() {
        let err = LineError::Api(ApiError {
            status: 429,
            response: None,
            request_id: Some("req-1".to_string()),
            retry_after: Some(Duration::from_secs(3)),
        });
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
        assert_eq!(err.status(), Some(429));
        assert_eq!(api_error(500, None).retry_after(), None);
    }

    #[test]
    fn test_error_response_tolerates_missing_details() {
        let body: ErrorResponse = serde_json::from_str(r#"{"message":"Not found"}"#).unwrap();
        assert_eq!(body.message, "Not found");
        assert!(body.details.is_empty());
    }
}
