//! Configuration schema definitions.

use crate::secret::SecretString;
use serde::{Deserialize, Serialize};

/// Default Messaging API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.line.me";

/// Default data API endpoint (content download and uploads).
pub const DEFAULT_DATA_ENDPOINT: &str = "https://api-data.line.me";

/// Main linebot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Channel credentials.
    #[serde(default)]
    pub channel: ChannelConfig,

    /// API endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Webhook server settings.
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Channel credentials section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel ID, needed for token issuance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    /// Channel secret.
    #[serde(default)]
    pub channel_secret: SecretString,

    /// Channel access token.
    #[serde(default)]
    pub channel_access_token: SecretString,
}

impl ChannelConfig {
    /// True when neither credential has been provided.
    pub fn is_unset(&self) -> bool {
        self.channel_secret.is_empty() && self.channel_access_token.is_empty()
    }
}

/// API endpoint section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Messaging API base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Data API base URL.
    #[serde(default = "default_data_endpoint")]
    pub data_endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            data_endpoint: default_data_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_data_endpoint() -> String {
    DEFAULT_DATA_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Webhook server section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port number.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Callback path.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path() -> String {
    "/callback".to_string()
}

/// Logging section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
