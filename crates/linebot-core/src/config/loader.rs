//! Configuration loading and persistence.

use super::{Config, LogFormat, LogLevel};
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use crate::secret::SecretString;
use std::fs;
use std::path::Path;
use tracing::debug;
use url::Url;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to the default path.
    pub fn save_default(&self) -> Result<(), ConfigError> {
        let path = paths::config_file()?;
        self.save(&path)
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically, owner-only since it holds credentials.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))?;
        }
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to a JSON5-compatible string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 has no serializer; plain JSON is valid JSON5.
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        // Credentials come as a pair once either is set.
        if !self.channel.is_unset() {
            if self.channel.channel_secret.is_empty() {
                errors.push("channel.channel_secret is empty".to_string());
            }
            if self.channel.channel_access_token.is_empty() {
                errors.push("channel.channel_access_token is empty".to_string());
            }
        }

        for (name, value) in [
            ("api.endpoint", &self.api.endpoint),
            ("api.data_endpoint", &self.api.data_endpoint),
        ] {
            if let Err(e) = check_http_url(value) {
                errors.push(format!("{} '{}' is invalid: {}", name, value, e));
            }
        }

        if self.api.timeout_secs == 0 {
            errors.push("api.timeout_secs must be greater than 0".to_string());
        }

        if self.webhook.port == 0 {
            errors.push("Webhook port cannot be 0".to_string());
        }

        if !self.webhook.path.starts_with('/') {
            errors.push(format!(
                "webhook.path '{}' must start with '/'",
                self.webhook.path
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Fail unless both channel credentials are present.
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        if self.channel.channel_secret.is_empty() {
            return Err(ConfigError::MissingCredential("channel secret"));
        }
        if self.channel.channel_access_token.is_empty() {
            return Err(ConfigError::MissingCredential("channel access token"));
        }
        Ok(())
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(env::get_var);
    }

    /// Overlay values from an arbitrary lookup. Blank values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        use env::vars;

        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(secret) = lookup(vars::LINE_CHANNEL_SECRET) {
            self.channel.channel_secret = SecretString::new(secret);
        }
        if let Some(token) = lookup(vars::LINE_CHANNEL_ACCESS_TOKEN) {
            self.channel.channel_access_token = SecretString::new(token);
        }
        if let Some(id) = lookup(vars::LINE_CHANNEL_ID) {
            self.channel.channel_id = Some(id);
        }
        if let Some(endpoint) = lookup(vars::LINEBOT_API_ENDPOINT) {
            self.api.endpoint = endpoint;
        }
        if let Some(endpoint) = lookup(vars::LINEBOT_DATA_ENDPOINT) {
            self.api.data_endpoint = endpoint;
        }
        if let Some(port) = lookup(vars::LINEBOT_PORT).and_then(|p| p.trim().parse().ok()) {
            self.webhook.port = port;
        }
    }

    /// Load from the default path, falling back to defaults if no file
    /// exists, then overlay the environment.
    pub fn load_or_default() -> Self {
        let mut config = match Self::load_default() {
            Ok(config) => config,
            Err(e) => {
                if !e.is_not_found() {
                    tracing::warn!("Ignoring unreadable config: {}", e);
                }
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    /// Load from an explicit path when given, otherwise the default
    /// location, then overlay the environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match Self::load_default() {
                Ok(config) => config,
                Err(ConfigError::NotFound(_)) => Self::default(),
                Err(e) => return Err(e),
            },
        };
        config.apply_env();
        Ok(config)
    }
}

fn check_http_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

/// Configuration builder for creating configs programmatically.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both channel credentials.
    pub fn credentials(
        mut self,
        channel_secret: impl Into<String>,
        channel_access_token: impl Into<String>,
    ) -> Self {
        self.config.channel.channel_secret = SecretString::new(channel_secret);
        self.config.channel.channel_access_token = SecretString::new(channel_access_token);
        self
    }

    /// Set the channel ID.
    pub fn channel_id(mut self, id: impl Into<String>) -> Self {
        self.config.channel.channel_id = Some(id.into());
        self
    }

    /// Point both endpoint bases at one URL, e.g. a mock server.
    pub fn endpoints(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        self.config.api.data_endpoint = endpoint.clone();
        self.config.api.endpoint = endpoint;
        self
    }

    /// Set the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.api.timeout_secs = secs;
        self
    }

    /// Set the webhook port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.webhook.port = port;
        self
    }

    /// Set the webhook callback path.
    pub fn webhook_path(mut self, path: impl Into<String>) -> Self {
        self.config.webhook.path = path.into();
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Build the config.
    pub fn build(self) -> Config {
        self.config
    }

    /// Validate and build the config, returning an error if validation fails.
    pub fn build_validated(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
