//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
pub fn get_var_or(name: &str, default: &str) -> String {
    get_var(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable as a u16 (e.g., for ports).
pub fn get_u16(name: &str) -> Option<u16> {
    get_var(name).and_then(|v| v.trim().parse().ok())
}

/// Get an environment variable as a u64.
pub fn get_u64(name: &str) -> Option<u64> {
    get_var(name).and_then(|v| v.trim().parse().ok())
}

/// Environment variable names read by the SDK and CLI.
pub mod vars {
    /// Channel secret used for webhook signatures and token issuance.
    pub const LINE_CHANNEL_SECRET: &str = "LINE_CHANNEL_SECRET";

    /// Long-lived or stateless channel access token.
    pub const LINE_CHANNEL_ACCESS_TOKEN: &str = "LINE_CHANNEL_ACCESS_TOKEN";

    /// Channel ID.
    pub const LINE_CHANNEL_ID: &str = "LINE_CHANNEL_ID";

    /// Override for the API endpoint base.
    pub const LINEBOT_API_ENDPOINT: &str = "LINEBOT_API_ENDPOINT";

    /// Override for the data API endpoint base.
    pub const LINEBOT_DATA_ENDPOINT: &str = "LINEBOT_DATA_ENDPOINT";

    /// Webhook server port override.
    pub const LINEBOT_PORT: &str = "LINEBOT_PORT";

    /// Config file override.
    pub const LINEBOT_CONFIG: &str = "LINEBOT_CONFIG";

    /// Log filter directive.
    pub const LINEBOT_LOG: &str = "LINEBOT_LOG";
}
