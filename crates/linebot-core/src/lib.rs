//! # linebot-core
//!
//! Shared building blocks for the linebot crates:
//!
//! - **Configuration**: JSON5 config file with environment overlay
//! - **Secrets**: zeroizing, redacted credential strings
//! - **Utilities**: path resolution and environment helpers

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;

pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use secret::SecretString;
