//! Inbound webhook support for LINE bots.
//!
//! This crate provides:
//! - `x-line-signature` verification
//! - The webhook event model
//! - An axum router and a standalone server for the callback endpoint

pub mod error;
pub mod event;
pub mod handler;
pub mod server;
pub mod signature;

pub use error::WebhookError;
pub use event::{CallbackRequest, Event, EventBase, MessageContent, Source};
pub use handler::{EventHandler, WebhookHandler};
pub use server::WebhookServer;
pub use signature::{parse_request, sign, validate_signature, SIGNATURE_HEADER};

/// Result type for webhook operations.
pub type Result<T> = std::result::Result<T, WebhookError>;
