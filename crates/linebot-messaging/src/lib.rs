//! Typed client for the LINE Messaging API.
//!
//! [`Client`] covers messaging, profiles, groups and rooms, rich menus,
//! LIFF apps, insights, channel access tokens and audience groups.
//! Requests are built from the typed models in [`models`]; paginated ID
//! listings can be walked lazily with [`IdScanner`].

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod scanner;

pub use client::{BasicResponse, Client, MessageContent, MessageContentStream};
pub use error::{ApiError, ErrorDetail, ErrorResponse, LineError};
pub use models::{Action, FlexContainer, Message, SendingMessage, Template};
pub use scanner::IdScanner;

/// Result type for LINE API operations.
pub type Result<T> = std::result::Result<T, LineError>;
