//! Error types for the notificator.

use crate::types::UserId;
use thiserror::Error;

/// Main error type for notification operations.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Invalid {field} value: {value:?}")]
    Parse { field: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Delivery to user {user} rejected by transport")]
    Rejected { user: UserId },
}

impl From<serde_json::Error> for NotifyError {
    fn from(e: serde_json::Error) -> Self {
        NotifyError::Serialization(e.to_string())
    }
}

/// Result type for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
