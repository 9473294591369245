//! Shared Error Types
//!
//! Errors raised by the API client and by persistent storage. Form callers
//! never see these directly: the session store folds them into an
//! [`AuthOutcome`](crate::egui_app::auth::AuthOutcome).
//!
//! # Error Categories
//!
//! - `ApiError` - transport failures and rejected responses
//! - `StorageError` - reading or writing the on-disk key/value store
use thiserror::Error;

/// Failure of a request made through the API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 401
    #[error("unauthorized")]
    Unauthorized {
        /// `error` field of the response body, if any
        message: Option<String>,
    },

    /// Any other non-success status
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        /// `error` field of the response body, if any
        message: Option<String>,
    },

    /// Success status but the body did not have the expected shape
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message carried by the backend's `{error}` payload.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Failure of the persistent key/value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}
