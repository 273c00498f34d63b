//! Client error types

use busline_model::{DeleteError, FetchError};

/// HTTP client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Base URL or prefix does not form a usable URL
    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP client could not be built
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    /// Request failed before a response arrived
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Non-success status
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Body did not match the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, message } => Self::Status { status, message },
            ClientError::Decode(message) => Self::Decode(message),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<ClientError> for DeleteError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, message } => Self::Rejected { status, message },
            other => Self::Transport(other.to_string()),
        }
    }
}
