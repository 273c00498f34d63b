//! Error types for providers
//!
//! Failures are split by operation:
//! - [`FetchError`] for the category and record reads
//! - [`DeleteError`] for the delete action
//! - [`PageRequestError`] for malformed paging windows

use crate::record::RecordId;

/// Read failure from a category or record provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network or connection level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Check if a user-initiated retry could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Decode(_) => false,
        }
    }
}

/// Delete action failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteError {
    /// Record no longer exists
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Backend refused the delete
    #[error("delete rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network or connection level failure
    #[error("transport error: {0}")]
    Transport(String),
}

impl DeleteError {
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
            || matches!(self, Self::Rejected { status, .. } if *status >= 500)
    }
}

/// Invalid paging window
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Limit must be positive
    #[error("page limit must be greater than zero")]
    ZeroLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(FetchError::Transport("reset".into()).is_retryable());
        assert!(FetchError::Status { status: 503, message: String::new() }.is_retryable());
        assert!(!FetchError::Status { status: 404, message: String::new() }.is_retryable());
        assert!(!FetchError::Decode("eof".into()).is_retryable());

        assert!(DeleteError::Transport("reset".into()).is_retryable());
        assert!(!DeleteError::NotFound(RecordId::new()).is_retryable());
        assert!(!DeleteError::Rejected { status: 403, message: "nope".into() }.is_retryable());
    }

    #[test]
    fn messages_are_readable() {
        let err = FetchError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "backend returned 500: boom");
    }
}
