//! Error types shared by the store, lifecycle and analytics layers

use std::time::Duration;

use thiserror::Error;

use crate::utils::atomic::AtomicError;

/// Result type for order operations
pub type OrderResult<T> = Result<T, OrderError>;

/// Caller-visible failures of the order core.
///
/// Every variant maps to a stable [`OrderError::kind`] string so the HTTP
/// layer can report it without inspecting messages.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed or empty input. Retrying the same request will not help.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced order does not exist.
    #[error("order {0} not found")]
    NotFound(u64),

    /// A stored payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The store could not complete the write; nothing was changed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A store call did not finish within the configured bound.
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

impl OrderError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::Validation(_) => "VALIDATION_ERROR",
            OrderError::NotFound(_) => "NOT_FOUND",
            OrderError::Parse(_) => "PARSE_ERROR",
            OrderError::Persistence(_) => "PERSISTENCE_ERROR",
            OrderError::Timeout(_) => "TIMEOUT",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        OrderError::Validation(message.into())
    }

    /// Whether the caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Persistence(_) | OrderError::Timeout(_))
    }
}

impl From<std::io::Error> for OrderError {
    fn from(e: std::io::Error) -> Self {
        OrderError::Persistence(e.to_string())
    }
}

impl From<AtomicError> for OrderError {
    fn from(e: AtomicError) -> Self {
        OrderError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for OrderError {
    fn from(e: serde_json::Error) -> Self {
        OrderError::Parse(e.to_string())
    }
}

/// Failures of the best-effort notification path. Never surfaced to callers
/// of the lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BroadcastError {
    #[error("no subscribers connected")]
    NoSubscribers,

    #[error("broadcast channel closed")]
    Closed,
}
