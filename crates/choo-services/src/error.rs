//! Remote-operation error type.

use choo_core::NetworkError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::api::Operation;
use crate::retry::{is_retryable_status, RetryDecision};

/// A remote todo operation failed.
///
/// This is the only failure kind the controller sees; the cause says whether
/// it was connectivity, a non-success status or a malformed payload.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct ApiError {
    pub operation: Operation,
    #[source]
    pub source: NetworkError,
}

impl ApiError {
    pub fn new(operation: Operation, source: NetworkError) -> Self {
        Self { operation, source }
    }

    /// User-friendly error message for display.
    pub fn user_message(&self) -> &'static str {
        self.source.user_message()
    }

    /// Whether retrying the same request could succeed.
    ///
    /// Statuses are classified exactly as the read retry loop does.
    pub fn is_transient(&self) -> bool {
        match &self.source {
            NetworkError::Timeout | NetworkError::ConnectionFailed(_) => true,
            NetworkError::ServerError { status, .. } => StatusCode::from_u16(*status)
                .map(|s| is_retryable_status(s) == RetryDecision::Retry)
                .unwrap_or(false),
            NetworkError::InvalidResponse(_) => false,
        }
    }
}

/// Result type for remote todo operations.
pub type ApiResult<T> = Result<T, ApiError>;
