//! Platform publish error types.
//!
//! Each platform's publish attempt owns its own failure domain: an error here
//! never propagates to the other platform's attempt for the same firing.

use crate::ValidationError;
use derive_getters::Getters;

/// Publish-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PublishErrorKind {
    /// Pre-flight validation failed; nothing was submitted upstream.
    #[display("Validation failed: {_0}")]
    Validation(String),
    /// Container-create or commit call rejected by the platform.
    #[display("Platform request rejected: {_0}")]
    Request(String),
    /// Platform reported an internal processing failure during polling.
    #[display("Platform processing failed: {_0}")]
    Processing(String),
    /// Polling ceiling exhausted without a terminal platform state.
    #[display("Platform processing timed out after {attempts} status polls")]
    Timeout {
        /// Number of status polls issued before giving up
        attempts: u32,
    },
    /// Credential exchange (token refresh) failed.
    #[display("Credential refresh failed: {_0}")]
    Credential(String),
}

/// Publish error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    kind: PublishErrorKind,
    line: u32,
    file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use utamaro_error::{PublishError, PublishErrorKind};
    ///
    /// let err = PublishError::new(PublishErrorKind::Timeout { attempts: 20 });
    /// assert!(format!("{}", err).contains("20"));
    /// ```
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the attempt exhausted its polling ceiling.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, PublishErrorKind::Timeout { .. })
    }
}

impl From<ValidationError> for PublishError {
    #[track_caller]
    fn from(err: ValidationError) -> Self {
        PublishError::new(PublishErrorKind::Validation(err.message))
    }
}

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;
