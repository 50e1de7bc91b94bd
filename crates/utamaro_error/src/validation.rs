//! Pre-flight validation error types.
//!
//! Validation failures are reported before any network call is issued and are
//! never retried: a missing credential, a rule field the orchestrator cannot
//! work with, or content exceeding a platform's length ceiling.

/// Validation error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use utamaro_error::ValidationError;
    ///
    /// let err = ValidationError::new("caption exceeds 2200 characters");
    /// assert!(err.message.contains("2200"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
