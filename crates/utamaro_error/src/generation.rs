//! Content generation error types.

use derive_getters::Getters;

/// Generation-specific error conditions.
///
/// A generation failure aborts the whole rule firing: with no content there
/// is nothing either platform could publish.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not configured
    #[display("Gemini API key is not configured")]
    MissingApiKey,
    /// Outbound request to the generation endpoint failed
    #[display("Generation request failed: {_0}")]
    Request(String),
    /// Endpoint returned a non-success HTTP status
    #[display("Generation endpoint returned HTTP {status_code}: {message}")]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message from the response body
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to decode generation response: {_0}")]
    Decode(String),
    /// Response decoded but carried no usable candidate text
    #[display("Generation response contained no text")]
    EmptyResponse,
}

/// Generation error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    kind: GenerationErrorKind,
    line: u32,
    file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use utamaro_error::{GenerationError, GenerationErrorKind};
    ///
    /// let err = GenerationError::new(GenerationErrorKind::MissingApiKey);
    /// assert!(format!("{}", err).contains("not configured"));
    /// ```
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
