//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, PublishError, ValidationError};

/// This is the foundation error enum for the Utamaro workspace.
///
/// # Examples
///
/// ```
/// use utamaro_error::{UtamaroError, ConfigError};
///
/// let config_err = ConfigError::new("missing required field");
/// let err: UtamaroError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum UtamaroErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Pre-flight validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Content generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Platform publish error
    #[from(PublishError)]
    Publish(PublishError),
}

/// Utamaro error with kind discrimination.
///
/// # Examples
///
/// ```
/// use utamaro_error::{UtamaroResult, ConfigError};
///
/// fn might_fail() -> UtamaroResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Utamaro Error: {}", _0)]
pub struct UtamaroError(Box<UtamaroErrorKind>);

impl UtamaroError {
    /// Create a new error from a kind.
    pub fn new(kind: UtamaroErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UtamaroErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to UtamaroErrorKind
impl<T> From<T> for UtamaroError
where
    T: Into<UtamaroErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Utamaro operations.
///
/// # Examples
///
/// ```
/// use utamaro_error::{UtamaroResult, ValidationError};
///
/// fn check_rule() -> UtamaroResult<()> {
///     Err(ValidationError::new("invalid clock time"))?
/// }
/// ```
pub type UtamaroResult<T> = std::result::Result<T, UtamaroError>;
