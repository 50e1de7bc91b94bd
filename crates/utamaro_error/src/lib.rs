//! Error types for the Utamaro publish orchestrator.
//!
//! This crate provides the foundation error types used throughout the Utamaro
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use utamaro_error::{UtamaroResult, ConfigError};
//!
//! fn load_settings() -> UtamaroResult<String> {
//!     Err(ConfigError::new("missing required field"))?
//! }
//!
//! match load_settings() {
//!     Ok(settings) => println!("Got: {}", settings),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod publish;
mod validation;

pub use config::ConfigError;
pub use error::{UtamaroError, UtamaroErrorKind, UtamaroResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use publish::{PublishError, PublishErrorKind, PublishResult};
pub use validation::ValidationError;
