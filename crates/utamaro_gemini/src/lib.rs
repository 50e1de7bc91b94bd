//! Gemini content generation client.
//!
//! Wraps the single outbound `generateContent` call that produces the raw
//! two-section post text. Transport and decode failures map into
//! [`utamaro_error::GenerationError`]; there is no retry and no timeout
//! beyond the transport default.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod prompt;

pub use client::GeminiClient;
pub use prompt::build_prompt;
