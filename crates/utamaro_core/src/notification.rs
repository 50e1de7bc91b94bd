//! Human-readable notifications for the presentation layer.

use serde::{Deserialize, Serialize};

/// Severity tag on a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational progress message.
    #[display("info")]
    Info,
    /// A firing or attempt completed successfully.
    #[display("success")]
    Success,
    /// A firing or attempt failed.
    #[display("error")]
    Error,
}

/// One event on the notification stream.
///
/// Notifications are human-readable text plus a severity tag; they carry no
/// further structure.
///
/// # Examples
///
/// ```
/// use utamaro_core::{Notification, Severity};
///
/// let n = Notification::success("自動投稿完了: 春メニュー");
/// assert_eq!(n.severity, Severity::Success);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Message shown to the operator.
    pub message: String,
    /// Severity tag.
    pub severity: Severity,
}

impl Notification {
    /// An informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// A success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    /// An error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}
