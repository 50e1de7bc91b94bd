//! Scheduled posting rules.

use crate::MediaRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utamaro_error::ValidationError;

/// A wall-clock time with minute resolution, serialized as `"HH:MM"`.
///
/// # Examples
///
/// ```
/// use utamaro_core::ClockMinute;
///
/// let t: ClockMinute = "09:30".parse().unwrap();
/// assert_eq!(t.hour(), 9);
/// assert_eq!(t.minute(), 30);
/// assert_eq!(t.to_string(), "09:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockMinute {
    hour: u8,
    minute: u8,
}

impl ClockMinute {
    /// Create a clock minute, validating the component ranges.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::new(format!(
                "invalid clock time {hour:02}:{minute:02}"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Hour component (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for ClockMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockMinute {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::new(format!("invalid clock time '{s}'")))?;
        let hour = h
            .parse::<u8>()
            .map_err(|_| ValidationError::new(format!("invalid hour in '{s}'")))?;
        let minute = m
            .parse::<u8>()
            .map_err(|_| ValidationError::new(format!("invalid minute in '{s}'")))?;
        Self::new(hour, minute)
    }
}

impl Serialize for ClockMinute {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockMinute {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How often a rule fires.
///
/// `Weekly` carries a day of week in `[0, 6]` with 0 = Sunday, matching the
/// stored rule format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cadence {
    /// Fires every day at the rule's time.
    Daily,
    /// Fires once a week at the rule's time.
    Weekly {
        /// Day of week, 0 = Sunday through 6 = Saturday.
        day: u8,
    },
}

/// One scheduled posting intent.
///
/// Rules are created and edited by the external rule store; the orchestrator
/// only reads a snapshot per tick and never mutates rule identity. A rule
/// with no `topic` never triggers an automated publish, it only surfaces as
/// a "due" notification.
///
/// # Examples
///
/// ```
/// use utamaro_core::{Cadence, PostingRule};
///
/// let rule = PostingRule {
///     id: 1717000000000,
///     cadence: Cadence::Daily,
///     time: "10:00".parse().unwrap(),
///     topic: Some("今日のスタイル".to_string()),
///     target_audience: "general".to_string(),
///     media: None,
/// };
/// assert!(rule.auto_publishes());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingRule {
    /// Opaque stable identifier assigned at creation (creation timestamp).
    pub id: i64,
    /// Daily or weekly cadence.
    #[serde(flatten)]
    pub cadence: Cadence,
    /// Wall-clock firing time, minute resolution.
    pub time: ClockMinute,
    /// Free-text prompt seed. Absent means notify-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Persona id used to bias generation.
    #[serde(default = "default_audience")]
    pub target_audience: String,
    /// Optional media attached to the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
}

fn default_audience() -> String {
    "general".to_string()
}

impl PostingRule {
    /// Whether this rule triggers an automated publish when due.
    ///
    /// Rules without a topic only surface as a notification awaiting manual
    /// action.
    pub fn auto_publishes(&self) -> bool {
        self.topic.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_minute_parses_and_formats() {
        let t: ClockMinute = "07:05".parse().unwrap();
        assert_eq!(t.to_string(), "07:05");
        assert!("24:00".parse::<ClockMinute>().is_err());
        assert!("12:60".parse::<ClockMinute>().is_err());
        assert!("noon".parse::<ClockMinute>().is_err());
    }

    #[test]
    fn rule_without_topic_is_notify_only() {
        let mut rule = PostingRule {
            id: 1,
            cadence: Cadence::Daily,
            time: "10:00".parse().unwrap(),
            topic: None,
            target_audience: "general".to_string(),
            media: None,
        };
        assert!(!rule.auto_publishes());
        rule.topic = Some("  ".to_string());
        assert!(!rule.auto_publishes());
        rule.topic = Some("春メニュー".to_string());
        assert!(rule.auto_publishes());
    }

    #[test]
    fn cadence_round_trips_through_tagged_form() {
        let rule = PostingRule {
            id: 2,
            cadence: Cadence::Weekly { day: 3 },
            time: "18:30".parse().unwrap(),
            topic: Some("定休日前のご案内".to_string()),
            target_audience: "general".to_string(),
            media: None,
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"type\":\"weekly\""));
        assert!(json.contains("\"day\":3"));
        let back: PostingRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
