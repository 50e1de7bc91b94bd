//! Pure rule matching against the wall clock.

use crate::{Cadence, PostingRule};
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Return the rules due at `now`, minute resolution.
///
/// A `Daily` rule matches when the current `HH:MM` equals the rule time; a
/// `Weekly` rule additionally requires the day of week (0 = Sunday) to match.
/// The function is pure and deterministic; the caller is responsible for
/// invoking it at minute granularity and for not firing the same rule twice
/// within one minute.
///
/// # Examples
///
/// ```
/// use utamaro_core::{matcher::due_rules, Cadence, PostingRule};
/// use chrono::NaiveDate;
///
/// let rule = PostingRule {
///     id: 1,
///     cadence: Cadence::Daily,
///     time: "09:00".parse().unwrap(),
///     topic: Some("spring menu".to_string()),
///     target_audience: "general".to_string(),
///     media: None,
/// };
/// let now = NaiveDate::from_ymd_opt(2024, 4, 1)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// assert_eq!(due_rules(&[rule], now).len(), 1);
/// ```
pub fn due_rules(rules: &[PostingRule], now: NaiveDateTime) -> Vec<&PostingRule> {
    let hour = now.time().hour() as u8;
    let minute = now.time().minute() as u8;
    let weekday = now.weekday().num_days_from_sunday() as u8;

    rules
        .iter()
        .filter(|rule| {
            if rule.time.hour() != hour || rule.time.minute() != minute {
                return false;
            }
            match rule.cadence {
                Cadence::Daily => true,
                Cadence::Weekly { day } => day == weekday,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rule(id: i64, cadence: Cadence, time: &str) -> PostingRule {
        PostingRule {
            id,
            cadence,
            time: time.parse().unwrap(),
            topic: Some("テーマ".to_string()),
            target_audience: "general".to_string(),
            media: None,
        }
    }

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn daily_matches_on_time_regardless_of_date() {
        let rules = vec![rule(1, Cadence::Daily, "09:00")];
        assert_eq!(due_rules(&rules, at(2024, 4, 1, 9, 0)).len(), 1);
        assert_eq!(due_rules(&rules, at(2025, 12, 31, 9, 0)).len(), 1);
        assert!(due_rules(&rules, at(2024, 4, 1, 9, 1)).is_empty());
        assert!(due_rules(&rules, at(2024, 4, 1, 10, 0)).is_empty());
    }

    #[test]
    fn weekly_requires_matching_day() {
        // 2024-04-01 is a Monday (day 1 with Sunday = 0).
        let rules = vec![rule(2, Cadence::Weekly { day: 1 }, "18:30")];
        assert_eq!(due_rules(&rules, at(2024, 4, 1, 18, 30)).len(), 1);
        // Right time, wrong day (Tuesday).
        assert!(due_rules(&rules, at(2024, 4, 2, 18, 30)).is_empty());
        // Right day, wrong time.
        assert!(due_rules(&rules, at(2024, 4, 1, 18, 31)).is_empty());
    }

    #[test]
    fn weekly_sunday_is_day_zero() {
        // 2024-04-07 is a Sunday.
        let rules = vec![rule(3, Cadence::Weekly { day: 0 }, "10:00")];
        assert_eq!(due_rules(&rules, at(2024, 4, 7, 10, 0)).len(), 1);
        assert!(due_rules(&rules, at(2024, 4, 6, 10, 0)).is_empty());
    }

    #[test]
    fn multiple_rules_can_be_due_in_one_minute() {
        let rules = vec![
            rule(1, Cadence::Daily, "09:00"),
            rule(2, Cadence::Daily, "09:00"),
            rule(3, Cadence::Daily, "12:00"),
        ];
        let due = due_rules(&rules, at(2024, 4, 1, 9, 0));
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].id, 1);
        assert_eq!(due[1].id, 2);
    }

    #[test]
    fn seconds_within_the_minute_do_not_matter() {
        let rules = vec![rule(1, Cadence::Daily, "09:00")];
        let now = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 59)
            .unwrap();
        assert_eq!(due_rules(&rules, now).len(), 1);
    }
}
