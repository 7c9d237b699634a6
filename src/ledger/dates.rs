//! Due-date classification and the weekly settlement calendar.
//!
//! Every function takes `today` explicitly and works on naive calendar dates, so there is no
//! time-of-day, timezone or DST involved anywhere.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;

/// Settlement runs once a week on this day
pub const SETTLEMENT_WEEKDAY: Weekday = Weekday::Fri;

/// Number of days ahead (inclusive) that still counts as "due soon"
pub const DUE_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueDateStatus {
    Unknown,
    Overdue,
    DueToday,
    DueSoon,
    Future,
}

impl DueDateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DueDateStatus::Unknown => "unknown",
            DueDateStatus::Overdue => "overdue",
            DueDateStatus::DueToday => "due-today",
            DueDateStatus::DueSoon => "due-soon",
            DueDateStatus::Future => "future",
        }
    }
}

impl fmt::Display for DueDateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a due date relative to `today`.
///
/// Checks run in order: overdue wins over same-day, which wins over the 7-day window.
pub fn classify_due_date(due_date: Option<NaiveDate>, today: NaiveDate) -> DueDateStatus {
    let Some(due) = due_date else {
        return DueDateStatus::Unknown;
    };

    if due < today {
        return DueDateStatus::Overdue;
    }
    if due == today {
        return DueDateStatus::DueToday;
    }
    if (due - today).num_days() <= DUE_SOON_DAYS {
        return DueDateStatus::DueSoon;
    }
    DueDateStatus::Future
}

pub fn is_overdue(due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    due_date.is_some_and(|due| due < today)
}

/// The settlement day strictly after `today`.
///
/// When `today` is itself a settlement day this is one week later; use
/// [`is_settlement_day_today`] to detect that case.
pub fn next_settlement_date(today: NaiveDate) -> NaiveDate {
    today + Days::new(days_ahead(today))
}

/// Whole days until [`next_settlement_date`], always in `1..=7`
pub fn days_until_settlement(today: NaiveDate) -> i64 {
    (next_settlement_date(today) - today).num_days()
}

pub fn is_settlement_day_today(today: NaiveDate) -> bool {
    today.weekday() == SETTLEMENT_WEEKDAY
}

/// Banner text for the settlement countdown
pub fn settlement_message(today: NaiveDate) -> String {
    if is_settlement_day_today(today) {
        return "Settlement processing today".to_string();
    }
    match days_until_settlement(today) {
        1 => "Settlement tomorrow".to_string(),
        days => format!("Settlement in {days} days"),
    }
}

/// Short relative label such as "Tomorrow" or "3 days ago"
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        n if n > 0 => format!("In {n} days"),
        n => format!("{} days ago", n.abs()),
    }
}

fn days_ahead(today: NaiveDate) -> u64 {
    let from = today.weekday().num_days_from_monday();
    let to = SETTLEMENT_WEEKDAY.num_days_from_monday();
    match (to + 7 - from) % 7 {
        0 => 7,
        n => u64::from(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2026-10-16 is a Friday
    fn wednesday() -> NaiveDate {
        date(2026, 10, 14)
    }

    #[test]
    fn test_classify_due_date() {
        let today = wednesday();
        assert_eq!(
            classify_due_date(today.pred_opt(), today),
            DueDateStatus::Overdue
        );
        assert_eq!(classify_due_date(Some(today), today), DueDateStatus::DueToday);
        assert_eq!(
            classify_due_date(Some(today + Days::new(3)), today),
            DueDateStatus::DueSoon
        );
        assert_eq!(
            classify_due_date(Some(today + Days::new(30)), today),
            DueDateStatus::Future
        );
        assert_eq!(classify_due_date(None, today), DueDateStatus::Unknown);
    }

    #[test]
    fn test_due_soon_window_is_inclusive() {
        let today = wednesday();
        assert_eq!(
            classify_due_date(Some(today + Days::new(7)), today),
            DueDateStatus::DueSoon
        );
        assert_eq!(
            classify_due_date(Some(today + Days::new(8)), today),
            DueDateStatus::Future
        );
    }

    #[test]
    fn test_is_overdue() {
        let today = wednesday();
        assert!(is_overdue(today.pred_opt(), today));
        assert!(!is_overdue(Some(today), today));
        assert!(!is_overdue(None, today));
    }

    #[test]
    fn test_next_settlement_from_midweek() {
        let today = wednesday();
        assert_eq!(next_settlement_date(today), date(2026, 10, 16));
        assert_eq!(days_until_settlement(today), 2);
        assert!(!is_settlement_day_today(today));
    }

    #[test]
    fn test_friday_settles_today_but_counts_a_full_week() {
        let friday = date(2026, 10, 16);
        assert!(is_settlement_day_today(friday));
        assert_eq!(next_settlement_date(friday), date(2026, 10, 23));
        assert_eq!(days_until_settlement(friday), 7);
    }

    #[test]
    fn test_saturday_and_thursday() {
        assert_eq!(days_until_settlement(date(2026, 10, 17)), 6);
        assert_eq!(days_until_settlement(date(2026, 10, 15)), 1);
        // Across a year boundary
        assert_eq!(next_settlement_date(date(2026, 12, 31)), date(2027, 1, 1));
    }

    #[test]
    fn test_settlement_message() {
        assert_eq!(
            settlement_message(date(2026, 10, 16)),
            "Settlement processing today"
        );
        assert_eq!(settlement_message(date(2026, 10, 15)), "Settlement tomorrow");
        assert_eq!(settlement_message(wednesday()), "Settlement in 2 days");
    }

    #[test]
    fn test_relative_day_label() {
        let today = wednesday();
        assert_eq!(relative_day_label(today, today), "Today");
        assert_eq!(relative_day_label(date(2026, 10, 15), today), "Tomorrow");
        assert_eq!(relative_day_label(date(2026, 10, 13), today), "Yesterday");
        assert_eq!(relative_day_label(date(2026, 10, 20), today), "In 6 days");
        assert_eq!(relative_day_label(date(2026, 10, 4), today), "10 days ago");
    }
}
