//! Placement of scheduled events (tests, meets) around forbidden dates.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Maximum number of one-day pushes before giving up
pub const MAX_DATE_ADVANCES: u32 = 30;

/// Days at the end of a month that `avoid_end_of_month` rules out
const END_OF_MONTH_DAYS: u32 = 2;

/// Dates an event must not land on
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EventDateRules {
    #[serde(default)]
    pub avoid_days_of_week: Vec<Weekday>,
    #[serde(default)]
    pub avoid_end_of_month: bool,
}

impl EventDateRules {
    /// Whether `date` breaks any of the rules
    pub fn conflicts_with(&self, date: NaiveDate) -> bool {
        if self.avoid_days_of_week.contains(&date.weekday()) {
            return true;
        }
        self.avoid_end_of_month && date.day() + END_OF_MONTH_DAYS > last_day_of_month(date)
    }
}

/// Number of the last day in the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Push `target` forward one day at a time until no rule is violated
///
/// Gives up after [`MAX_DATE_ADVANCES`] pushes and returns the date reached,
/// even if it still conflicts.
pub fn resolve_event_date(target: NaiveDate, rules: Option<&EventDateRules>) -> NaiveDate {
    let Some(rules) = rules else {
        return target;
    };

    let mut resolved = target;
    for _ in 0..MAX_DATE_ADVANCES {
        if !rules.conflicts_with(resolved) {
            return resolved;
        }
        resolved += Duration::days(1);
    }

    tracing::debug!(
        "Event date still conflicts after {} days, keeping {}",
        MAX_DATE_ADVANCES,
        resolved
    );
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_rules_keeps_date() {
        assert_eq!(resolve_event_date(date(2024, 5, 31), None), date(2024, 5, 31));
        assert_eq!(
            resolve_event_date(date(2024, 5, 31), Some(&EventDateRules::default())),
            date(2024, 5, 31)
        );
    }

    #[test]
    fn test_avoid_weekend() {
        let rules = EventDateRules {
            avoid_days_of_week: vec![Weekday::Sat, Weekday::Sun],
            avoid_end_of_month: false,
        };
        // 2024-03-16 is a Saturday
        assert_eq!(resolve_event_date(date(2024, 3, 16), Some(&rules)), date(2024, 3, 18));
        assert_eq!(resolve_event_date(date(2024, 3, 14), Some(&rules)), date(2024, 3, 14));
    }

    #[test]
    fn test_avoid_end_of_month() {
        let rules = EventDateRules {
            avoid_days_of_week: vec![],
            avoid_end_of_month: true,
        };
        assert_eq!(resolve_event_date(date(2024, 3, 30), Some(&rules)), date(2024, 4, 1));
        assert_eq!(resolve_event_date(date(2024, 3, 29), Some(&rules)), date(2024, 3, 29));
        // leap February: 28th and 29th are the last two days
        assert_eq!(resolve_event_date(date(2024, 2, 28), Some(&rules)), date(2024, 3, 1));
        assert_eq!(resolve_event_date(date(2023, 12, 30), Some(&rules)), date(2024, 1, 1));
    }

    #[test]
    fn test_combined_rules() {
        let rules = EventDateRules {
            avoid_days_of_week: vec![Weekday::Mon],
            avoid_end_of_month: true,
        };
        // 2024-06-29 (Sat) and 30 (Sun) are month end, 2024-07-01 is a Monday
        assert_eq!(resolve_event_date(date(2024, 6, 29), Some(&rules)), date(2024, 7, 2));
    }

    #[test]
    fn test_unsatisfiable_rules_stop_after_cap() {
        let rules = EventDateRules {
            avoid_days_of_week: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            avoid_end_of_month: false,
        };
        let start = date(2024, 1, 10);
        assert_eq!(
            resolve_event_date(start, Some(&rules)),
            start + Duration::days(MAX_DATE_ADVANCES as i64)
        );
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2024, 2, 10)), 29);
        assert_eq!(last_day_of_month(date(2023, 2, 10)), 28);
        assert_eq!(last_day_of_month(date(2024, 12, 1)), 31);
        assert_eq!(last_day_of_month(date(2024, 4, 30)), 30);
    }

    #[test]
    fn test_rules_from_json() {
        let rules: EventDateRules =
            serde_json::from_str(r#"{"avoid_days_of_week": ["Sun"], "avoid_end_of_month": true}"#)
                .unwrap();
        assert_eq!(rules.avoid_days_of_week, vec![Weekday::Sun]);
        assert!(rules.avoid_end_of_month);
    }
}
