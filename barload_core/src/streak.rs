//! Training adherence streaks counted in weeks.
//!
//! Logs are bucketed into weeks anchored on the user's first day of the
//! week. A week qualifies when it holds at least three sessions, and the
//! streak is the run of consecutive qualifying weeks ending at the current
//! (or, while it is still in progress, the previous) week.

use crate::{Settings, WorkoutLog};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sessions a week needs before it counts towards the streak
pub const MIN_SESSIONS_PER_WEEK: u32 = 3;

/// Result of a streak calculation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Streak {
    /// Consecutive qualifying weeks
    pub streak: u32,
}

/// Weekday for a 0 = Sunday .. 6 = Saturday index (wraps modulo 7)
pub fn weekday_from_sunday_index(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// The seven weekdays starting at the configured first day of the week
pub fn ordered_days_of_week(start_week_on: u8) -> Vec<Weekday> {
    std::iter::successors(Some(weekday_from_sunday_index(start_week_on)), |day| {
        Some(day.succ())
    })
    .take(7)
    .collect()
}

/// Identifier of the week containing `date`: the most recent anchor day on or before it
pub fn week_id(date: NaiveDate, start_week_on: u8) -> NaiveDate {
    let day = date.weekday().num_days_from_sunday() as i64;
    let offset = (day - (start_week_on % 7) as i64).rem_euclid(7);
    date - Duration::days(offset)
}

/// Weekly streak with the default three-session threshold
pub fn calculate_streak(history: &[WorkoutLog], settings: &Settings, today: NaiveDate) -> Streak {
    calculate_streak_with_min(history, settings, today, MIN_SESSIONS_PER_WEEK)
}

/// Weekly streak with a custom sessions-per-week threshold
pub fn calculate_streak_with_min(
    history: &[WorkoutLog],
    settings: &Settings,
    today: NaiveDate,
    min_sessions: u32,
) -> Streak {
    if history.is_empty() {
        return Streak::default();
    }

    let mut sessions_by_week: HashMap<NaiveDate, u32> = HashMap::new();
    for log in history {
        *sessions_by_week
            .entry(week_id(log.date, settings.start_week_on))
            .or_insert(0) += 1;
    }

    let qualifies = |week: NaiveDate| {
        sessions_by_week
            .get(&week)
            .is_some_and(|&count| count >= min_sessions)
    };

    let current_week = week_id(today, settings.start_week_on);
    let previous_week = current_week - Duration::days(7);

    let mut week = if qualifies(current_week) {
        current_week
    } else if qualifies(previous_week) {
        previous_week
    } else {
        tracing::debug!("Neither week {} nor {} qualifies", current_week, previous_week);
        return Streak::default();
    };

    let mut streak = 0;
    while qualifies(week) {
        streak += 1;
        week -= Duration::days(7);
    }

    Streak { streak }
}
