//! Inter-set rest advice and session length estimates.

use crate::PlannedExercise;

const MIN_REST_SECONDS: f64 = 60.0;
const MAX_REST_SECONDS: f64 = 300.0;
const REST_INCREMENT_SECONDS: f64 = 30.0;

/// Fatigue drain above which extra rest is granted
const HIGH_DRAIN_THRESHOLD: f64 = 0.5;

/// Clamp to [60, 300] and round to the nearest 30 s so the timer reads 2:00, 2:30, 3:00…
fn round_rest(seconds: f64) -> u32 {
    let clamped = seconds.clamp(MIN_REST_SECONDS, MAX_REST_SECONDS);
    ((clamped / REST_INCREMENT_SECONDS).round() * REST_INCREMENT_SECONDS) as u32
}

/// Suggested rest between sets, in seconds
///
/// # Arguments
/// * `sets_count` - Number of working sets planned for the exercise
/// * `avg_rpe` - Average target RPE (assumed 8 when unknown)
/// * `avg_percent_1rm` - Average load as %1RM (assumed 0 when unknown)
/// * `drain` - Normalized fatigue drain from the fatigue model, if available
///
/// # Returns
/// Seconds in [60, 300], a multiple of 30
pub fn suggest_rest_seconds(
    sets_count: u32,
    avg_rpe: Option<f64>,
    avg_percent_1rm: Option<f64>,
    drain: Option<f64>,
) -> u32 {
    let rpe = avg_rpe.unwrap_or(8.0).clamp(0.0, 10.0);
    let percent = avg_percent_1rm.unwrap_or(0.0).clamp(0.0, 100.0);

    let near_failure = rpe >= 9.0;
    let near_max = percent >= 85.0;
    let high_intensity = rpe >= 8.0 || percent >= 80.0;

    let mut seconds = if near_failure || near_max {
        180.0
    } else if high_intensity {
        165.0
    } else if sets_count > 6 {
        120.0
    } else if sets_count <= 3 {
        180.0
    } else {
        150.0
    };

    if drain.is_some_and(|d| d > HIGH_DRAIN_THRESHOLD) {
        seconds += REST_INCREMENT_SECONDS;
    }

    round_rest(seconds)
}

const SEC_PER_WORK_SET: u32 = 40;
const SEC_PER_WARMUP_SET: u32 = 45;
const SEC_SETUP_COMPOUND: u32 = 20;
const SEC_TRANSITION: u32 = 45;
const DEFAULT_REST_SECONDS: u32 = 90;

/// Estimated session length in whole minutes (at least 1)
///
/// Counts work and warm-up sets, rest between work sets (capped at 5 min),
/// setup time for compound lifts and transitions between exercises.
pub fn estimate_session_duration_minutes(exercises: &[PlannedExercise]) -> u32 {
    let total_seconds: u32 = exercises
        .iter()
        .enumerate()
        .map(|(i, exercise)| {
            let rest = exercise
                .rest_seconds
                .unwrap_or(DEFAULT_REST_SECONDS)
                .min(MAX_REST_SECONDS as u32);
            let work = exercise.work_sets;

            let setup = if exercise.compound {
                work * SEC_SETUP_COMPOUND
            } else {
                0
            };
            let transition = if i > 0 { SEC_TRANSITION } else { 0 };

            work * SEC_PER_WORK_SET
                + work.saturating_sub(1) * rest
                + exercise.warmup_sets * SEC_PER_WARMUP_SET
                + setup
                + transition
        })
        .sum();

    ((total_seconds as f64 / 60.0).round() as u32).max(1)
}
