//! Weight suggestion for the next set of an exercise.
//!
//! Decision order (first match wins):
//!
//! 1. **Percent programming**: exercise trains by %1RM and a reference 1RM
//!    and target percentage exist → `1RM × %`
//! 2. **Carry forward**: not the first set and the previous set this
//!    session was logged with a load → reuse that load
//! 3. **History**: first set → most recent first-set load for the same
//!    exercise and variant tag, bumped one plate step if stagnant
//! 4. **1RM fallback**: reference 1RM and the first set's target intensity
//! 5. Nothing known → None (caller leaves the field blank)

use crate::prescription::{percent_weight, prescribed_weight};
use crate::rounding::round_weight;
use crate::{
    ExerciseInfo, ExerciseReference, LoggedSet, SetTarget, Settings, TrainingMode, VariantTag,
    WorkoutLog,
};

/// How many past sessions are inspected for the first-set suggestion
pub const HISTORY_LOOKBACK: usize = 5;

/// Sessions at the same load needed before the load is considered stagnant
pub const STAGNATION_WINDOW: usize = 3;

/// Loads closer than this are treated as unchanged
const SAME_WEIGHT_TOLERANCE: f64 = 0.1;

/// Target reps assumed by the 1RM fallback when the first set has none
const FALLBACK_TARGET_REPS: u32 = 8;

/// Everything the suggester looks at for one set
#[derive(Clone, Debug)]
pub struct SuggestionRequest<'a> {
    pub exercise: &'a ExerciseReference,
    pub exercise_info: Option<&'a ExerciseInfo>,
    /// Zero-based index of the set within this session
    pub set_index: usize,
    /// Sets of this exercise already logged in this session
    pub completed_sets: &'a [LoggedSet],
    pub settings: &'a Settings,
    /// Full workout history, oldest first
    pub history: &'a [WorkoutLog],
    pub tag: VariantTag,
    /// 1RM measured earlier in this session (e.g. a calibration AMRAP)
    pub session_1rm_override: Option<f64>,
}

impl<'a> SuggestionRequest<'a> {
    pub fn new(
        exercise: &'a ExerciseReference,
        settings: &'a Settings,
        history: &'a [WorkoutLog],
    ) -> Self {
        Self {
            exercise,
            exercise_info: None,
            set_index: 0,
            completed_sets: &[],
            settings,
            history,
            tag: VariantTag::Base,
            session_1rm_override: None,
        }
    }

    /// First positive 1RM among the session override, cached info and the exercise itself
    pub fn reference_1rm(&self) -> Option<f64> {
        [
            self.session_1rm_override,
            self.exercise_info.and_then(|info| info.calculated_1rm),
            self.exercise.reference_1rm,
        ]
        .into_iter()
        .flatten()
        .find(|&rm| rm > 0.0)
    }
}

/// Direction of recent first-set loads (most recent first)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightTrend {
    /// Fewer sessions than the stagnation window
    Insufficient,
    Stagnant,
    /// Moved inside the window but ended where it started
    Flat,
    Rising,
    Falling,
}

/// Classify recent loads, ordered most recent first
pub fn classify_trend(recent_weights: &[f64]) -> WeightTrend {
    if recent_weights.len() < STAGNATION_WINDOW {
        return WeightTrend::Insufficient;
    }

    let latest = recent_weights[0];
    let window = &recent_weights[..STAGNATION_WINDOW];
    let oldest = window[STAGNATION_WINDOW - 1];

    if window
        .iter()
        .all(|w| (w - latest).abs() < SAME_WEIGHT_TOLERANCE)
    {
        WeightTrend::Stagnant
    } else if (latest - oldest).abs() < SAME_WEIGHT_TOLERANCE {
        WeightTrend::Flat
    } else if latest > oldest {
        WeightTrend::Rising
    } else {
        WeightTrend::Falling
    }
}

/// First-set loads of an exercise under a tag, most recent first, at most `limit`
pub fn recent_first_set_weights(
    exercise: &ExerciseReference,
    history: &[WorkoutLog],
    tag: &VariantTag,
    limit: usize,
) -> Vec<f64> {
    history
        .iter()
        .rev()
        .filter_map(|log| {
            log.completed_exercises
                .iter()
                .find(|completed| completed.is_for(exercise))
        })
        .filter(|completed| &completed.machine_brand == tag)
        .filter_map(|completed| completed.sets.first().map(|set| set.weight))
        .filter(|&weight| weight > 0.0)
        .take(limit)
        .collect()
}

/// Suggest a load for the requested set
///
/// Every returned weight is rounded to the plate step for the user's unit.
pub fn suggest_weight_for_set(request: &SuggestionRequest<'_>) -> Option<f64> {
    let unit = request.settings.weight_unit;
    let exercise = request.exercise;
    let reference_1rm = request.reference_1rm();

    // 1. Percent programming
    if exercise.training_mode == TrainingMode::Percent {
        let percentage = exercise
            .sets
            .get(request.set_index)
            .and_then(|set| set.target_percentage_rm);
        if let (Some(rm), Some(pct)) = (reference_1rm, percentage) {
            if let Some(weight) = percent_weight(rm, pct, unit) {
                tracing::debug!("{}: {}% of {} → {}", exercise.name, pct, rm, weight);
                return Some(weight);
            }
        }
    }

    // 2. Carry forward the previous set of this session
    if request.set_index > 0 {
        if let Some(previous) = request.completed_sets.get(request.set_index - 1) {
            if previous.weight > 0.0 {
                tracing::debug!(
                    "{}: carrying forward {} from set {}",
                    exercise.name,
                    previous.weight,
                    request.set_index
                );
                return Some(round_weight(previous.weight, unit));
            }
        }
    }

    // 3. First set: recent history under the same tag
    if request.set_index == 0 {
        let recent =
            recent_first_set_weights(exercise, request.history, &request.tag, HISTORY_LOOKBACK);

        if let Some(&latest) = recent.first() {
            let trend = classify_trend(&recent);
            let bump = if trend == WeightTrend::Stagnant {
                unit.rounding_step()
            } else {
                0.0
            };

            tracing::debug!(
                "{} [{}]: last {} over {} sessions, trend {:?}, bump {}",
                exercise.name,
                request.tag,
                latest,
                recent.len(),
                trend,
                bump
            );
            return Some(round_weight(latest + bump, unit));
        }
    }

    // 4. Reference 1RM with the first set's target intensity
    if let Some(rm) = reference_1rm {
        let mut target: SetTarget = exercise.sets.first().cloned().unwrap_or_default();
        if target.target_reps.unwrap_or(0) == 0 {
            target.target_reps = Some(FALLBACK_TARGET_REPS);
        }

        let weight = prescribed_weight(rm, &target, unit);
        tracing::debug!("{}: 1RM fallback from {} → {:?}", exercise.name, rm, weight);
        return weight;
    }

    tracing::debug!("{}: no data for a suggestion", exercise.name);
    None
}
