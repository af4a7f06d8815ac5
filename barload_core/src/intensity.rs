//! Conversions between intensity notations (RPE, RIR, %1RM).
//!
//! The key quantity is *effective reps*: the reps-to-failure implied by a
//! target rep count plus its RPE/RIR. That value, not the raw target reps,
//! feeds the inverse 1RM formulas so intensity drives the prescribed weight.

use crate::SetTarget;

/// RPE assumed when a set target carries no intensity at all
pub const DEFAULT_RPE: f64 = 8.0;

/// %1RM by reps-to-failure, index 0 = 1 rep
const REP_TO_PERCENT_1RM: [u32; 15] = [100, 95, 93, 90, 87, 85, 83, 80, 77, 75, 73, 70, 68, 67, 65];

/// Reps in reserve implied by an RPE
pub fn rpe_to_rir(rpe: f64) -> f64 {
    (10.0 - rpe.max(0.0)).max(0.0)
}

/// RPE implied by a reps-in-reserve value
pub fn rir_to_rpe(rir: f64) -> f64 {
    (10.0 - rir.max(0.0)).max(0.0)
}

fn positive_target_reps(target: &SetTarget) -> Option<f64> {
    target
        .target_reps
        .filter(|&reps| reps > 0)
        .map(|reps| reps as f64)
}

/// Reps-to-failure for a set target
///
/// Resolution order:
/// 1. Failure/AMRAP/solo-RM modes: target reps
/// 2. RIR present: target reps + RIR
/// 3. RPE present: target reps + (10 − RPE)
/// 4. Otherwise assume RPE 8: target reps + 2
///
/// Returns None when target reps are missing or zero, or when the result
/// is not positive.
pub fn effective_reps(target: &SetTarget) -> Option<f64> {
    let reps = positive_target_reps(target)?;

    let effective = if target.intensity_mode.is_to_failure() {
        reps
    } else if let Some(rir) = target.target_rir {
        reps + rir
    } else if let Some(rpe) = target.target_rpe {
        reps + (10.0 - rpe)
    } else {
        reps + rpe_to_rir(DEFAULT_RPE)
    };

    (effective > 0.0).then_some(effective)
}

/// Reps-to-failure only when the target states its intensity explicitly
///
/// Unlike [`effective_reps`] this does not assume RPE 8, and only the
/// `failure` mode counts as to-failure.
pub fn effective_reps_for_rm(target: &SetTarget) -> Option<f64> {
    let reps = positive_target_reps(target)?;

    if target.intensity_mode == crate::IntensityMode::Failure {
        return Some(reps);
    }
    if let Some(rir) = target.target_rir {
        return Some(reps + rir);
    }
    target.target_rpe.map(|rpe| reps + (10.0 - rpe))
}

/// Approximate %1RM for a number of reps to failure
///
/// Uses a lookup table for 1-15 reps and the inverse Epley relation above
/// that. Returns None below one rep.
pub fn estimate_percent_1rm(reps_to_failure: f64) -> Option<u32> {
    let rounded = reps_to_failure.round();
    if rounded >= 1.0 && rounded <= REP_TO_PERCENT_1RM.len() as f64 {
        return Some(REP_TO_PERCENT_1RM[rounded as usize - 1]);
    }
    if reps_to_failure > 15.0 {
        return Some((100.0 / (1.0 + reps_to_failure / 30.0)).round() as u32);
    }
    None
}

/// Key grouping sets with the same rep/intensity target
///
/// Zero or missing values render as `x` (reps render as `0`).
pub fn rep_debt_context_key(target: &SetTarget) -> String {
    let show = |value: Option<f64>| match value {
        Some(v) if v != 0.0 => v.to_string(),
        _ => "x".to_string(),
    };

    format!(
        "reps-{}-rpe-{}-rir-{}",
        target.target_reps.unwrap_or(0),
        show(target.target_rpe),
        show(target.target_rir)
    )
}
