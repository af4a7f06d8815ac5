//! Working-weight prescription from a reference 1RM.

use crate::intensity::effective_reps;
use crate::one_rep_max::weight_from_1rm_hybrid;
use crate::rounding::{round_to_decimals, round_weight};
use crate::{IntensityMode, SetTarget, WeightUnit};

/// Weight to load for a set target given a reference 1RM
///
/// Percent targets load `1RM × percentage / 100` directly. Otherwise the
/// target's effective reps (target reps plus RPE/RIR) are fed to the
/// inverse hybrid formula and the result is rounded to the unit's plate
/// step. Returns None if the 1RM or target reps are not positive, or if
/// nothing loadable comes out.
pub fn prescribed_weight(reference_1rm: f64, target: &SetTarget, unit: WeightUnit) -> Option<f64> {
    if reference_1rm.is_nan() || reference_1rm <= 0.0 {
        return None;
    }
    if target.intensity_mode == IntensityMode::Percent {
        if let Some(percentage) = target.target_percentage_rm {
            return percent_weight(reference_1rm, percentage, unit);
        }
    }

    let reps = effective_reps(target)?;

    let weight = weight_from_1rm_hybrid(reference_1rm, reps);
    if weight <= 0.0 {
        return None;
    }

    let rounded = round_weight(weight, unit);
    (rounded > 0.0).then_some(rounded)
}

/// Weight for a percentage-of-1RM target, rounded to the plate step
pub fn percent_weight(reference_1rm: f64, percentage: f64, unit: WeightUnit) -> Option<f64> {
    if reference_1rm.is_nan() || percentage.is_nan() || reference_1rm <= 0.0 || percentage <= 0.0 {
        return None;
    }

    let rounded = round_weight(reference_1rm * percentage / 100.0, unit);
    (rounded > 0.0).then_some(rounded)
}

/// Scale a base weight by a load factor, one decimal
pub fn calculate_dynamic_load(base_weight: f64, factor: f64) -> f64 {
    round_to_decimals(base_weight * factor, 1)
}

/// Ratio of a current value to its reference (1.0 when the reference is zero)
pub fn calculate_dynamic_ratio(current: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 1.0;
    }
    current / reference
}
