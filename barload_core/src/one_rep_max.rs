//! One-rep-max estimation and its inverse.
//!
//! Three formulas are available:
//! - Brzycki: accurate up to ~10 reps
//! - Epley: better for 11-20 reps
//! - Hybrid: Brzycki ≤10, Epley 11-20, damped extrapolation above 20
//!
//! Partial reps must be stripped by the caller before estimating. They add
//! fatigue, not strength signal.

use crate::rounding::round_to_decimals;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reps beyond which Brzycki is clamped (the formula diverges at 37)
const BRZYCKI_MAX_REPS: f64 = 30.0;

/// Reps beyond which the hybrid extrapolation is clamped
const HYBRID_MAX_REPS: f64 = 50.0;

/// Multiplier rewarding a true all-out set over a fixed-rep submaximal set
const AMRAP_BONUS: f64 = 1.025;

/// Minimum reps for the AMRAP bonus to apply
const AMRAP_BONUS_MIN_REPS: f64 = 3.0;

/// Selectable e1RM formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OneRepMaxFormula {
    Brzycki,
    Epley,
    #[default]
    Hybrid,
}

impl OneRepMaxFormula {
    /// Estimate 1RM from a completed set
    pub fn estimate(self, weight: f64, reps: f64, is_amrap: bool) -> f64 {
        match self {
            OneRepMaxFormula::Brzycki => calculate_brzycki_1rm(weight, reps, is_amrap),
            OneRepMaxFormula::Epley => calculate_epley_1rm(weight, reps, is_amrap),
            OneRepMaxFormula::Hybrid => calculate_hybrid_1rm(weight, reps, is_amrap),
        }
    }

    /// Weight that can be lifted for `reps` reps to failure given a 1RM
    pub fn weight_for(self, e1rm: f64, reps: f64) -> f64 {
        match self {
            OneRepMaxFormula::Brzycki => weight_from_1rm(e1rm, reps),
            OneRepMaxFormula::Epley => weight_from_1rm_epley(e1rm, reps),
            OneRepMaxFormula::Hybrid => weight_from_1rm_hybrid(e1rm, reps),
        }
    }
}

impl FromStr for OneRepMaxFormula {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "brzycki" => Ok(OneRepMaxFormula::Brzycki),
            "epley" => Ok(OneRepMaxFormula::Epley),
            "hybrid" => Ok(OneRepMaxFormula::Hybrid),
            other => Err(crate::Error::Other(format!("Unknown 1RM formula: {}", other))),
        }
    }
}

fn is_degenerate(weight: f64, reps: f64) -> bool {
    weight.is_nan() || reps.is_nan() || weight <= 0.0 || reps <= 0.0
}

fn finish_estimate(e1rm: f64, reps: f64, is_amrap: bool) -> f64 {
    let e1rm = if is_amrap && reps > AMRAP_BONUS_MIN_REPS {
        e1rm * AMRAP_BONUS
    } else {
        e1rm
    };
    round_to_decimals(e1rm, 1)
}

fn brzycki_factor(reps: f64) -> f64 {
    36.0 / (37.0 - reps)
}

fn epley_factor(reps: f64) -> f64 {
    1.0 + reps / 30.0
}

fn extrapolation_factor(reps: f64) -> f64 {
    epley_factor(20.0) * (1.0 + (reps - 20.0) / 80.0).powf(0.9)
}

/// Hybrid multiplier for a rep count already clamped to [1, 50]
fn hybrid_factor(reps: f64) -> f64 {
    if reps <= 10.0 {
        brzycki_factor(reps)
    } else if reps <= 20.0 {
        epley_factor(reps)
    } else {
        extrapolation_factor(reps)
    }
}

/// Estimated 1RM with the Brzycki formula: `weight × 36 / (37 − reps)`
///
/// Reps are capped at 30. A single rep returns the weight unchanged, and
/// non-positive weight or reps return 0. Rounded to one decimal.
pub fn calculate_brzycki_1rm(weight: f64, reps: f64, is_amrap: bool) -> f64 {
    if is_degenerate(weight, reps) {
        return 0.0;
    }
    if reps == 1.0 {
        return weight;
    }

    let r = reps.min(BRZYCKI_MAX_REPS);
    finish_estimate(weight * brzycki_factor(r), reps, is_amrap)
}

/// Estimated 1RM with the Epley formula: `weight × (1 + reps/30)`
pub fn calculate_epley_1rm(weight: f64, reps: f64, is_amrap: bool) -> f64 {
    if is_degenerate(weight, reps) {
        return 0.0;
    }
    if reps == 1.0 {
        return weight;
    }

    finish_estimate(weight * epley_factor(reps), reps, is_amrap)
}

/// Estimated 1RM choosing the formula by rep bracket
///
/// - reps ≤ 10: Brzycki
/// - reps 11-20: Epley
/// - reps > 20: `weight × (1 + 20/30) × (1 + (reps − 20)/80)^0.9`, capped at 50 reps
pub fn calculate_hybrid_1rm(weight: f64, reps: f64, is_amrap: bool) -> f64 {
    if is_degenerate(weight, reps) {
        return 0.0;
    }
    if reps == 1.0 {
        return weight;
    }

    let r = reps.min(HYBRID_MAX_REPS);
    finish_estimate(weight * hybrid_factor(r), reps, is_amrap)
}

/// Inverse Brzycki: weight for `reps` reps to failure (not rounded)
pub fn weight_from_1rm(e1rm: f64, reps: f64) -> f64 {
    if is_degenerate(e1rm, reps) {
        return 0.0;
    }
    if reps == 1.0 {
        return e1rm;
    }

    let r = reps.min(BRZYCKI_MAX_REPS);
    (e1rm / brzycki_factor(r)).max(0.0)
}

/// Inverse Epley, rounded to one decimal
pub fn weight_from_1rm_epley(e1rm: f64, reps: f64) -> f64 {
    if is_degenerate(e1rm, reps) {
        return 0.0;
    }
    if reps == 1.0 {
        return e1rm;
    }

    round_to_decimals(e1rm / epley_factor(reps), 1).max(0.0)
}

/// Inverse of [`calculate_hybrid_1rm`] on the same rep brackets, rounded to one decimal
pub fn weight_from_1rm_hybrid(e1rm: f64, reps: f64) -> f64 {
    if is_degenerate(e1rm, reps) {
        return 0.0;
    }
    if reps == 1.0 {
        return e1rm;
    }

    let r = reps.min(HYBRID_MAX_REPS);
    round_to_decimals(e1rm / hybrid_factor(r), 1).max(0.0)
}
