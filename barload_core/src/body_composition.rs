//! Fat-free mass index (FFMI).
//!
//! `FFMI = lean mass / height²`, plus the height-normalized variant
//! `FFMI + 6.1 × (1.8 − height)` that compares lifters of different height
//! against a 1.8 m reference.

use crate::rounding::round_to_decimals;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference height (m) used for normalization
const REFERENCE_HEIGHT_M: f64 = 1.8;

/// FFMI change per metre of height difference
const HEIGHT_CORRECTION: f64 = 6.1;

/// Interpretation band of a normalized FFMI
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum FfmiCategory {
    /// Below 20
    Novice,
    /// 20 to below 22
    Average,
    /// 22 to below 26
    Excellent,
    /// 26 and above
    Elite,
}

impl FfmiCategory {
    pub fn from_normalized(normalized_ffmi: f64) -> Self {
        if normalized_ffmi >= 26.0 {
            FfmiCategory::Elite
        } else if normalized_ffmi >= 22.0 {
            FfmiCategory::Excellent
        } else if normalized_ffmi >= 20.0 {
            FfmiCategory::Average
        } else {
            FfmiCategory::Novice
        }
    }

    /// Label shown to users
    pub fn label(self) -> &'static str {
        match self {
            FfmiCategory::Novice => "Novato",
            FfmiCategory::Average => "Promedio",
            FfmiCategory::Excellent => "Excelente",
            FfmiCategory::Elite => "Superior/Elite",
        }
    }
}

impl fmt::Display for FfmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// FFMI result, values rounded to one decimal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Ffmi {
    pub ffmi: f64,
    pub normalized_ffmi: f64,
    pub interpretation: FfmiCategory,
    /// Lean body mass in kg
    pub lean_body_mass: f64,
}

/// Compute FFMI from height (cm), weight (kg) and body fat (%)
///
/// Returns None for non-positive height or weight and for negative body fat.
pub fn calculate_ffmi(height_cm: f64, weight_kg: f64, body_fat_percent: f64) -> Option<Ffmi> {
    if height_cm.is_nan() || weight_kg.is_nan() || body_fat_percent.is_nan() {
        return None;
    }
    if height_cm <= 0.0 || weight_kg <= 0.0 || body_fat_percent < 0.0 {
        return None;
    }

    let height_m = height_cm / 100.0;
    let lean_body_mass = weight_kg * (1.0 - body_fat_percent / 100.0);
    let ffmi = lean_body_mass / (height_m * height_m);
    let normalized_ffmi = ffmi + HEIGHT_CORRECTION * (REFERENCE_HEIGHT_M - height_m);

    Some(Ffmi {
        ffmi: round_to_decimals(ffmi, 1),
        normalized_ffmi: round_to_decimals(normalized_ffmi, 1),
        interpretation: FfmiCategory::from_normalized(normalized_ffmi),
        lean_body_mass: round_to_decimals(lean_body_mass, 1),
    })
}
