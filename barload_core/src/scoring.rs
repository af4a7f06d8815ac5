//! IPF GoodLift (GL) points.
//!
//! Formula: `GL = total × 100 / (A − B × e^(−C × BW))` with coefficients
//! depending on gender bucket, equipment and lift. Only full-total
//! coefficients are published here; any other lift scores 0.

use crate::rounding::round_to_decimals;
use crate::WeightUnit;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Coefficient bucket used by the GL formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GenderBucket {
    Male,
    Female,
}

impl GenderBucket {
    /// Map a free-form gender string onto one of the two coefficient buckets
    ///
    /// `female` and `transfemale` use the female coefficients; every other
    /// value uses the male ones. Surrounding whitespace and letter case are
    /// ignored, so `"Female"` also selects the female bucket.
    pub fn from_gender(gender: &str) -> Self {
        match gender.trim().to_lowercase().as_str() {
            "female" | "transfemale" => GenderBucket::Female,
            _ => GenderBucket::Male,
        }
    }

    /// Lowest bodyweight (kg) fed to the formula
    fn bodyweight_floor_kg(self) -> f64 {
        match self {
            GenderBucket::Male => 40.0,
            GenderBucket::Female => 35.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    #[default]
    Classic,
    Equipped,
}

impl FromStr for Equipment {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "raw" => Ok(Equipment::Classic),
            "equipped" => Ok(Equipment::Equipped),
            other => Err(crate::Error::Other(format!("Unknown equipment: {}", other))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lift {
    #[default]
    Total,
    Bench,
    Squat,
    Deadlift,
}

impl FromStr for Lift {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "total" => Ok(Lift::Total),
            "bench" => Ok(Lift::Bench),
            "squat" => Ok(Lift::Squat),
            "deadlift" => Ok(Lift::Deadlift),
            other => Err(crate::Error::Other(format!("Unknown lift: {}", other))),
        }
    }
}

/// Options for [`calculate_ipf_gl_points`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GlOptions {
    pub gender: String,
    pub equipment: Equipment,
    pub lift: Lift,
    pub weight_unit: WeightUnit,
}

impl Default for GlOptions {
    fn default() -> Self {
        Self {
            gender: "male".into(),
            equipment: Equipment::Classic,
            lift: Lift::Total,
            weight_unit: WeightUnit::Kg,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct GlCoefficients {
    a: f64,
    b: f64,
    c: f64,
}

type CoefficientKey = (GenderBucket, Equipment, Lift);

static GL_COEFFICIENTS: Lazy<HashMap<CoefficientKey, GlCoefficients>> = Lazy::new(|| {
    HashMap::from([
        (
            (GenderBucket::Male, Equipment::Equipped, Lift::Total),
            GlCoefficients {
                a: 1236.25115,
                b: 1449.21864,
                c: 0.01644,
            },
        ),
        (
            (GenderBucket::Male, Equipment::Classic, Lift::Total),
            GlCoefficients {
                a: 1199.72839,
                b: 1025.18162,
                c: 0.00921,
            },
        ),
        (
            (GenderBucket::Female, Equipment::Equipped, Lift::Total),
            GlCoefficients {
                a: 758.63878,
                b: 949.31382,
                c: 0.02435,
            },
        ),
        (
            (GenderBucket::Female, Equipment::Classic, Lift::Total),
            GlCoefficients {
                a: 610.32796,
                b: 1045.59282,
                c: 0.03048,
            },
        ),
    ])
});

/// IPF GL points for a lifted total at a bodyweight, rounded to 2 decimals
///
/// Both inputs are in `options.weight_unit` and converted to kg. Returns 0
/// for non-positive inputs and for equipment/lift combinations without
/// published coefficients.
pub fn calculate_ipf_gl_points(total_lifted: f64, bodyweight: f64, options: &GlOptions) -> f64 {
    if total_lifted.is_nan() || bodyweight.is_nan() || total_lifted <= 0.0 || bodyweight <= 0.0 {
        return 0.0;
    }

    let bucket = GenderBucket::from_gender(&options.gender);
    let Some(coeffs) = GL_COEFFICIENTS.get(&(bucket, options.equipment, options.lift)) else {
        tracing::debug!(
            "No GL coefficients for {:?} {:?} {:?}",
            bucket,
            options.equipment,
            options.lift
        );
        return 0.0;
    };

    let total_kg = options.weight_unit.to_kg(total_lifted);
    let bodyweight_kg = options
        .weight_unit
        .to_kg(bodyweight)
        .max(bucket.bodyweight_floor_kg());

    let denominator = coeffs.a - coeffs.b * (-coeffs.c * bodyweight_kg).exp();
    if denominator == 0.0 {
        return 0.0;
    }

    round_to_decimals(total_kg * 100.0 / denominator, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_points(total: f64, bw: f64, a: f64, b: f64, c: f64) -> f64 {
        round_to_decimals(total * 100.0 / (a - b * (-c * bw).exp()), 2)
    }

    #[test]
    fn test_classic_male_total_regression() {
        let points = calculate_ipf_gl_points(500.0, 90.0, &GlOptions::default());
        assert_eq!(points, reference_points(500.0, 90.0, 1199.72839, 1025.18162, 0.00921));
        assert_eq!(points, 66.47);
    }

    #[test]
    fn test_female_buckets() {
        let options = GlOptions {
            gender: "transfemale".into(),
            ..GlOptions::default()
        };
        assert_eq!(
            calculate_ipf_gl_points(300.0, 60.0, &options),
            reference_points(300.0, 60.0, 610.32796, 1045.59282, 0.03048)
        );

        let options = GlOptions {
            gender: " Female ".into(),
            ..GlOptions::default()
        };
        assert_eq!(
            calculate_ipf_gl_points(300.0, 60.0, &options),
            reference_points(300.0, 60.0, 610.32796, 1045.59282, 0.03048)
        );

        let options = GlOptions {
            gender: "nonbinary".into(),
            ..GlOptions::default()
        };
        assert_eq!(
            calculate_ipf_gl_points(300.0, 60.0, &options),
            calculate_ipf_gl_points(300.0, 60.0, &GlOptions::default())
        );
    }

    #[test]
    fn test_equipped_coefficients() {
        let options = GlOptions {
            equipment: Equipment::Equipped,
            ..GlOptions::default()
        };
        assert_eq!(
            calculate_ipf_gl_points(700.0, 100.0, &options),
            reference_points(700.0, 100.0, 1236.25115, 1449.21864, 0.01644)
        );
    }

    #[test]
    fn test_lbs_are_converted() {
        let lbs = GlOptions {
            weight_unit: WeightUnit::Lbs,
            ..GlOptions::default()
        };
        let from_lbs = calculate_ipf_gl_points(500.0 / 0.45359237, 90.0 / 0.45359237, &lbs);
        let from_kg = calculate_ipf_gl_points(500.0, 90.0, &GlOptions::default());
        assert!((from_lbs - from_kg).abs() < 0.011);
    }

    #[test]
    fn test_bodyweight_floor() {
        let options = GlOptions::default();
        assert_eq!(
            calculate_ipf_gl_points(200.0, 20.0, &options),
            calculate_ipf_gl_points(200.0, 40.0, &options)
        );

        let female = GlOptions {
            gender: "female".into(),
            ..GlOptions::default()
        };
        assert_eq!(
            calculate_ipf_gl_points(150.0, 30.0, &female),
            calculate_ipf_gl_points(150.0, 35.0, &female)
        );
    }

    #[test]
    fn test_single_lifts_are_not_scored() {
        for lift in [Lift::Bench, Lift::Squat, Lift::Deadlift] {
            let options = GlOptions {
                lift,
                ..GlOptions::default()
            };
            assert_eq!(calculate_ipf_gl_points(200.0, 90.0, &options), 0.0);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let options = GlOptions::default();
        assert_eq!(calculate_ipf_gl_points(0.0, 90.0, &options), 0.0);
        assert_eq!(calculate_ipf_gl_points(500.0, 0.0, &options), 0.0);
        assert_eq!(calculate_ipf_gl_points(-500.0, 90.0, &options), 0.0);
    }
}
