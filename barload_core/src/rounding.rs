//! Weight rounding shared by every externally visible weight output.

use crate::WeightUnit;

/// Round a value to a fixed number of decimal places
pub fn round_to_decimals(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round a weight to the nearest loadable increment for the unit
///
/// Steps are 1.25 kg or 2.5 lbs, so the result is always an exact multiple
/// of the step (quarter-kilo values such as 101.25 are kept, not shortened
/// to one decimal). Non-positive (or NaN) weights round to 0.
pub fn round_weight(weight: f64, unit: WeightUnit) -> f64 {
    if weight.is_nan() || weight <= 0.0 {
        return 0.0;
    }

    let step = unit.rounding_step();
    let rounded = (weight / step).round() * step;
    round_to_decimals(rounded, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_weight_kg_steps() {
        assert_eq!(round_weight(100.0, WeightUnit::Kg), 100.0);
        assert_eq!(round_weight(100.6, WeightUnit::Kg), 100.0);
        assert_eq!(round_weight(100.7, WeightUnit::Kg), 101.25);
        assert_eq!(round_weight(101.25, WeightUnit::Kg), 101.25);
        assert_eq!(round_weight(62.4, WeightUnit::Kg), 62.5);
        assert_eq!(round_weight(61.8, WeightUnit::Kg), 61.25);
    }

    #[test]
    fn test_round_weight_lbs_steps() {
        assert_eq!(round_weight(226.0, WeightUnit::Lbs), 225.0);
        assert_eq!(round_weight(227.0, WeightUnit::Lbs), 227.5);
        assert_eq!(round_weight(1.0, WeightUnit::Lbs), 0.0);
    }

    #[test]
    fn test_round_weight_non_positive() {
        assert_eq!(round_weight(0.0, WeightUnit::Kg), 0.0);
        assert_eq!(round_weight(-20.0, WeightUnit::Lbs), 0.0);
        assert_eq!(round_weight(f64::NAN, WeightUnit::Kg), 0.0);
    }

    #[test]
    fn test_round_weight_idempotent() {
        let mut w = 0.0;
        while w < 400.0 {
            for unit in [WeightUnit::Kg, WeightUnit::Lbs] {
                let once = round_weight(w, unit);
                assert_eq!(round_weight(once, unit), once, "not idempotent at {} {}", w, unit);
            }
            w += 0.37;
        }
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to_decimals(514.2857, 1), 514.3);
        assert_eq!(round_to_decimals(336.7349, 2), 336.73);
    }
}
