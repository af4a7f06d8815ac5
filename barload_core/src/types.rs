//! Core domain types for the load prescription engine.
//!
//! This module defines the value records passed into the calculators:
//! - Units and intensity notations
//! - Set targets and logged sets
//! - Exercise references and workout history
//! - User settings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Units
// ============================================================================

const KG_PER_LB: f64 = 0.45359237;

/// Unit the user logs weights in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Smallest plate increment used when rounding prescribed weights
    pub fn rounding_step(self) -> f64 {
        match self {
            WeightUnit::Kg => 1.25,
            WeightUnit::Lbs => 2.5,
        }
    }

    /// Convert a value expressed in this unit to kilograms
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }
}

impl FromStr for WeightUnit {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "kg" | "kgs" => Ok(WeightUnit::Kg),
            "lb" | "lbs" => Ok(WeightUnit::Lbs),
            other => Err(crate::Error::Other(format!("Unknown weight unit: {}", other))),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lbs => write!(f, "lbs"),
        }
    }
}

// ============================================================================
// Set Targets
// ============================================================================

/// How the intensity of a set is expressed
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntensityMode {
    #[default]
    Rpe,
    Rir,
    Failure,
    Amrap,
    SoloRm,
    Approx,
    Percent,
}

impl IntensityMode {
    /// Modes where the set is taken to failure, so target reps are reps-to-failure
    pub fn is_to_failure(self) -> bool {
        matches!(
            self,
            IntensityMode::Failure | IntensityMode::Amrap | IntensityMode::SoloRm
        )
    }
}

/// Planned target for a single set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct SetTarget {
    #[serde(default)]
    pub target_reps: Option<u32>,
    #[serde(default)]
    pub target_rpe: Option<f64>,
    #[serde(default)]
    pub target_rir: Option<f64>,
    #[serde(default)]
    pub target_percentage_rm: Option<f64>,
    #[serde(default)]
    pub intensity_mode: IntensityMode,
}

impl SetTarget {
    pub fn reps(reps: u32) -> Self {
        Self {
            target_reps: Some(reps),
            ..Self::default()
        }
    }

    pub fn with_rpe(mut self, rpe: f64) -> Self {
        self.target_rpe = Some(rpe);
        self.intensity_mode = IntensityMode::Rpe;
        self
    }

    pub fn with_rir(mut self, rir: f64) -> Self {
        self.target_rir = Some(rir);
        self.intensity_mode = IntensityMode::Rir;
        self
    }

    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.target_percentage_rm = Some(percentage);
        self.intensity_mode = IntensityMode::Percent;
        self
    }

    pub fn with_mode(mut self, mode: IntensityMode) -> Self {
        self.intensity_mode = mode;
        self
    }
}

// ============================================================================
// Variant Tags
// ============================================================================

/// Equipment variant a set was performed on (machine brand, setup, etc.)
///
/// History is partitioned by tag. `Base` is what untagged sets carry and is
/// what a lookup uses when the caller has not selected a variant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum VariantTag {
    #[default]
    Base,
    Named(String),
}

impl From<Option<String>> for VariantTag {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) => VariantTag::from(name.as_str()),
            None => VariantTag::Base,
        }
    }
}

impl From<&str> for VariantTag {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == "Base" {
            VariantTag::Base
        } else {
            VariantTag::Named(trimmed.to_string())
        }
    }
}

impl From<VariantTag> for Option<String> {
    fn from(tag: VariantTag) -> Self {
        match tag {
            VariantTag::Base => None,
            VariantTag::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantTag::Base => write!(f, "Base"),
            VariantTag::Named(name) => write!(f, "{}", name),
        }
    }
}

// ============================================================================
// History
// ============================================================================

/// A set as it was logged (partial reps already stripped)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggedSet {
    pub weight: f64,
    #[serde(default)]
    pub completed_reps: Option<u32>,
    #[serde(default)]
    pub machine_brand: VariantTag,
}

impl LoggedSet {
    pub fn new(weight: f64, completed_reps: Option<u32>) -> Self {
        Self {
            weight,
            completed_reps,
            machine_brand: VariantTag::Base,
        }
    }
}

/// One exercise inside a logged workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletedExercise {
    #[serde(default)]
    pub exercise_db_id: Option<String>,
    pub exercise_name: String,
    #[serde(default)]
    pub machine_brand: VariantTag,
    #[serde(default)]
    pub sets: Vec<LoggedSet>,
}

impl CompletedExercise {
    /// Whether this entry refers to the given exercise (by database id or by name)
    pub fn is_for(&self, exercise: &ExerciseReference) -> bool {
        let same_id = match (&self.exercise_db_id, &exercise.exercise_db_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        same_id || self.exercise_name == exercise.name
    }
}

/// A logged workout session. History slices are ordered oldest first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLog {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed_exercises: Vec<CompletedExercise>,
}

// ============================================================================
// Exercises
// ============================================================================

/// How an exercise is programmed
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    #[default]
    Reps,
    Time,
    Percent,
}

/// An exercise as planned in the current session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ExerciseReference {
    #[serde(default)]
    pub exercise_db_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub reference_1rm: Option<f64>,
    #[serde(default)]
    pub training_mode: TrainingMode,
    #[serde(default)]
    pub sets: Vec<SetTarget>,
}

/// Cached per-exercise metadata maintained by the caller
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ExerciseInfo {
    #[serde(default)]
    pub calculated_1rm: Option<f64>,
}

/// Planned exercise used for session duration estimates
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct PlannedExercise {
    pub work_sets: u32,
    #[serde(default)]
    pub warmup_sets: u32,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub compound: bool,
}

// ============================================================================
// Settings
// ============================================================================

/// User settings the calculators depend on
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub weight_unit: WeightUnit,
    /// 0 = Sunday .. 6 = Saturday
    pub start_week_on: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kg,
            start_week_on: 1,
        }
    }
}
