#![forbid(unsafe_code)]

//! Training load estimation and prescription engine.
//!
//! This crate provides:
//! - 1RM estimation (Brzycki, Epley, hybrid) and the inverse formulas
//! - RPE/RIR/%1RM conversions and working-weight prescription
//! - History-based weight suggestions with stagnation detection
//! - Rest-time advice, IPF GL points, weekly streaks, FFMI
//! - Event date placement around forbidden dates
//! - Configuration, logging and read-only history loading
//!
//! Every calculator is a pure function over plain values. Degenerate input
//! produces a sentinel (`0.0` or `None`) instead of an error.

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod history;
pub mod rounding;
pub mod one_rep_max;
pub mod intensity;
pub mod prescription;
pub mod suggestion;
pub mod rest;
pub mod scoring;
pub mod streak;
pub mod body_composition;
pub mod calendar;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use history::load_history;
pub use rounding::round_weight;
pub use one_rep_max::{
    calculate_brzycki_1rm, calculate_epley_1rm, calculate_hybrid_1rm, weight_from_1rm,
    weight_from_1rm_epley, weight_from_1rm_hybrid, OneRepMaxFormula,
};
pub use intensity::{effective_reps, estimate_percent_1rm, rir_to_rpe, rpe_to_rir};
pub use prescription::{percent_weight, prescribed_weight};
pub use suggestion::{suggest_weight_for_set, SuggestionRequest, WeightTrend};
pub use rest::{estimate_session_duration_minutes, suggest_rest_seconds};
pub use scoring::{calculate_ipf_gl_points, Equipment, GlOptions, Lift};
pub use streak::{calculate_streak, Streak};
pub use body_composition::{calculate_ffmi, Ffmi, FfmiCategory};
pub use calendar::{resolve_event_date, EventDateRules};
