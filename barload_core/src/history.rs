//! Read-only workout history loading.
//!
//! History is produced and persisted by the logging front end. Three file
//! layouts are accepted, chosen by extension:
//! - `.json`: an array of workout logs
//! - `.jsonl`: one workout log per line
//! - `.csv`: one row per set, grouped into logs by date and the optional
//!   `session` column (rows without it share one log per day)
//!
//! The returned logs are sorted oldest first, which is the order the
//! suggestion and streak calculators expect.

use crate::{CompletedExercise, Error, LoggedSet, Result, VariantTag, WorkoutLog};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

/// CSV row format, one logged set per row
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    exercise_name: String,
    #[serde(default)]
    exercise_db_id: Option<String>,
    #[serde(default)]
    machine_brand: Option<String>,
    /// Separates several sessions logged on the same day
    #[serde(default)]
    session: Option<String>,
    weight: f64,
    #[serde(default)]
    reps: Option<u32>,
}

/// Load workout history from a file
///
/// Returns an empty history if the file doesn't exist. Malformed lines or
/// rows are skipped with a warning; an unreadable file or an unknown
/// extension is an error.
pub fn load_history(path: &Path) -> Result<Vec<WorkoutLog>> {
    if !path.exists() {
        tracing::warn!("No history file found at {:?}", path);
        return Ok(Vec::new());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let mut logs = match extension.as_deref() {
        Some("json") => load_json(path)?,
        Some("jsonl") => load_jsonl(path)?,
        Some("csv") => load_csv(path)?,
        other => {
            return Err(Error::History(format!(
                "Unsupported history format {:?} for {:?}",
                other, path
            )))
        }
    };

    // Oldest first; logs on the same day keep their file order
    logs.sort_by_key(|log| log.date);

    tracing::info!("Loaded {} workout logs from {:?}", logs.len(), path);
    Ok(logs)
}

fn load_json(path: &Path) -> Result<Vec<WorkoutLog>> {
    let contents = std::fs::read_to_string(path)?;
    let logs: Vec<WorkoutLog> = serde_json::from_str(&contents)?;
    Ok(logs)
}

fn load_jsonl(path: &Path) -> Result<Vec<WorkoutLog>> {
    let contents = std::fs::read_to_string(path)?;
    let mut logs = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<WorkoutLog>(line) {
            Ok(log) => logs.push(log),
            Err(e) => {
                tracing::warn!("Skipping malformed history line {}: {}", line_no + 1, e);
                // Continue processing other lines
            }
        }
    }

    Ok(logs)
}

fn load_csv(path: &Path) -> Result<Vec<WorkoutLog>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut by_session: BTreeMap<SessionKey, WorkoutLog> = BTreeMap::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => add_csv_row(&mut by_session, row),
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(by_session.into_values().collect())
}

type SessionKey = (NaiveDate, Option<String>);

fn add_csv_row(by_session: &mut BTreeMap<SessionKey, WorkoutLog>, row: CsvRow) {
    let session = row.session.filter(|s| !s.is_empty());
    let log = by_session.entry((row.date, session)).or_insert_with(|| WorkoutLog {
        id: Uuid::new_v4(),
        date: row.date,
        completed_exercises: Vec::new(),
    });

    let tag = VariantTag::from(row.machine_brand);
    let exercise_db_id = row.exercise_db_id.filter(|id| !id.is_empty());

    let position = log
        .completed_exercises
        .iter()
        .position(|ex| ex.exercise_name == row.exercise_name && ex.machine_brand == tag);

    let exercise = match position {
        Some(index) => &mut log.completed_exercises[index],
        None => {
            log.completed_exercises.push(CompletedExercise {
                exercise_db_id,
                exercise_name: row.exercise_name,
                machine_brand: tag.clone(),
                sets: Vec::new(),
            });
            let last = log.completed_exercises.len() - 1;
            &mut log.completed_exercises[last]
        }
    };

    exercise.sets.push(LoggedSet {
        weight: row.weight,
        completed_reps: row.reps,
        machine_brand: tag,
    });
}
