//! History-driven subcommands (suggest, streak).
//!
//! These tests write history files in each supported layout and check
//! that suggestions and streaks are computed from them, and that damaged
//! files degrade gracefully.

use assert_cmd::Command;
use chrono::{Duration, NaiveDate};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn setup_test_dir() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "").expect("Failed to write config");
    (temp_dir, config_path)
}

fn cli(config_path: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("barload"));
    cmd.arg("--config").arg(config_path);
    cmd
}

fn squat_log(date: NaiveDate, weight: f64, brand: Option<&str>) -> Value {
    json!({
        "id": uuid::Uuid::new_v4(),
        "date": date,
        "completed_exercises": [{
            "exercise_db_id": "db_back_squat",
            "exercise_name": "Sentadilla",
            "machine_brand": brand,
            "sets": [
                {"weight": weight, "completed_reps": 5},
                {"weight": weight, "completed_reps": 5}
            ]
        }]
    })
}

fn write_json(path: &Path, logs: &[Value]) {
    fs::write(path, serde_json::to_string_pretty(logs).unwrap()).unwrap();
}

#[test]
fn test_suggest_stagnant_history_bumps() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("history.json");
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    write_json(
        &history,
        &[
            squat_log(start, 100.0, None),
            squat_log(start + Duration::days(3), 100.0, None),
            squat_log(start + Duration::days(6), 100.0, None),
        ],
    );

    cli(&config)
        .args(["suggest", "--exercise", "Sentadilla", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested weight: 101.25 kg"));
}

#[test]
fn test_suggest_respects_tag() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("history.json");
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    write_json(
        &history,
        &[
            squat_log(start, 140.0, Some("Smith")),
            squat_log(start + Duration::days(3), 100.0, None),
        ],
    );

    cli(&config)
        .args(["suggest", "--exercise", "Sentadilla", "--tag", "Smith", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested weight: 140 kg"));
}

#[test]
fn test_suggest_carries_previous_set() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("history.json");
    write_json(&history, &[]);

    cli(&config)
        .args([
            "suggest",
            "--exercise",
            "Sentadilla",
            "--set-index",
            "1",
            "--previous",
            "102",
            "--history",
        ])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested weight: 102.5 kg"));
}

#[test]
fn test_suggest_falls_back_to_one_rm() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("empty.json");
    write_json(&history, &[]);

    cli(&config)
        .args([
            "suggest",
            "--exercise",
            "Press Banca",
            "--one-rm",
            "140",
            "--reps",
            "5",
            "--rpe",
            "8",
            "--history",
        ])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested weight: 116.25 kg"));
}

#[test]
fn test_suggest_without_data() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("missing.json");

    cli(&config)
        .args(["suggest", "--exercise", "Remo", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("No suggestion"));
}

#[test]
fn test_suggest_from_csv_history() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("history.csv");
    fs::write(
        &history,
        "date,exercise_name,exercise_db_id,machine_brand,weight,reps\n\
         2024-03-01,Sentadilla,,,90,5\n\
         2024-03-04,Sentadilla,,,92.5,5\n\
         2024-03-04,Sentadilla,,,92.5,5\n",
    )
    .unwrap();

    cli(&config)
        .args(["suggest", "--exercise", "Sentadilla", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested weight: 92.5 kg"));
}

#[test]
fn test_streak_from_jsonl() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("history.jsonl");

    // Three sessions in each of the weeks starting 2024-03-11, 03-04 and 02-26
    let mondays = ["2024-03-11", "2024-03-04", "2024-02-26"];
    let mut lines = Vec::new();
    for monday in mondays {
        let monday: NaiveDate = monday.parse().unwrap();
        for offset in [0, 2, 4] {
            lines.push(squat_log(monday + Duration::days(offset), 100.0, None).to_string());
        }
    }
    lines.push("{ truncated".to_string());
    fs::write(&history, lines.join("\n")).unwrap();

    cli(&config)
        .args(["streak", "--today", "2024-03-15", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 3 weeks"));
}

#[test]
fn test_streak_week_start_override() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("history.json");
    // Saturday, Sunday, Monday
    let dates = ["2024-03-09", "2024-03-10", "2024-03-11"];
    let logs: Vec<Value> = dates
        .iter()
        .map(|d| squat_log(d.parse().unwrap(), 100.0, None))
        .collect();
    write_json(&history, &logs);

    cli(&config)
        .args(["streak", "--today", "2024-03-12", "--start-week-on", "6", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 1 week"));

    cli(&config)
        .args(["streak", "--today", "2024-03-12", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 0 weeks"));
}

#[test]
fn test_corrupt_json_history_fails() {
    let (dir, config) = setup_test_dir();
    let history = dir.path().join("history.json");
    fs::write(&history, "[{ \"date\": ").unwrap();

    cli(&config)
        .args(["streak", "--history"])
        .arg(&history)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Json"));
}
