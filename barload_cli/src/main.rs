use barload_core::intensity::estimate_percent_1rm;
use barload_core::streak::calculate_streak_with_min;
use barload_core::*;
use chrono::{NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "barload")]
#[command(about = "Training load estimation and prescription", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override weight unit (kg or lbs)
    #[arg(long, global = true)]
    unit: Option<WeightUnit>,

    /// Override the first day of the week (0 = Sunday .. 6 = Saturday)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=6))]
    start_week_on: Option<u8>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a one-rep max from a completed set
    E1rm {
        #[arg(long)]
        weight: f64,

        #[arg(long)]
        reps: f64,

        /// brzycki, epley or hybrid
        #[arg(long, default_value = "hybrid")]
        formula: OneRepMaxFormula,

        /// The set was taken to true failure
        #[arg(long)]
        amrap: bool,
    },

    /// Prescribe a working weight from a 1RM and a set target
    Prescribe {
        #[arg(long)]
        one_rm: f64,

        /// Target reps
        #[arg(long, required_unless_present = "percent")]
        reps: Option<u32>,

        #[arg(long, conflicts_with_all = ["rir", "failure"])]
        rpe: Option<f64>,

        #[arg(long, conflicts_with = "failure")]
        rir: Option<f64>,

        /// Set is taken to failure
        #[arg(long)]
        failure: bool,

        /// Percentage of 1RM (bypasses reps and intensity)
        #[arg(long)]
        percent: Option<f64>,
    },

    /// Suggest a weight for a set from history and in-session sets
    Suggest {
        /// Workout history file (.json, .jsonl or .csv); defaults to the configured one
        #[arg(long)]
        history: Option<PathBuf>,

        /// Exercise name as logged
        #[arg(long)]
        exercise: String,

        /// Exercise database id
        #[arg(long)]
        exercise_id: Option<String>,

        /// Zero-based set index within this session
        #[arg(long, default_value_t = 0)]
        set_index: usize,

        /// Weight of each set already logged this session, in order
        #[arg(long = "previous")]
        previous: Vec<f64>,

        /// Equipment variant (machine brand, setup)
        #[arg(long)]
        tag: Option<String>,

        /// Reference 1RM for the fallback
        #[arg(long)]
        one_rm: Option<f64>,

        /// First-set target reps for the fallback
        #[arg(long)]
        reps: Option<u32>,

        /// First-set target RPE for the fallback
        #[arg(long)]
        rpe: Option<f64>,
    },

    /// Suggest rest between sets
    Rest {
        #[arg(long)]
        sets: u32,

        #[arg(long)]
        rpe: Option<f64>,

        /// Average load as %1RM
        #[arg(long)]
        percent: Option<f64>,

        /// Normalized fatigue drain (0-1)
        #[arg(long)]
        drain: Option<f64>,
    },

    /// Score a lifted total with IPF GL points
    Gl {
        #[arg(long)]
        total: f64,

        #[arg(long)]
        bodyweight: f64,

        #[arg(long, default_value = "male")]
        gender: String,

        /// classic or equipped
        #[arg(long, default_value = "classic")]
        equipment: Equipment,

        /// total, squat, bench or deadlift
        #[arg(long, default_value = "total")]
        lift: Lift,
    },

    /// Count consecutive weeks meeting the session target
    Streak {
        /// Workout history file; defaults to the configured one
        #[arg(long)]
        history: Option<PathBuf>,

        /// Evaluate as of this date instead of today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Fat-free mass index
    Ffmi {
        /// Height in cm
        #[arg(long)]
        height: f64,

        /// Bodyweight in kg
        #[arg(long)]
        weight: f64,

        /// Body fat percentage
        #[arg(long)]
        body_fat: f64,
    },

    /// Move an event date off forbidden days
    EventDate {
        #[arg(long)]
        date: NaiveDate,

        /// Weekday to avoid (mon, tue, ...); repeatable
        #[arg(long = "avoid-day")]
        avoid_days: Vec<Weekday>,

        /// Avoid the last two days of a month
        #[arg(long)]
        avoid_end_of_month: bool,
    },
}

fn main() -> Result<()> {
    // Keep stdout for results; diagnostics go to stderr
    barload_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut settings = config.settings();
    if let Some(unit) = cli.unit {
        settings.weight_unit = unit;
    }
    if let Some(start) = cli.start_week_on {
        settings.start_week_on = start;
    }

    match cli.command {
        Commands::E1rm {
            weight,
            reps,
            formula,
            amrap,
        } => cmd_e1rm(weight, reps, formula, amrap, &settings),
        Commands::Prescribe {
            one_rm,
            reps,
            rpe,
            rir,
            failure,
            percent,
        } => {
            let target = build_target(reps, rpe, rir, failure, &config);
            cmd_prescribe(one_rm, &target, percent, &settings)
        }
        Commands::Suggest {
            history,
            exercise,
            exercise_id,
            set_index,
            previous,
            tag,
            one_rm,
            reps,
            rpe,
        } => {
            let history_path = history.unwrap_or_else(|| config.data.history_file.clone());
            let first_set = build_target(reps, rpe, None, false, &config);
            let exercise = ExerciseReference {
                exercise_db_id: exercise_id,
                name: exercise,
                reference_1rm: one_rm,
                training_mode: TrainingMode::Reps,
                sets: vec![first_set],
            };
            let tag = tag.as_deref().map(VariantTag::from).unwrap_or_default();
            cmd_suggest(&history_path, &exercise, set_index, &previous, tag, &settings)
        }
        Commands::Rest {
            sets,
            rpe,
            percent,
            drain,
        } => cmd_rest(sets, rpe, percent, drain),
        Commands::Gl {
            total,
            bodyweight,
            gender,
            equipment,
            lift,
        } => {
            let options = GlOptions {
                gender,
                equipment,
                lift,
                weight_unit: settings.weight_unit,
            };
            cmd_gl(total, bodyweight, &options)
        }
        Commands::Streak { history, today } => {
            let history_path = history.unwrap_or_else(|| config.data.history_file.clone());
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            cmd_streak(&history_path, today, &settings, &config)
        }
        Commands::Ffmi {
            height,
            weight,
            body_fat,
        } => cmd_ffmi(height, weight, body_fat),
        Commands::EventDate {
            date,
            avoid_days,
            avoid_end_of_month,
        } => {
            let rules = EventDateRules {
                avoid_days_of_week: avoid_days,
                avoid_end_of_month,
            };
            cmd_event_date(date, &rules)
        }
    }
}

/// Set target from command-line intensity flags, falling back to the configured RPE
fn build_target(
    reps: Option<u32>,
    rpe: Option<f64>,
    rir: Option<f64>,
    failure: bool,
    config: &Config,
) -> SetTarget {
    let target = SetTarget {
        target_reps: reps,
        ..SetTarget::default()
    };

    if failure {
        target.with_mode(IntensityMode::Failure)
    } else if let Some(rir) = rir {
        target.with_rir(rir)
    } else {
        target.with_rpe(rpe.unwrap_or(config.training.default_rpe))
    }
}

fn cmd_e1rm(
    weight: f64,
    reps: f64,
    formula: OneRepMaxFormula,
    amrap: bool,
    settings: &Settings,
) -> Result<()> {
    let e1rm = formula.estimate(weight, reps, amrap);
    tracing::debug!("{:?} estimate for {} x {}: {}", formula, weight, reps, e1rm);

    println!("Estimated 1RM: {} {}", e1rm, settings.weight_unit);
    if let Some(percent) = estimate_percent_1rm(reps) {
        println!("  {} reps to failure ≈ {}% of 1RM", reps, percent);
    }
    Ok(())
}

fn cmd_prescribe(
    one_rm: f64,
    target: &SetTarget,
    percent: Option<f64>,
    settings: &Settings,
) -> Result<()> {
    let weight = match percent {
        Some(pct) => percent_weight(one_rm, pct, settings.weight_unit),
        None => prescribed_weight(one_rm, target, settings.weight_unit),
    };

    match weight {
        Some(w) => println!("Prescribed weight: {} {}", w, settings.weight_unit),
        None => println!("No prescription: 1RM and target reps must be positive"),
    }
    Ok(())
}

fn cmd_suggest(
    history_path: &std::path::Path,
    exercise: &ExerciseReference,
    set_index: usize,
    previous: &[f64],
    tag: VariantTag,
    settings: &Settings,
) -> Result<()> {
    let history = load_history(history_path)?;
    let completed: Vec<LoggedSet> = previous
        .iter()
        .map(|&weight| LoggedSet {
            weight,
            completed_reps: None,
            machine_brand: tag.clone(),
        })
        .collect();

    let request = SuggestionRequest {
        set_index,
        completed_sets: &completed,
        tag,
        ..SuggestionRequest::new(exercise, settings, &history)
    };

    match suggest_weight_for_set(&request) {
        Some(w) => println!("Suggested weight: {} {}", w, settings.weight_unit),
        None => println!("No suggestion: enter the weight manually"),
    }
    Ok(())
}

fn cmd_rest(sets: u32, rpe: Option<f64>, percent: Option<f64>, drain: Option<f64>) -> Result<()> {
    let seconds = suggest_rest_seconds(sets, rpe, percent, drain);
    println!("Suggested rest: {} s ({}:{:02})", seconds, seconds / 60, seconds % 60);
    Ok(())
}

fn cmd_gl(total: f64, bodyweight: f64, options: &GlOptions) -> Result<()> {
    let points = calculate_ipf_gl_points(total, bodyweight, options);
    if points == 0.0 && options.lift != Lift::Total {
        eprintln!("GL coefficients are only available for the full total");
    }
    println!("IPF GL points: {:.2}", points);
    Ok(())
}

fn cmd_streak(
    history_path: &std::path::Path,
    today: NaiveDate,
    settings: &Settings,
    config: &Config,
) -> Result<()> {
    let history = load_history(history_path)?;
    let streak = calculate_streak_with_min(
        &history,
        settings,
        today,
        config.streak.min_sessions_per_week,
    );

    let unit = if streak.streak == 1 { "week" } else { "weeks" };
    println!("Streak: {} {}", streak.streak, unit);
    Ok(())
}

fn cmd_ffmi(height: f64, weight: f64, body_fat: f64) -> Result<()> {
    match calculate_ffmi(height, weight, body_fat) {
        Some(result) => {
            println!("FFMI: {:.1}", result.ffmi);
            println!("Normalized FFMI: {:.1}", result.normalized_ffmi);
            println!("Lean body mass: {:.1} kg", result.lean_body_mass);
            println!("Category: {}", result.interpretation);
        }
        None => println!("No FFMI: height and weight must be positive, body fat non-negative"),
    }
    Ok(())
}

fn cmd_event_date(date: NaiveDate, rules: &EventDateRules) -> Result<()> {
    let resolved = resolve_event_date(date, Some(rules));
    if resolved != date {
        tracing::info!("Moved event from {} to {}", date, resolved);
    }
    println!("Event date: {}", resolved);
    Ok(())
}
