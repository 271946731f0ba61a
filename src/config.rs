use std::env;

use chrono::NaiveDate;
use tracing::info;

use crate::payroll::score::ScoreWeights;

/// Which pay window a batch run settles: the open period up to the
/// reference date, or the closed period before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelection {
    CurrentToDate,
    Previous,
}

pub struct Config {
    pub punch_file: String,
    pub roster_file: String,

    /// Overrides "today" for reproducible runs; defaults to the local date.
    pub reference_date: Option<NaiveDate>,

    pub period_selection: PeriodSelection,

    pub score_weights: ScoreWeights,
}

pub fn load() -> Config {
    Config {
        punch_file: load_punch_file(),
        roster_file: load_roster_file(),
        reference_date: load_reference_date(),
        period_selection: load_period_selection(),
        score_weights: load_score_weights(),
    }
}

fn load_punch_file() -> String {
    info!("Loading environment `PUNCH_FILE`");

    env::var("PUNCH_FILE").expect("Environment `PUNCH_FILE` is required to be set")
}

fn load_roster_file() -> String {
    info!("Loading environment `ROSTER_FILE`");

    env::var("ROSTER_FILE").expect("Environment `ROSTER_FILE` is required to be set")
}

fn load_reference_date() -> Option<NaiveDate> {
    info!("Loading environment `REFERENCE_DATE`");

    env::var("REFERENCE_DATE").ok().map(|var| {
        NaiveDate::parse_from_str(&var, "%Y-%m-%d")
            .expect("`REFERENCE_DATE` is not in YYYY-MM-DD format")
    })
}

fn load_period_selection() -> PeriodSelection {
    info!("Loading environment `PAY_PERIOD`");

    match env::var("PAY_PERIOD").as_deref() {
        Ok("previous") => PeriodSelection::Previous,
        Ok("current") | Err(_) => PeriodSelection::CurrentToDate,
        Ok(other) => panic!("`PAY_PERIOD` must be `current` or `previous`, got `{other}`"),
    }
}

fn load_score_weights() -> ScoreWeights {
    info!("Loading environment `SCORE_LATE_PENALTY` / `SCORE_ABSENCE_PENALTY`");

    let mut weights = ScoreWeights::default();

    if let Ok(var) = env::var("SCORE_LATE_PENALTY") {
        weights.late_penalty = var.parse().expect("`SCORE_LATE_PENALTY` is not a valid decimal");
    }
    if let Ok(var) = env::var("SCORE_ABSENCE_PENALTY") {
        weights.absence_penalty = var.parse().expect("`SCORE_ABSENCE_PENALTY` is not a valid decimal");
    }

    weights
}
