use std::{collections::BTreeMap, fs, fs::OpenOptions};

use chrono::Local;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, Layer, Registry, filter, fmt, layer::SubscriberExt};

mod config;
mod consts;
mod utils;

mod attendance;
mod employee;
mod payroll;

fn main() {
    let _ = dotenvy::dotenv();

    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("trace.log")
        .unwrap();

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_line_number(true)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(log_file)
                .with_filter(filter::LevelFilter::from_level(Level::TRACE))
        );

    tracing::subscriber::set_global_default(subscriber).unwrap();

    let config::Config {
        punch_file,
        roster_file,
        reference_date,
        period_selection,
        score_weights
    } = config::load();

    let roster_rows = fs::read_to_string(&roster_file).expect("Unable to read the roster file");
    let roster = employee::load_roster(&roster_rows).expect("Unable to load the roster");
    info!("loaded {} employees from {roster_file}", roster.len());

    let punch_rows = fs::read_to_string(&punch_file).expect("Unable to read the punch file");
    let outcome = attendance::import::process_import(&punch_rows, &roster, &BTreeMap::new());

    println!("{}", serde_json::to_string_pretty(&outcome.log).unwrap());

    let reference_date = reference_date.unwrap_or_else(|| Local::now().date_naive());
    let pay_period = match period_selection {
        config::PeriodSelection::CurrentToDate => payroll::period::current_period_to_date(reference_date),
        config::PeriodSelection::Previous => payroll::period::previous_period(reference_date),
    };
    info!(
        "running payroll for {} through {}",
        pay_period.start_date, pay_period.end_date
    );

    for (employee_id, employee) in &roster {
        let breakdowns = outcome
            .records
            .iter()
            .filter(|((id, date), _)| id == employee_id && pay_period.contains(*date))
            .map(|(_, record)| payroll::earning::compute_daily_earning(record, employee))
            .collect::<Vec<_>>();

        let summary = payroll::aggregate::aggregate(&breakdowns, &pay_period);
        let review = payroll::score::score(&summary, &score_weights);
        let leave = payroll::period::leave_eligibility(employee.joining_date, reference_date);

        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "employee_id": employee_id,
                "name": employee.name,
                "period": pay_period,
                "summary": summary,
                "performance": review,
                "leave_eligibility": leave,
            }))
            .unwrap()
        );
    }
}
