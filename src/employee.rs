use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{consts, utils};

/// Scheduled shift. An end earlier than the start denotes an overnight shift;
/// the scheduled duration is computed modulo 24h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftConfig {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ShiftConfig {
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    pub fn scheduled_hours(&self) -> Decimal {
        utils::duration_hours(self.start, self.end, self.is_overnight())
    }
}

/// Exactly one variant is active per employee. Loose transport payloads are
/// mapped into this union once, at the boundary, and validated there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SalaryConfig {
    Hourly { rate: Decimal },
    Monthly { amount: Decimal },
}

/// The configuration snapshot every calculation takes as an argument.
/// Calculators never reach into ambient state for "today" or "current user".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeConfig {
    pub employee_id: String,
    pub name: String,
    pub shift: ShiftConfig,
    pub salary: SalaryConfig,
    pub joining_date: NaiveDate,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("shift start and end cannot be the same time")]
    ZeroLengthShift,

    #[error("hourly rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    #[error("monthly amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}

impl EmployeeConfig {
    /// Boundary check. A config that fails here must never reach a
    /// calculator; missing or non-positive amounts are rejected, not
    /// defaulted to zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shift.start == self.shift.end {
            return Err(ConfigError::ZeroLengthShift);
        }

        match self.salary {
            SalaryConfig::Hourly { rate } if rate <= Decimal::ZERO => {
                Err(ConfigError::NonPositiveRate(rate))
            }
            SalaryConfig::Monthly { amount } if amount <= Decimal::ZERO => {
                Err(ConfigError::NonPositiveAmount(amount))
            }
            _ => Ok(()),
        }
    }

    /// Hourly employees are paid their configured rate. Monthly salaries are
    /// pro-rated over the scheduled shift hours across the standard working
    /// days of a period. Derived from the snapshot on every call, never
    /// persisted as the employee's rate of record.
    pub fn effective_hourly_rate(&self) -> Decimal {
        match self.salary {
            SalaryConfig::Hourly { rate } => rate,
            SalaryConfig::Monthly { amount } => {
                amount / (self.shift.scheduled_hours() * Decimal::from(consts::STANDARD_WORKING_DAYS))
            }
        }
    }
}

/// Employee configs keyed by id, ordered for deterministic batch output.
pub type Roster = BTreeMap<String, EmployeeConfig>;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("unable to read roster: {0}")]
    Read(#[from] csv::Error),

    #[error("roster row {row}: {reason}")]
    Row { row: usize, reason: String },

    #[error("roster row {row}: {source}")]
    Config { row: usize, source: ConfigError },
}

/// Loads `empid|name|shift_start|shift_end|salary_kind|amount|joining_date`
/// rows. Unlike the punch import, a bad roster row is fatal: payroll cannot
/// run against a half-loaded roster.
pub fn load_roster(content: &str) -> Result<Roster, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(utils::sniff_delimiter(content))
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut roster = Roster::new();

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record?;

        let reject = |reason: &str| RosterError::Row { row, reason: reason.to_string() };

        if record.len() != 7 {
            return Err(reject("expected 7 fields"));
        }

        let employee_id = record[0].to_string();
        if employee_id.is_empty() {
            return Err(reject("empty employee id"));
        }

        let shift = ShiftConfig {
            start: utils::parse_time(&record[2]).ok_or_else(|| reject("invalid shift start"))?,
            end: utils::parse_time(&record[3]).ok_or_else(|| reject("invalid shift end"))?,
        };

        let amount: Decimal = record[5].parse().map_err(|_| reject("invalid salary amount"))?;
        let salary = match &record[4] {
            "hourly" => SalaryConfig::Hourly { rate: amount },
            "monthly" => SalaryConfig::Monthly { amount },
            other => {
                return Err(RosterError::Row {
                    row,
                    reason: format!("unknown salary kind `{other}`"),
                });
            }
        };

        let joining_date = NaiveDate::parse_from_str(&record[6], consts::IMPORT_DATE_FORMAT)
            .map_err(|_| reject("invalid joining date, expected dd/mm/yyyy"))?;

        let employee = EmployeeConfig {
            employee_id: employee_id.clone(),
            name: record[1].to_string(),
            shift,
            salary,
            joining_date,
        };
        employee.validate().map_err(|source| RosterError::Config { row, source })?;

        if roster.insert(employee_id, employee).is_some() {
            return Err(reject("duplicate employee id"));
        }
    }

    Ok(roster)
}
