use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{consts, employee::Roster, utils};

use super::{DayKey, merge_events, model::*};

const EXPECTED_FIELDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Success,
    Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    /// 1-based input row the entry refers to, if any.
    pub row: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImportCounts {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    pub records_created: usize,
    pub records_updated: usize,
}

/// The structured log handed back to the import caller, who decides whether
/// to proceed with the committed subset.
#[derive(Debug, Default, Serialize)]
pub struct ImportLog {
    pub entries: Vec<LogEntry>,
    pub counts: ImportCounts,
}

impl ImportLog {
    fn push(&mut self, level: LogLevel, row: Option<usize>, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Error => error!(?row, "{message}"),
            LogLevel::Warn => warn!(?row, "{message}"),
            _ => info!(?row, "{message}"),
        }
        self.entries.push(LogEntry { level, row, message });
    }
}

#[derive(Debug)]
pub struct ImportOutcome {
    /// The committed records: one per (employee, date) the batch touched.
    pub records: BTreeMap<DayKey, DailyAttendanceRecord>,
    pub log: ImportLog,
}

/// Runs a bulk punch batch end to end: parse the delimited rows, reject the
/// malformed ones row by row, merge the valid subset into daily records.
/// A bad row never aborts the batch.
///
/// Row format: `empid|firstname|lastname|date(dd/mm/yyyy)|time(HH:mm)|status(0=in,1=out)`,
/// pipe- or comma-delimited. Times are parsed tolerantly, dates strictly.
pub fn process_import(
    content: &str,
    roster: &Roster,
    existing: &BTreeMap<DayKey, DailyAttendanceRecord>,
) -> ImportOutcome {
    let mut log = ImportLog::default();
    let events = parse_rows(content, roster, &mut log);

    let merged = merge_events(&events, roster, existing);
    log.counts.records_created = merged.created;
    log.counts.records_updated = merged.updated;

    if log.counts.success > 0 {
        log.push(
            LogLevel::Success,
            None,
            format!(
                "imported {} punches into {} attendance records",
                log.counts.success,
                merged.records.len()
            ),
        );
    }
    let counts = log.counts;
    log.push(
        LogLevel::Summary,
        None,
        format!(
            "total={} success={} failed={} skipped={} records_created={} records_updated={}",
            counts.total,
            counts.success,
            counts.failed,
            counts.skipped,
            counts.records_created,
            counts.records_updated
        ),
    );

    ImportOutcome { records: merged.records, log }
}

fn parse_rows(content: &str, roster: &Roster, log: &mut ImportLog) -> Vec<AttendanceEvent> {
    log.push(LogLevel::Info, None, "processing punch batch");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(utils::sniff_delimiter(content))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut events = Vec::new();
    let mut seen = HashSet::new();

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        log.counts.total += 1;

        let record = match record {
            Ok(record) => record,
            Err(err) => {
                log.counts.failed += 1;
                log.push(LogLevel::Error, Some(row), format!("unreadable row: {err}"));
                continue;
            }
        };

        match parse_row(&record, roster) {
            Ok(event) => {
                if !seen.insert((
                    event.employee_id.clone(),
                    event.date,
                    event.time,
                    event.kind,
                )) {
                    log.counts.skipped += 1;
                    log.push(
                        LogLevel::Warn,
                        Some(row),
                        format!(
                            "duplicate punch for {} on {} at {}",
                            event.employee_id,
                            event.date,
                            utils::canonical_time(event.time)
                        ),
                    );
                    continue;
                }

                log.counts.success += 1;
                events.push(event);
            }
            Err(reason) => {
                log.counts.failed += 1;
                log.push(LogLevel::Error, Some(row), reason);
            }
        }
    }

    events
}

fn parse_row(record: &csv::StringRecord, roster: &Roster) -> Result<AttendanceEvent, String> {
    if record.len() != EXPECTED_FIELDS {
        return Err(format!(
            "expected {EXPECTED_FIELDS} fields, got {}",
            record.len()
        ));
    }

    let employee_id = record[0].to_string();
    if !roster.contains_key(&employee_id) {
        return Err(format!("unknown employee id `{employee_id}`"));
    }

    let date = NaiveDate::parse_from_str(&record[3], consts::IMPORT_DATE_FORMAT)
        .map_err(|_| format!("invalid date `{}`, expected dd/mm/yyyy", &record[3]))?;

    let time =
        utils::parse_time(&record[4]).ok_or_else(|| format!("invalid time `{}`", &record[4]))?;

    let kind = match &record[5] {
        "0" => PunchKind::CheckIn,
        "1" => PunchKind::CheckOut,
        other => return Err(format!("status flag must be 0 or 1, got `{other}`")),
    };

    Ok(AttendanceEvent { employee_id, date, time, kind })
}
