use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::{employee::Roster, utils};

use model::*;

pub mod import;
pub mod model;

/// Records are keyed by (employee, date); one canonical record per key.
pub type DayKey = (String, NaiveDate);

#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Every record the batch touched, merged with its pre-existing
    /// counterpart where one was given.
    pub records: BTreeMap<DayKey, DailyAttendanceRecord>,
    pub created: usize,
    pub updated: usize,
}

/// Folds an unordered punch batch into daily records: the earliest check-in
/// wins `in_time`, the latest check-out wins `out_time`, duplicates collapse.
/// A key already present in `existing` is merged into (counted as updated)
/// rather than replaced, so re-imports and corrections lose nothing.
///
/// The whole batch is buffered before any record is emitted; extrema cannot
/// be chosen from a partial group. One-sided groups (only check-ins or only
/// check-outs) are preserved incomplete and flow on to the calculator, which
/// pays them zero until corrected.
///
/// Events are expected to be pre-validated against the roster (the import
/// path rejects unknown ids row by row); stray ids are skipped with a trace.
pub fn merge_events(
    events: &[AttendanceEvent],
    roster: &Roster,
    existing: &BTreeMap<DayKey, DailyAttendanceRecord>,
) -> MergeOutcome {
    let mut groups: BTreeMap<DayKey, (Option<chrono::NaiveTime>, Option<chrono::NaiveTime>)> =
        BTreeMap::new();

    for event in events {
        if !roster.contains_key(&event.employee_id) {
            warn!(employee_id = %event.employee_id, "skipping punch for unknown employee");
            continue;
        }

        let group = groups.entry((event.employee_id.clone(), event.date)).or_default();
        match event.kind {
            PunchKind::CheckIn => {
                group.0 = Some(group.0.map_or(event.time, |t| t.min(event.time)));
            }
            PunchKind::CheckOut => {
                group.1 = Some(group.1.map_or(event.time, |t| t.max(event.time)));
            }
        }
    }

    let mut outcome = MergeOutcome::default();

    for ((employee_id, date), (batch_in, batch_out)) in groups {
        let key = (employee_id.clone(), date);
        let prior = existing.get(&key);

        let in_time = match (prior.and_then(|r| r.in_time), batch_in) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let out_time = match (prior.and_then(|r| r.out_time), batch_out) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };

        let shift_start = roster[&employee_id].shift.start;
        let status = match in_time {
            Some(t) if utils::is_late(t, shift_start) => DayStatus::Late,
            _ => DayStatus::Present,
        };

        let record = DailyAttendanceRecord {
            date,
            status,
            in_time,
            out_time,
            ot_hours: prior.map_or(Decimal::ZERO, |r| r.ot_hours),
            ot_multiplier: prior.map_or(Decimal::ONE, |r| r.ot_multiplier),
            deduction: prior.map_or(Decimal::ZERO, |r| r.deduction),
        };

        if prior.is_some() {
            outcome.updated += 1;
        } else {
            outcome.created += 1;
        }
        outcome.records.insert(key, record);
    }

    outcome
}
