use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    CheckIn,
    CheckOut,
}

/// One raw punch from a bulk feed. Exists only during import; once merged
/// into a [`DailyAttendanceRecord`] it is never the system of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub employee_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub kind: PunchKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Present,
    Late,
    Leave,
    Absent,
}

/// Canonical record per (employee, date). Clock times are present iff the
/// day was worked (Present or Late); Leave and Absent days never carry them.
/// Records are only ever superseded by correction requests, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAttendanceRecord {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
    pub ot_hours: Decimal,
    pub ot_multiplier: Decimal,
    pub deduction: Decimal,
}
