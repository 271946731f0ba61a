use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::attendance::model::DayStatus;

/// One company month: the 18th through the 17th of the following month.
/// The end is clamped to the reference date while the period is still open.
/// Immutable once computed for a given reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PayPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Every calendar day in the window, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start_date.iter_days().take_while(move |date| *date <= self.end_date)
    }

    pub fn day_count(&self) -> u32 {
        (self.end_date - self.start_date).num_days() as u32 + 1
    }
}

/// Derived per-day earning, never stored independently of its record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEarningBreakdown {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub hours_worked: Decimal,
    pub base_pay: Decimal,
    pub ot_amount: Decimal,
    pub deduction: Decimal,
    pub final_day_earning: Decimal,
}

impl DailyEarningBreakdown {
    /// The zero-earning day synthesized for any date in a query window with
    /// no attendance record.
    pub fn absent(date: NaiveDate) -> Self {
        Self {
            date,
            status: DayStatus::Absent,
            hours_worked: Decimal::ZERO,
            base_pay: Decimal::ZERO,
            ot_amount: Decimal::ZERO,
            deduction: Decimal::ZERO,
            final_day_earning: Decimal::ZERO,
        }
    }
}

/// Period totals for one employee. `net_salary` is exactly
/// `base_salary + total_ot_amount - total_deduction`, and the four day
/// counts partition every calendar day of the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSummary {
    pub base_salary: Decimal,
    pub total_ot_amount: Decimal,
    pub total_deduction: Decimal,
    pub net_salary: Decimal,
    pub total_working_days: u32,
    pub present_days: u32,
    pub late_days: u32,
    pub absent_days: u32,
    pub leave_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEligibility {
    pub eligible: bool,
    /// Zero once eligible; otherwise how many days of service remain.
    pub days_until_eligible: i64,
}
