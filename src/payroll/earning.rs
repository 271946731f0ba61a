use rust_decimal::Decimal;

use crate::{
    attendance::model::{DailyAttendanceRecord, DayStatus},
    employee::EmployeeConfig,
    utils,
};

use super::model::DailyEarningBreakdown;

/// Turns one canonical daily record into its earning breakdown. Pure: the
/// config snapshot is an argument, so a salary or shift edit only affects
/// days computed after it, and recomputing with a stored snapshot reproduces
/// a historical breakdown exactly.
///
/// Base pay for a worked day follows the *scheduled shift duration*, not the
/// clocked duration; time beyond the shift is compensated only through the
/// record's explicit overtime fields. `hours_worked` still reports the
/// clocked duration.
pub fn compute_daily_earning(
    record: &DailyAttendanceRecord,
    employee: &EmployeeConfig,
) -> DailyEarningBreakdown {
    assert!(record.ot_hours >= Decimal::ZERO, "negative ot_hours on {}", record.date);
    assert!(record.deduction >= Decimal::ZERO, "negative deduction on {}", record.date);

    let rate = employee.effective_hourly_rate();

    let (hours_worked, base_pay, ot_amount, deduction) = match record.status {
        DayStatus::Absent => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),

        // Leave is paid as a full scheduled shift, no overtime; a deduction
        // on the record (e.g. an unpaid-leave partial charge) still applies
        DayStatus::Leave => {
            let hours = employee.shift.scheduled_hours();
            (hours, hours * rate, Decimal::ZERO, record.deduction)
        }

        DayStatus::Present | DayStatus::Late => match (record.in_time, record.out_time) {
            (Some(in_time), Some(out_time)) => {
                let hours =
                    utils::duration_hours(in_time, out_time, employee.shift.is_overnight());
                let base_pay = employee.shift.scheduled_hours() * rate;
                let ot_amount = record.ot_hours * rate * record.ot_multiplier;
                (hours, base_pay, ot_amount, record.deduction)
            }
            // Incomplete punch pair: zero pay until corrected, never an
            // estimate from partial data
            _ => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, record.deduction),
        },
    };

    assert!(base_pay >= Decimal::ZERO, "negative base pay on {}", record.date);
    assert!(ot_amount >= Decimal::ZERO, "negative ot amount on {}", record.date);

    DailyEarningBreakdown {
        date: record.date,
        status: record.status,
        hours_worked,
        base_pay,
        ot_amount,
        deduction,
        final_day_earning: (base_pay + ot_amount - deduction).max(Decimal::ZERO),
    }
}
