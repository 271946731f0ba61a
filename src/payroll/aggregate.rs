use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::attendance::model::DayStatus;

use super::model::{DailyEarningBreakdown, PayPeriod, PayrollSummary};

/// Folds daily breakdowns over a pay period into one summary. Every calendar
/// day in the window is classified exactly once: dates missing from the
/// input are synthesized as zero-earning Absent days before folding (the
/// canonical period-level "missing day means absent" rule). Weekends are not
/// excluded; every calendar day counts toward `total_working_days`.
///
/// A breakdown outside the window, a date supplied twice, or a negative
/// earning reaching the fold is a programming error upstream and panics
/// rather than being silently absorbed.
pub fn aggregate(breakdowns: &[DailyEarningBreakdown], period: &PayPeriod) -> PayrollSummary {
    let mut by_date: BTreeMap<NaiveDate, &DailyEarningBreakdown> = BTreeMap::new();

    for breakdown in breakdowns {
        assert!(
            period.contains(breakdown.date),
            "breakdown for {} is outside the period",
            breakdown.date
        );
        assert!(
            by_date.insert(breakdown.date, breakdown).is_none(),
            "day {} classified twice",
            breakdown.date
        );
    }

    let mut summary = PayrollSummary {
        base_salary: Decimal::ZERO,
        total_ot_amount: Decimal::ZERO,
        total_deduction: Decimal::ZERO,
        net_salary: Decimal::ZERO,
        total_working_days: period.day_count(),
        present_days: 0,
        late_days: 0,
        absent_days: 0,
        leave_days: 0,
    };

    for date in period.days() {
        let synthesized;
        let day = match by_date.get(&date) {
            Some(breakdown) => *breakdown,
            None => {
                synthesized = DailyEarningBreakdown::absent(date);
                &synthesized
            }
        };

        assert!(
            day.final_day_earning >= Decimal::ZERO,
            "negative earning reached the fold on {date}"
        );

        summary.base_salary += day.base_pay;
        summary.total_ot_amount += day.ot_amount;
        summary.total_deduction += day.deduction;

        match day.status {
            DayStatus::Present => summary.present_days += 1,
            DayStatus::Late => summary.late_days += 1,
            DayStatus::Leave => summary.leave_days += 1,
            DayStatus::Absent => summary.absent_days += 1,
        }
    }

    summary.net_salary = summary.base_salary + summary.total_ot_amount - summary.total_deduction;

    debug_assert_eq!(
        summary.present_days + summary.late_days + summary.absent_days + summary.leave_days,
        summary.total_working_days,
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn breakdown(day: u32, status: DayStatus, base_pay: Decimal, ot: Decimal, deduction: Decimal) -> DailyEarningBreakdown {
        DailyEarningBreakdown {
            date: date(day),
            status,
            hours_worked: dec!(9),
            base_pay,
            ot_amount: ot,
            deduction,
            final_day_earning: (base_pay + ot - deduction).max(dec!(0)),
        }
    }

    #[test]
    fn test_fold_totals_and_day_counts() {
        // 18th-24th: a one-week window
        let period = PayPeriod { start_date: date(18), end_date: date(24) };

        let breakdowns = vec![
            breakdown(18, DayStatus::Present, dec!(900), dec!(150), dec!(50)),
            breakdown(19, DayStatus::Late, dec!(900), dec!(0), dec!(0)),
            breakdown(20, DayStatus::Leave, dec!(900), dec!(0), dec!(200)),
            breakdown(21, DayStatus::Present, dec!(900), dec!(0), dec!(0)),
        ];

        let summary = aggregate(&breakdowns, &period);

        assert_eq!(summary.base_salary, dec!(3600));
        assert_eq!(summary.total_ot_amount, dec!(150));
        assert_eq!(summary.total_deduction, dec!(250));
        assert_eq!(summary.net_salary, dec!(3500));

        assert_eq!(summary.total_working_days, 7);
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.leave_days, 1);
        // 22nd-24th had no breakdowns: synthesized as Absent
        assert_eq!(summary.absent_days, 3);
    }

    #[test]
    fn test_every_day_is_classified_exactly_once() {
        let period = PayPeriod { start_date: date(18), end_date: date(31) };
        let breakdowns = vec![breakdown(20, DayStatus::Present, dec!(900), dec!(0), dec!(0))];

        let summary = aggregate(&breakdowns, &period);

        assert_eq!(
            summary.present_days + summary.late_days + summary.absent_days + summary.leave_days,
            summary.total_working_days
        );
    }

    #[test]
    fn test_net_salary_additivity() {
        let period = PayPeriod { start_date: date(18), end_date: date(20) };
        let breakdowns = vec![
            breakdown(18, DayStatus::Present, dec!(2272.73), dec!(340.91), dec!(100)),
            breakdown(19, DayStatus::Present, dec!(2272.73), dec!(0), dec!(0)),
        ];

        let summary = aggregate(&breakdowns, &period);

        assert_eq!(
            summary.net_salary,
            summary.base_salary + summary.total_ot_amount - summary.total_deduction
        );
        assert_eq!(summary.net_salary, dec!(4786.37));
    }

    #[test]
    fn test_empty_input_is_all_absent() {
        let period = PayPeriod { start_date: date(18), end_date: date(24) };

        let summary = aggregate(&[], &period);

        assert_eq!(summary.absent_days, 7);
        assert_eq!(summary.net_salary, dec!(0));
    }

    #[test]
    #[should_panic(expected = "classified twice")]
    fn test_duplicate_date_fails_loudly() {
        let period = PayPeriod { start_date: date(18), end_date: date(24) };
        let breakdowns = vec![
            breakdown(18, DayStatus::Present, dec!(900), dec!(0), dec!(0)),
            breakdown(18, DayStatus::Late, dec!(900), dec!(0), dec!(0)),
        ];

        aggregate(&breakdowns, &period);
    }

    #[test]
    #[should_panic(expected = "outside the period")]
    fn test_out_of_window_date_fails_loudly() {
        let period = PayPeriod { start_date: date(18), end_date: date(24) };
        let breakdowns = vec![breakdown(3, DayStatus::Present, dec!(900), dec!(0), dec!(0))];

        aggregate(&breakdowns, &period);
    }
}
