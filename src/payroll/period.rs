use chrono::{Datelike as _, Months, NaiveDate};

use crate::consts::{LEAVE_ELIGIBILITY_DAYS, PAY_PERIOD_END_DAY, PAY_PERIOD_START_DAY};

use super::model::{LeaveEligibility, PayPeriod};

/// The company month containing `reference`: on or after the 18th the
/// period runs [18th this month, 17th next month], before it
/// [18th previous month, 17th this month].
pub fn current_period(reference: NaiveDate) -> PayPeriod {
    let start = if reference.day() >= PAY_PERIOD_START_DAY {
        reference.with_day(PAY_PERIOD_START_DAY).unwrap()
    } else {
        (reference - Months::new(1)).with_day(PAY_PERIOD_START_DAY).unwrap()
    };

    PayPeriod {
        start_date: start,
        end_date: (start + Months::new(1)).with_day(PAY_PERIOD_END_DAY).unwrap(),
    }
}

/// The current period for "to date" queries: an open period never reports
/// days that haven't happened yet.
pub fn current_period_to_date(reference: NaiveDate) -> PayPeriod {
    let period = current_period(reference);

    PayPeriod {
        start_date: period.start_date,
        end_date: period.end_date.min(reference),
    }
}

/// The closed period immediately before the current one.
pub fn previous_period(reference: NaiveDate) -> PayPeriod {
    let current = current_period(reference);

    PayPeriod {
        start_date: current.start_date - Months::new(1),
        end_date: current.start_date.pred_opt().unwrap(),
    }
}

/// Leave opens up after 90 days of service. `days_until_eligible` feeds the
/// UI messaging for employees still waiting.
pub fn leave_eligibility(joining_date: NaiveDate, reference: NaiveDate) -> LeaveEligibility {
    let days_served = (reference - joining_date).num_days();

    LeaveEligibility {
        eligible: days_served >= LEAVE_ELIGIBILITY_DAYS,
        days_until_eligible: (LEAVE_ELIGIBILITY_DAYS - days_served).max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_current_period_before_the_18th() {
        let period = current_period(date(2026, 2, 10));

        assert_eq!(period.start_date, date(2026, 1, 18));
        assert_eq!(period.end_date, date(2026, 2, 17));
    }

    #[test]
    fn test_current_period_on_and_after_the_18th() {
        let period = current_period(date(2026, 2, 20));
        assert_eq!(period.start_date, date(2026, 2, 18));
        assert_eq!(period.end_date, date(2026, 3, 17));

        let boundary = current_period(date(2026, 2, 18));
        assert_eq!(boundary.start_date, date(2026, 2, 18));
    }

    #[test]
    fn test_current_period_across_year_end() {
        let period = current_period(date(2026, 1, 5));

        assert_eq!(period.start_date, date(2025, 12, 18));
        assert_eq!(period.end_date, date(2026, 1, 17));
    }

    #[test]
    fn test_open_period_is_clamped_to_reference() {
        let period = current_period_to_date(date(2026, 2, 10));

        assert_eq!(period.start_date, date(2026, 1, 18));
        assert_eq!(period.end_date, date(2026, 2, 10));

        // A closed period is untouched
        let closed = current_period_to_date(date(2026, 2, 17));
        assert_eq!(closed.end_date, date(2026, 2, 17));
    }

    #[test]
    fn test_previous_period() {
        let period = previous_period(date(2026, 2, 20));

        assert_eq!(period.start_date, date(2026, 1, 18));
        assert_eq!(period.end_date, date(2026, 2, 17));
    }

    #[test]
    fn test_leave_eligibility() {
        let reference = date(2026, 2, 10);

        let eligible = leave_eligibility(reference - chrono::Days::new(100), reference);
        assert!(eligible.eligible);
        assert_eq!(eligible.days_until_eligible, 0);

        let waiting = leave_eligibility(reference - chrono::Days::new(50), reference);
        assert!(!waiting.eligible);
        assert_eq!(waiting.days_until_eligible, 40);

        let boundary = leave_eligibility(reference - chrono::Days::new(90), reference);
        assert!(boundary.eligible);
    }
}
