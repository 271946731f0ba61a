use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::model::PayrollSummary;

/// Scoring policy. The penalties and rating bands are business parameters,
/// deliberately kept out of the formula itself; `Default` carries the
/// company's standard values and the environment can override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Fraction of a day deducted per late day.
    pub late_penalty: Decimal,
    /// Fraction of a day deducted per absent day.
    pub absence_penalty: Decimal,
    pub excellent_threshold: Decimal,
    pub good_threshold: Decimal,
    pub average_threshold: Decimal,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            late_penalty: dec!(0.5),
            absence_penalty: dec!(1.0),
            excellent_threshold: dec!(90),
            good_threshold: dec!(75),
            average_threshold: dec!(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Average,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReview {
    pub performance_score: Decimal,
    pub rating: Rating,
}

/// Scores aggregated attendance on a 0-100 scale: the attended-day ratio
/// (leave counts as attended) minus the configured late and absence
/// penalties, then banded into a rating.
pub fn score(summary: &PayrollSummary, weights: &ScoreWeights) -> PerformanceReview {
    let performance_score = if summary.total_working_days == 0 {
        Decimal::ZERO
    } else {
        let attended = Decimal::from(summary.present_days + summary.late_days + summary.leave_days);
        let raw = attended
            - weights.late_penalty * Decimal::from(summary.late_days)
            - weights.absence_penalty * Decimal::from(summary.absent_days);

        (raw * dec!(100) / Decimal::from(summary.total_working_days))
            .clamp(Decimal::ZERO, dec!(100))
    };

    let rating = if performance_score >= weights.excellent_threshold {
        Rating::Excellent
    } else if performance_score >= weights.good_threshold {
        Rating::Good
    } else if performance_score >= weights.average_threshold {
        Rating::Average
    } else {
        Rating::Poor
    };

    PerformanceReview { performance_score, rating }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(present: u32, late: u32, leave: u32, absent: u32) -> PayrollSummary {
        PayrollSummary {
            base_salary: dec!(0),
            total_ot_amount: dec!(0),
            total_deduction: dec!(0),
            net_salary: dec!(0),
            total_working_days: present + late + leave + absent,
            present_days: present,
            late_days: late,
            absent_days: absent,
            leave_days: leave,
        }
    }

    #[test]
    fn test_perfect_attendance_is_excellent() {
        let review = score(&summary(20, 0, 0, 0), &ScoreWeights::default());

        assert_eq!(review.performance_score, dec!(100));
        assert_eq!(review.rating, Rating::Excellent);
    }

    #[test]
    fn test_leave_counts_as_attended() {
        let review = score(&summary(18, 0, 2, 0), &ScoreWeights::default());

        assert_eq!(review.performance_score, dec!(100));
    }

    #[test]
    fn test_late_and_absent_days_pull_the_score_down() {
        // 16 present, 2 late, 2 absent over 20 days:
        // (18 - 0.5*2 - 1.0*2) / 20 = 75%
        let review = score(&summary(16, 2, 0, 2), &ScoreWeights::default());

        assert_eq!(review.performance_score, dec!(75));
        assert_eq!(review.rating, Rating::Good);
    }

    #[test]
    fn test_rating_bands() {
        let weights = ScoreWeights::default();

        assert_eq!(score(&summary(19, 0, 0, 1), &weights).rating, Rating::Excellent); // 90
        assert_eq!(score(&summary(18, 0, 0, 2), &weights).rating, Rating::Good); // 80
        assert_eq!(score(&summary(17, 0, 0, 3), &weights).rating, Rating::Average); // 70
        assert_eq!(score(&summary(13, 0, 0, 7), &weights).rating, Rating::Poor); // 30
    }

    #[test]
    fn test_score_is_clamped_at_zero() {
        let review = score(&summary(0, 0, 0, 20), &ScoreWeights::default());

        assert_eq!(review.performance_score, dec!(0));
        assert_eq!(review.rating, Rating::Poor);
    }

    #[test]
    fn test_zero_day_window() {
        let review = score(&summary(0, 0, 0, 0), &ScoreWeights::default());

        assert_eq!(review.performance_score, dec!(0));
        assert_eq!(review.rating, Rating::Poor);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights { late_penalty: dec!(0), ..ScoreWeights::default() };

        // Lateness free of charge under these weights
        let review = score(&summary(10, 10, 0, 0), &weights);
        assert_eq!(review.performance_score, dec!(100));
    }
}
