//! FIRE (financial independence) horizon estimation
//!
//! The FIRE number is annual expenses divided by the safe withdrawal rate, in
//! today's money. Investments are compounded one year at a time, with the
//! year's savings added after growth, until they first reach the FIRE number
//! inflated to that year.

use crate::assumptions::Assumptions;
use crate::error::{
    ensure_above_total_loss, ensure_non_negative, offset_year, or_overflow, ValidationError,
};
use crate::snapshot::FinancialSnapshot;
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default search horizon in years
pub const DEFAULT_MAX_YEARS: u32 = 50;

/// Whether the FIRE number is reached within the search horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FireOutcome {
    /// First simulated year in which investments reach the inflated target
    Achieved { years: u32, target_year: i32 },
    /// Target not reached within the horizon under the given assumptions
    NotAchievable,
}

/// Result of a FIRE estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireResult {
    /// Annual expenses / withdrawal rate, in today's money
    pub fire_number: Decimal,
    pub current_investments: Decimal,
    pub annual_expenses: Decimal,
    pub outcome: FireOutcome,
    /// Annual savings / 12 when achievable, zero otherwise
    pub monthly_savings_needed: Decimal,
    /// Current investments as a fraction of the FIRE number, clamped to [0, 1]
    pub current_progress: f64,
}

impl FireResult {
    pub fn is_achievable(&self) -> bool {
        matches!(self.outcome, FireOutcome::Achieved { .. })
    }

    /// Investments already cover the FIRE number today
    pub fn is_already_fire(&self) -> bool {
        self.current_progress >= 1.0
    }

    /// Years until FIRE, or -1 when not achievable
    pub fn years_to_fire(&self) -> i32 {
        match self.outcome {
            FireOutcome::Achieved { years, .. } => i32::try_from(years).unwrap_or(i32::MAX),
            FireOutcome::NotAchievable => -1,
        }
    }

    /// Calendar year of FIRE, or -1 when not achievable
    pub fn fire_year(&self) -> i32 {
        match self.outcome {
            FireOutcome::Achieved { target_year, .. } => target_year,
            FireOutcome::NotAchievable => -1,
        }
    }
}

/// Estimate the year investable assets first cover the inflation-adjusted FIRE number.
///
/// `annual_savings` may be negative (net drawdown); the search still stops
/// after `max_years`. Not reaching the target is reported through
/// [`FireOutcome::NotAchievable`], never as an error.
pub fn estimate_fire(
    current_investments: Decimal,
    annual_savings: Decimal,
    annual_expenses: Decimal,
    expected_return: Decimal,
    withdrawal_rate: Decimal,
    inflation_rate: Decimal,
    max_years: u32,
    as_of: NaiveDate,
) -> Result<FireResult, ValidationError> {
    if withdrawal_rate <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveWithdrawalRate(withdrawal_rate));
    }
    if max_years == 0 {
        return Err(ValidationError::ZeroHorizon { field: "max_years" });
    }
    ensure_non_negative("current_investments", current_investments)?;
    ensure_non_negative("annual_expenses", annual_expenses)?;
    ensure_above_total_loss("expected_return", expected_return)?;
    ensure_above_total_loss("inflation_rate", inflation_rate)?;

    let fire_number = or_overflow("fire_number", annual_expenses.checked_div(withdrawal_rate))?;
    let growth = or_overflow("expected_return", Decimal::ONE.checked_add(expected_return))?;
    let inflation = or_overflow("inflation_rate", Decimal::ONE.checked_add(inflation_rate))?;

    let mut investments = current_investments;
    let mut inflated_target = fire_number;
    let mut outcome = FireOutcome::NotAchievable;

    for year in 1..=max_years {
        investments = or_overflow(
            "investments",
            investments
                .checked_mul(growth)
                .and_then(|grown| grown.checked_add(annual_savings)),
        )?;
        // Repeated multiplication keeps (1 + i)^year exact to the decimal's precision
        inflated_target = or_overflow("fire_number", inflated_target.checked_mul(inflation))?;

        if investments >= inflated_target {
            outcome = FireOutcome::Achieved {
                years: year,
                target_year: offset_year("fire_year", as_of.year(), year)?,
            };
            break;
        }
    }

    let monthly_savings_needed = match outcome {
        FireOutcome::Achieved { .. } => annual_savings / Decimal::from(12),
        FireOutcome::NotAchievable => Decimal::ZERO,
    };

    log::debug!(
        "FIRE estimate: number={} current={} outcome={:?}",
        fire_number,
        current_investments,
        outcome
    );

    Ok(FireResult {
        fire_number,
        current_investments,
        annual_expenses,
        outcome,
        monthly_savings_needed,
        current_progress: clamped_fraction(current_investments, fire_number, 1.0),
    })
}

/// Estimate FIRE from a snapshot's investments and annualised cash flow
pub fn estimate_fire_for_snapshot(
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
    max_years: u32,
) -> Result<FireResult, ValidationError> {
    estimate_fire(
        snapshot.investments,
        snapshot.annual_savings(),
        snapshot.annual_expenses(),
        assumptions.expected_return,
        assumptions.safe_withdrawal_rate,
        assumptions.inflation_rate,
        max_years,
        snapshot.as_of,
    )
}

/// `value / target` as a float clamped to [0, 1]; `when_zero` if the target is zero
pub(crate) fn clamped_fraction(value: Decimal, target: Decimal, when_zero: f64) -> f64 {
    if target.is_zero() {
        return when_zero;
    }
    (value / target).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    fn reference_case(max_years: u32) -> FireResult {
        estimate_fire(
            dec!(50000),
            dec!(20000),
            dec!(40000),
            dec!(0.07),
            dec!(0.04),
            dec!(0.03),
            max_years,
            as_of(),
        )
        .unwrap()
    }

    /// Investments and inflated target after `years` simulated years
    fn balances_at(
        start: Decimal,
        savings: Decimal,
        target: Decimal,
        growth: Decimal,
        inflation: Decimal,
        years: u32,
    ) -> (Decimal, Decimal) {
        let mut investments = start;
        let mut inflated = target;
        for _ in 0..years {
            investments = investments * growth + savings;
            inflated *= inflation;
        }
        (investments, inflated)
    }

    #[test]
    fn test_reference_scenario() {
        let result = reference_case(50);

        assert_eq!(result.fire_number, dec!(1000000));
        assert_eq!(result.years_to_fire(), 32);
        assert_eq!(result.fire_year(), 2058);
        assert_eq!(
            result.outcome,
            FireOutcome::Achieved { years: 32, target_year: 2058 }
        );
        assert_eq!(result.monthly_savings_needed, dec!(20000) / dec!(12));
        assert_relative_eq!(result.current_progress, 0.05);
        assert!(!result.is_already_fire());
    }

    #[test]
    fn test_first_crossing_property() {
        let result = reference_case(50);
        let years = result.years_to_fire() as u32;

        let (at, target_at) =
            balances_at(dec!(50000), dec!(20000), dec!(1000000), dec!(1.07), dec!(1.03), years);
        assert!(at >= target_at);

        let (before, target_before) =
            balances_at(dec!(50000), dec!(20000), dec!(1000000), dec!(1.07), dec!(1.03), years - 1);
        assert!(before < target_before);
    }

    #[test]
    fn test_not_achievable_within_horizon() {
        let result = reference_case(31);

        assert_eq!(result.outcome, FireOutcome::NotAchievable);
        assert_eq!(result.years_to_fire(), -1);
        assert_eq!(result.fire_year(), -1);
        assert_eq!(result.monthly_savings_needed, Decimal::ZERO);
        assert!(!result.is_achievable());
        assert_eq!(result.fire_number, dec!(1000000));
    }

    #[test]
    fn test_negative_savings_terminates() {
        let result = estimate_fire(
            dec!(100000),
            dec!(-30000),
            dec!(40000),
            dec!(0.05),
            dec!(0.04),
            dec!(0.02),
            50,
            as_of(),
        )
        .unwrap();

        assert_eq!(result.outcome, FireOutcome::NotAchievable);
    }

    #[test]
    fn test_already_independent_reports_year_one() {
        let result = estimate_fire(
            dec!(2000000),
            dec!(0),
            dec!(40000),
            dec!(0.05),
            dec!(0.04),
            dec!(0.03),
            50,
            as_of(),
        )
        .unwrap();

        assert_eq!(result.years_to_fire(), 1);
        assert_eq!(result.fire_year(), 2027);
        assert!(result.is_already_fire());
        assert_relative_eq!(result.current_progress, 1.0);
    }

    #[test]
    fn test_zero_expenses_target_is_zero() {
        let result = estimate_fire(
            dec!(0),
            dec!(1000),
            dec!(0),
            dec!(0.05),
            dec!(0.04),
            dec!(0.03),
            10,
            as_of(),
        )
        .unwrap();

        assert_eq!(result.fire_number, Decimal::ZERO);
        assert_eq!(result.years_to_fire(), 1);
        assert_relative_eq!(result.current_progress, 1.0);
    }

    #[test]
    fn test_rejects_non_positive_withdrawal_rate() {
        let err = estimate_fire(
            dec!(50000),
            dec!(20000),
            dec!(40000),
            dec!(0.07),
            dec!(0),
            dec!(0.03),
            50,
            as_of(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveWithdrawalRate(dec!(0)));
    }

    #[test]
    fn test_rejects_zero_horizon_and_negative_inputs() {
        let zero_horizon = estimate_fire(
            dec!(50000), dec!(20000), dec!(40000), dec!(0.07), dec!(0.04), dec!(0.03), 0, as_of(),
        );
        assert!(matches!(zero_horizon, Err(ValidationError::ZeroHorizon { .. })));

        let negative = estimate_fire(
            dec!(-1), dec!(20000), dec!(40000), dec!(0.07), dec!(0.04), dec!(0.03), 50, as_of(),
        );
        assert!(matches!(
            negative,
            Err(ValidationError::NegativeAmount { field: "current_investments", .. })
        ));
    }

    #[test]
    fn test_long_horizon_overflow_is_an_error() {
        let err = estimate_fire(
            dec!(50000),
            dec!(0),
            dec!(40000),
            dec!(0.03),
            dec!(0.04),
            dec!(0.07),
            1500,
            as_of(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::Overflow { .. }));
    }

    #[test]
    fn test_years_to_fire_saturates() {
        let result = FireResult {
            outcome: FireOutcome::Achieved { years: u32::MAX, target_year: i32::MAX },
            ..reference_case(50)
        };
        assert_eq!(result.years_to_fire(), i32::MAX);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(reference_case(50), reference_case(50));
    }

    #[test]
    fn test_years_within_bounds_across_inputs() {
        for savings in [dec!(-5000), dec!(0), dec!(5000), dec!(25000), dec!(80000)] {
            for max_years in [1, 10, 40] {
                let result = estimate_fire(
                    dec!(10000),
                    savings,
                    dec!(30000),
                    dec!(0.06),
                    dec!(0.04),
                    dec!(0.025),
                    max_years,
                    as_of(),
                )
                .unwrap();

                let years = result.years_to_fire();
                assert!(years == -1 || (1..=max_years as i32).contains(&years));
            }
        }
    }

    #[test]
    fn test_snapshot_convenience_matches_direct_call() {
        let snapshot = FinancialSnapshot {
            as_of: as_of(),
            investments: dec!(50000),
            monthly_expenses: dec!(40000) / dec!(12),
            monthly_savings: dec!(20000) / dec!(12),
            ..Default::default()
        };

        let result = estimate_fire_for_snapshot(&snapshot, &Assumptions::default(), 50).unwrap();
        assert_eq!(result.years_to_fire(), 32);
    }
}
