//! Net-worth projection engine
//!
//! Investments compound at the expected return with a full year of savings
//! added after growth. Loans decay linearly over a fixed 20-year horizon,
//! independent of the amortization model in [`crate::loan`]. Progress is
//! measured against a FIRE target that is not inflation-adjusted.

use super::series::{Projection, ProjectionSeries};
use super::state::ProjectionState;
use crate::assumptions::Assumptions;
use crate::error::{
    ensure_above_total_loss, ensure_non_negative, offset_year, or_overflow, ValidationError,
};
use crate::fire::clamped_fraction;
use crate::snapshot::FinancialSnapshot;
use chrono::Datelike;
use rust_decimal::Decimal;

/// Projection engine holding one set of assumptions
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl ProjectionEngine {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Project a snapshot over the configured default horizon
    pub fn project_default(&self, snapshot: &FinancialSnapshot) -> Result<ProjectionSeries, ValidationError> {
        self.project(snapshot, self.assumptions.projection_years)
    }

    /// Project a snapshot year by year for `years` years
    pub fn project(&self, snapshot: &FinancialSnapshot, years: u32) -> Result<ProjectionSeries, ValidationError> {
        let withdrawal_rate = self.assumptions.safe_withdrawal_rate;
        if withdrawal_rate <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveWithdrawalRate(withdrawal_rate));
        }
        if years == 0 {
            return Err(ValidationError::ZeroHorizon { field: "years" });
        }
        ensure_above_total_loss("expected_return", self.assumptions.expected_return)?;
        ensure_non_negative("investments", snapshot.investments)?;
        ensure_non_negative("loans", snapshot.loans)?;
        ensure_non_negative("cash", snapshot.cash)?;
        ensure_non_negative("real_estate", snapshot.real_estate)?;

        let months = Decimal::from(12);
        let annual_expenses = or_overflow("annual_expenses", snapshot.monthly_expenses.checked_mul(months))?;
        let annual_savings = or_overflow("annual_savings", snapshot.monthly_savings.checked_mul(months))?;
        // Computed once for every year, in today's money
        let fire_target = or_overflow("fire_target", annual_expenses.checked_div(withdrawal_rate))?;
        let growth = or_overflow("expected_return", Decimal::ONE.checked_add(self.assumptions.expected_return))?;
        let start_year = snapshot.as_of.year();

        let mut series = ProjectionSeries::new(snapshot.as_of, fire_target);
        let mut state = ProjectionState::from_snapshot(snapshot);

        for _ in 1..=years {
            state.advance_year(growth, annual_savings)?;

            series.push(Projection {
                year: offset_year("year", start_year, state.year)?,
                net_worth: state.net_worth()?,
                investments: state.investments,
                loan_balance: state.loan_balance(),
                fire_progress: clamped_fraction(state.investments, fire_target, 0.0),
            });
        }

        log::debug!(
            "Projected {} years from {}: final net worth {:?}",
            years,
            snapshot.as_of,
            series.last().map(|point| point.net_worth)
        );

        Ok(series)
    }
}

/// Project a snapshot under the given assumptions for `years` years
pub fn project(
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
    years: u32,
) -> Result<ProjectionSeries, ValidationError> {
    ProjectionEngine::new(assumptions.clone()).project(snapshot, years)
}

/// Project over `assumptions.projection_years` (30 unless configured)
pub fn project_default(
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> Result<ProjectionSeries, ValidationError> {
    project(snapshot, assumptions, assumptions.projection_years)
}
