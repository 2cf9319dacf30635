//! Year-by-year state of a net-worth projection

use crate::error::{or_overflow, ValidationError};
use crate::snapshot::FinancialSnapshot;
use rust_decimal::Decimal;

/// Loans are modeled as paid down linearly over this many years
pub const LOAN_PAYOFF_HORIZON_YEARS: u32 = 20;

/// State of the projection at the end of a simulated year
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Simulated year (0 = snapshot, 1 = one year after)
    pub year: u32,

    /// Compounded investment balance
    pub investments: Decimal,

    /// Loan balance at the snapshot, the base of the linear decay
    pub initial_loans: Decimal,

    /// Cash held constant across years
    pub cash: Decimal,

    /// Real estate held constant across years
    pub real_estate: Decimal,
}

impl ProjectionState {
    /// Initialize state from the snapshot at projection start
    pub fn from_snapshot(snapshot: &FinancialSnapshot) -> Self {
        Self {
            year: 0,
            investments: snapshot.investments,
            initial_loans: snapshot.loans,
            cash: snapshot.cash,
            real_estate: snapshot.real_estate,
        }
    }

    /// Advance one year: grow investments, then add the year's savings
    pub fn advance_year(&mut self, growth: Decimal, annual_savings: Decimal) -> Result<(), ValidationError> {
        self.investments = or_overflow(
            "investments",
            self.investments
                .checked_mul(growth)
                .and_then(|grown| grown.checked_add(annual_savings)),
        )?;
        self.year += 1;
        Ok(())
    }

    /// Remaining loan balance under the fixed-horizon linear decay, floored at zero
    pub fn loan_balance(&self) -> Decimal {
        let yearly_paydown = self.initial_loans / Decimal::from(LOAN_PAYOFF_HORIZON_YEARS);
        // A paydown too large to represent has long since cleared the loan
        yearly_paydown
            .checked_mul(Decimal::from(self.year))
            .map_or(Decimal::ZERO, |paid| (self.initial_loans - paid).max(Decimal::ZERO))
    }

    /// Investments plus constant cash and real estate, less the decayed loan balance
    pub fn net_worth(&self) -> Result<Decimal, ValidationError> {
        or_overflow(
            "net_worth",
            self.investments
                .checked_add(self.cash)
                .and_then(|total| total.checked_add(self.real_estate))
                .and_then(|total| total.checked_sub(self.loan_balance())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> FinancialSnapshot {
        FinancialSnapshot {
            investments: dec!(100000),
            cash: dec!(5000),
            real_estate: dec!(300000),
            loans: dec!(200000),
            ..Default::default()
        }
    }

    #[test]
    fn test_loan_decays_linearly() {
        let mut state = ProjectionState::from_snapshot(&snapshot());
        assert_eq!(state.loan_balance(), dec!(200000));

        state.advance_year(Decimal::ONE, Decimal::ZERO).unwrap();
        assert_eq!(state.loan_balance(), dec!(190000));

        for _ in 1..10 {
            state.advance_year(Decimal::ONE, Decimal::ZERO).unwrap();
        }
        assert_eq!(state.year, 10);
        assert_eq!(state.loan_balance(), dec!(100000));
    }

    #[test]
    fn test_loan_floored_at_zero() {
        let mut state = ProjectionState::from_snapshot(&snapshot());
        for _ in 0..25 {
            state.advance_year(Decimal::ONE, Decimal::ZERO).unwrap();
        }
        assert_eq!(state.loan_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_advance_grows_then_saves() {
        let mut state = ProjectionState::from_snapshot(&snapshot());
        state.advance_year(dec!(1.10), dec!(12000)).unwrap();

        assert_eq!(state.investments, dec!(122000));
        assert_eq!(state.net_worth().unwrap(), dec!(122000) + dec!(5000) + dec!(300000) - dec!(190000));
    }

    #[test]
    fn test_advance_overflow_leaves_state_unchanged() {
        let mut state = ProjectionState::from_snapshot(&snapshot());
        state.investments = Decimal::MAX;

        let err = state.advance_year(dec!(1.07), Decimal::ZERO).unwrap_err();
        assert_eq!(err, ValidationError::Overflow { field: "investments" });
        assert_eq!(state.year, 0);
        assert_eq!(state.investments, Decimal::MAX);
    }

    #[test]
    fn test_net_worth_overflow_is_an_error() {
        let state = ProjectionState {
            investments: Decimal::MAX,
            ..ProjectionState::from_snapshot(&snapshot())
        };
        assert!(matches!(state.net_worth(), Err(ValidationError::Overflow { .. })));
    }
}
