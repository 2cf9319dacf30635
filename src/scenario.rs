//! Scenario runner for batch projections
//!
//! Holds one base set of assumptions and evaluates a snapshot under it or
//! under many variants. The calculations share no state, so variants run in
//! parallel.

use crate::assumptions::Assumptions;
use crate::error::ValidationError;
use crate::fire::{estimate_fire_for_snapshot, FireResult, DEFAULT_MAX_YEARS};
use crate::loan::{plan_loans, LoanReport};
use crate::projection::{ProjectionEngine, ProjectionSeries};
use crate::snapshot::{Account, FinancialSnapshot};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything computed for one snapshot under one set of assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub assumptions: Assumptions,
    pub fire: FireResult,
    pub loans: Vec<LoanReport>,
    pub projection: ProjectionSeries,
}

/// Projection outcome for one assumption variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub assumptions: Assumptions,
    pub fire: FireResult,
    pub projection: ProjectionSeries,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::with_assumptions(Assumptions::from_json()?);
/// let outcomes = runner.return_sensitivity(&snapshot, &[dec!(0.05), dec!(0.07)], 30)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// FIRE estimate, loan payoffs and net-worth projection under the base assumptions
    pub fn report(
        &self,
        snapshot: &FinancialSnapshot,
        accounts: &[Account],
    ) -> Result<FinancialReport, ValidationError> {
        let fire = estimate_fire_for_snapshot(snapshot, &self.base_assumptions, DEFAULT_MAX_YEARS)?;
        let loans = plan_loans(accounts, &self.base_assumptions, snapshot.as_of)?;
        let projection = ProjectionEngine::new(self.base_assumptions.clone()).project_default(snapshot)?;

        Ok(FinancialReport {
            assumptions: self.base_assumptions.clone(),
            fire,
            loans,
            projection,
        })
    }

    /// Run one assumption set against the snapshot
    pub fn run(
        &self,
        snapshot: &FinancialSnapshot,
        assumptions: &Assumptions,
        years: u32,
    ) -> Result<ScenarioOutcome, ValidationError> {
        let fire = estimate_fire_for_snapshot(snapshot, assumptions, DEFAULT_MAX_YEARS)?;
        let projection = ProjectionEngine::new(assumptions.clone()).project(snapshot, years)?;

        Ok(ScenarioOutcome {
            assumptions: assumptions.clone(),
            fire,
            projection,
        })
    }

    /// Run many assumption sets in parallel; results keep the input order
    pub fn run_scenarios(
        &self,
        snapshot: &FinancialSnapshot,
        scenarios: &[Assumptions],
        years: u32,
    ) -> Result<Vec<ScenarioOutcome>, ValidationError> {
        log::info!("Running {} scenarios over {} years", scenarios.len(), years);

        scenarios
            .par_iter()
            .map(|assumptions| self.run(snapshot, assumptions, years))
            .collect()
    }

    /// Vary only the expected return of the base assumptions
    pub fn return_sensitivity(
        &self,
        snapshot: &FinancialSnapshot,
        returns: &[Decimal],
        years: u32,
    ) -> Result<Vec<ScenarioOutcome>, ValidationError> {
        let scenarios: Vec<Assumptions> = returns
            .iter()
            .map(|&rate| self.base_assumptions.with_expected_return(rate))
            .collect();
        self.run_scenarios(snapshot, &scenarios, years)
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::LoanPlan;
    use crate::snapshot::AccountType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn test_accounts() -> Vec<Account> {
        vec![
            Account {
                id: 1,
                name: "Index fund".to_string(),
                account_type: AccountType::Investment,
                balance: dec!(80000),
            },
            Account {
                id: 2,
                name: "Mortgage".to_string(),
                account_type: AccountType::Loan,
                balance: dec!(200000),
            },
        ]
    }

    fn test_snapshot() -> FinancialSnapshot {
        FinancialSnapshot {
            monthly_income: dec!(7000),
            monthly_expenses: dec!(3500),
            monthly_savings: dec!(3500),
            ..FinancialSnapshot::from_records(
                &test_accounts(),
                &[],
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            )
        }
    }

    #[test]
    fn test_report_combines_components() {
        let runner = ScenarioRunner::with_assumptions(Assumptions {
            loans: vec![LoanPlan::new(2, dec!(0.05), dec!(1200))],
            ..Default::default()
        });

        let report = runner.report(&test_snapshot(), &test_accounts()).unwrap();

        assert_eq!(report.fire.fire_number, dec!(1050000));
        assert!(report.fire.is_achievable());
        assert_eq!(report.loans.len(), 1);
        assert_eq!(report.loans[0].payoff.months, 286);
        assert_eq!(report.projection.len(), 30);
    }

    #[test]
    fn test_return_sensitivity_ordering() {
        let runner = ScenarioRunner::new();
        let outcomes = runner
            .return_sensitivity(&test_snapshot(), &[dec!(0.03), dec!(0.05), dec!(0.08)], 20)
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].assumptions.expected_return, dec!(0.03));
        assert_eq!(outcomes[2].assumptions.expected_return, dec!(0.08));

        // Higher return should result in higher final net worth
        let final_worth: Vec<Decimal> = outcomes
            .iter()
            .map(|o| o.projection.summary().final_net_worth)
            .collect();
        assert!(final_worth[0] < final_worth[1]);
        assert!(final_worth[1] < final_worth[2]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = ScenarioRunner::new();
        let snapshot = test_snapshot();
        let scenarios: Vec<Assumptions> = [dec!(0.02), dec!(0.04), dec!(0.06), dec!(0.1)]
            .iter()
            .map(|&r| Assumptions::default().with_expected_return(r))
            .collect();

        let parallel = runner.run_scenarios(&snapshot, &scenarios, 25).unwrap();
        let sequential: Vec<ScenarioOutcome> = scenarios
            .iter()
            .map(|a| runner.run(&snapshot, a, 25).unwrap())
            .collect();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_invalid_scenario_fails_batch() {
        let runner = ScenarioRunner::new();
        let scenarios = vec![
            Assumptions::default(),
            Assumptions {
                safe_withdrawal_rate: dec!(0),
                ..Default::default()
            },
        ];

        assert!(runner.run_scenarios(&test_snapshot(), &scenarios, 10).is_err());
    }
}
