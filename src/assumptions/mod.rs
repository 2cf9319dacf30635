//! User-chosen rate assumptions and per-loan payment plans

mod loan_plan;
pub mod loader;

pub use loan_plan::LoanPlan;
pub use loader::DEFAULT_SETTINGS_PATH;

use crate::error::ValidationError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default safe withdrawal rate (4% rule)
pub const DEFAULT_WITHDRAWAL_RATE: Decimal = dec!(0.04);

/// Default expected annual investment return
pub const DEFAULT_EXPECTED_RETURN: Decimal = dec!(0.07);

/// Default annual inflation rate
pub const DEFAULT_INFLATION_RATE: Decimal = dec!(0.03);

/// Default net-worth projection horizon in years
pub const DEFAULT_PROJECTION_YEARS: u32 = 30;

fn default_withdrawal_rate() -> Decimal {
    DEFAULT_WITHDRAWAL_RATE
}

fn default_expected_return() -> Decimal {
    DEFAULT_EXPECTED_RETURN
}

fn default_inflation_rate() -> Decimal {
    DEFAULT_INFLATION_RATE
}

fn default_projection_years() -> u32 {
    DEFAULT_PROJECTION_YEARS
}

/// Container for all projection assumptions.
///
/// Read-only to the calculation components. Range checks live in
/// [`Assumptions::validate`] and are applied by the settings loader, not by
/// the calculations themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Fraction of invested assets withdrawable per year in retirement
    #[serde(default = "default_withdrawal_rate")]
    pub safe_withdrawal_rate: Decimal,

    /// Expected annual investment return
    #[serde(default = "default_expected_return")]
    pub expected_return: Decimal,

    /// Expected annual inflation rate
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: Decimal,

    /// Net-worth projection horizon used when the caller does not pick one
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,

    /// Per-loan rate and payment overrides
    #[serde(default)]
    pub loans: Vec<LoanPlan>,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            safe_withdrawal_rate: DEFAULT_WITHDRAWAL_RATE,
            expected_return: DEFAULT_EXPECTED_RETURN,
            inflation_rate: DEFAULT_INFLATION_RATE,
            projection_years: DEFAULT_PROJECTION_YEARS,
            loans: Vec::new(),
        }
    }
}

impl Assumptions {
    /// Load assumptions from the default settings file (settings.json)
    pub fn from_json() -> Result<Self, crate::error::LoadError> {
        Self::from_json_path(Path::new(DEFAULT_SETTINGS_PATH))
    }

    /// Load and validate assumptions from a specific settings file
    pub fn from_json_path(path: &Path) -> Result<Self, crate::error::LoadError> {
        loader::load_settings(path)
    }

    /// Copy with a different expected return (for sensitivity runs)
    pub fn with_expected_return(&self, expected_return: Decimal) -> Self {
        Self {
            expected_return,
            ..self.clone()
        }
    }

    /// Look up the plan for a loan account
    pub fn loan_plan(&self, account_id: u64) -> Option<&LoanPlan> {
        self.loans.iter().find(|plan| plan.account_id == account_id)
    }

    /// Enforce the ranges the settings store accepts
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("safe_withdrawal_rate", self.safe_withdrawal_rate, dec!(0.02), dec!(0.10))?;
        check_range("expected_return", self.expected_return, Decimal::ZERO, dec!(0.20))?;
        check_range("inflation_rate", self.inflation_rate, Decimal::ZERO, dec!(0.10))?;
        check_range(
            "projection_years",
            Decimal::from(self.projection_years),
            Decimal::from(5),
            Decimal::from(50),
        )?;

        for plan in &self.loans {
            plan.validate()?;
        }

        Ok(())
    }
}

pub(crate) fn check_range(
    field: &'static str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { field, value, min, max });
    }
    Ok(())
}
