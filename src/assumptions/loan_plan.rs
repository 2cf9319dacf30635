//! Per-loan payment plan

use super::check_range;
use crate::error::{ensure_non_negative, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rate and payment overrides for one loan account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPlan {
    /// Ledger account the plan applies to
    pub account_id: u64,

    /// Display name; falls back to the ledger account name when empty
    #[serde(default)]
    pub name: String,

    /// Annual interest rate as a decimal (0.05 = 5%)
    pub annual_rate: Decimal,

    /// Scheduled monthly payment
    pub monthly_payment: Decimal,

    /// Additional principal paid every month
    #[serde(default)]
    pub extra_payment: Decimal,
}

impl LoanPlan {
    pub fn new(account_id: u64, annual_rate: Decimal, monthly_payment: Decimal) -> Self {
        Self {
            account_id,
            name: String::new(),
            annual_rate,
            monthly_payment,
            extra_payment: Decimal::ZERO,
        }
    }

    /// Same plan with an extra monthly principal payment
    pub fn with_extra_payment(mut self, extra_payment: Decimal) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    /// Total paid each month
    pub fn total_payment(&self) -> Decimal {
        self.monthly_payment + self.extra_payment
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("loan annual_rate", self.annual_rate, Decimal::ZERO, Decimal::ONE)?;
        ensure_non_negative("loan monthly_payment", self.monthly_payment)?;
        ensure_non_negative("loan extra_payment", self.extra_payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_payment_includes_extra() {
        let plan = LoanPlan::new(1, dec!(0.04), dec!(900)).with_extra_payment(dec!(150));
        assert_eq!(plan.total_payment(), dec!(1050));
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_negative_extra_payment_rejected() {
        let plan = LoanPlan::new(1, dec!(0.04), dec!(900)).with_extra_payment(dec!(-10));
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::NegativeAmount { field: "loan extra_payment", .. })
        ));
    }
}
