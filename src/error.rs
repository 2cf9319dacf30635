//! Error types for input validation and the CSV/JSON adapters

use rust_decimal::Decimal;
use thiserror::Error;

/// Input-contract violations, reported before any computation starts.
///
/// Unreachable goals (FIRE not reached, loan not paid off) are not errors;
/// they are carried in the result types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("withdrawal rate must be positive, got {0}")]
    NonPositiveWithdrawalRate(Decimal),

    #[error("{field} horizon must be at least one period")]
    ZeroHorizon { field: &'static str },

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{field} must be greater than -100%, got {value}")]
    RateBelowTotalLoss { field: &'static str, value: Decimal },

    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("{field} exceeds the representable decimal range")]
    Overflow { field: &'static str },

    #[error("date {months} months after {as_of} is out of range")]
    DateOutOfRange { as_of: chrono::NaiveDate, months: u32 },
}

/// Failures while reading ledger CSV files or settings JSON.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date {value:?} in transaction {id}")]
    InvalidDate { id: u64, value: String },

    #[error("invalid settings: {0}")]
    Settings(#[from] ValidationError),
}

/// Reject negative money amounts.
pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Growth rates below -100% would flip the sign of a balance.
pub(crate) fn ensure_above_total_loss(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::NEGATIVE_ONE {
        return Err(ValidationError::RateBelowTotalLoss { field, value });
    }
    Ok(())
}

/// Turn a failed checked decimal operation into an overflow error
pub(crate) fn or_overflow(field: &'static str, value: Option<Decimal>) -> Result<Decimal, ValidationError> {
    value.ok_or(ValidationError::Overflow { field })
}

/// Offset a year by a simulated horizon without truncating the horizon
pub(crate) fn offset_year(field: &'static str, year: i32, offset: u32) -> Result<i32, ValidationError> {
    i32::try_from(offset)
        .ok()
        .and_then(|offset| year.checked_add(offset))
        .ok_or(ValidationError::Overflow { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_amount_rejected() {
        let err = ensure_non_negative("balance", dec!(-0.01)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeAmount { field: "balance", value: dec!(-0.01) }
        );
        assert!(err.to_string().contains("balance"));
    }

    #[test]
    fn test_zero_is_not_negative() {
        assert!(ensure_non_negative("balance", Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_or_overflow() {
        assert_eq!(or_overflow("x", Some(dec!(2))), Ok(dec!(2)));
        assert_eq!(
            or_overflow("x", Decimal::MAX.checked_mul(dec!(2))),
            Err(ValidationError::Overflow { field: "x" })
        );
    }

    #[test]
    fn test_offset_year_rejects_large_horizons() {
        assert_eq!(offset_year("year", 2026, 32), Ok(2058));
        assert!(offset_year("year", 2026, u32::MAX).is_err());
        assert!(offset_year("year", i32::MAX, 1).is_err());
    }

    #[test]
    fn test_total_loss_rate_rejected() {
        assert!(ensure_above_total_loss("expected_return", dec!(-1)).is_err());
        assert!(ensure_above_total_loss("expected_return", dec!(-0.5)).is_ok());
    }
}
