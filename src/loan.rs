//! Month-by-month loan amortization
//!
//! Each month interest accrues on the remaining balance at `annual_rate / 12`,
//! the payment (plus any extra) covers that interest first and the rest
//! reduces principal. Simulation stops at payoff or after 360 months.

use crate::assumptions::Assumptions;
use crate::error::{ensure_non_negative, or_overflow, ValidationError};
use crate::snapshot::{Account, AccountType};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hard ceiling on simulated months (30 years)
pub const MAX_AMORTIZATION_MONTHS: u32 = 360;

/// Payoff dates treat every month as a fixed 30-day period
pub const DAYS_PER_MONTH: i64 = 30;

/// How the simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStatus {
    /// Balance reached zero at the reported month
    PaidOff,
    /// Still owing after 360 months even though payments reduce principal
    Capped,
    /// First month's payment does not exceed its interest; the balance never shrinks
    NonAmortizing,
}

/// One month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub closing_balance: Decimal,
}

/// Summary of a loan payoff simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayoffResult {
    pub starting_balance: Decimal,
    pub annual_rate: Decimal,
    pub monthly_payment: Decimal,
    pub extra_payment: Decimal,

    /// Months simulated; exactly 360 when capped
    pub months: u32,
    pub total_interest: Decimal,
    /// Everything paid over the simulated months
    pub total_paid: Decimal,
    /// Zero when paid off
    pub remaining_balance: Decimal,
    /// as-of date + months * 30 days
    pub payoff_date: NaiveDate,
    pub status: PayoffStatus,
}

impl LoanPayoffResult {
    pub fn years(&self) -> u32 {
        self.months / 12
    }

    pub fn remaining_months(&self) -> u32 {
        self.months % 12
    }

    pub fn is_paid_off(&self) -> bool {
        self.status == PayoffStatus::PaidOff
    }

    /// Payoff date, only when the loan is actually paid off within the cap
    pub fn projected_payoff_date(&self) -> Option<NaiveDate> {
        self.is_paid_off().then_some(self.payoff_date)
    }
}

/// Loan payoff result tied to the ledger account it was computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReport {
    pub account_id: u64,
    pub name: String,
    pub payoff: LoanPayoffResult,
}

/// Simulate paydown of a single loan
pub fn amortize(
    balance: Decimal,
    annual_rate: Decimal,
    monthly_payment: Decimal,
    extra_payment: Decimal,
    as_of: NaiveDate,
) -> Result<LoanPayoffResult, ValidationError> {
    let mut total_interest = Decimal::ZERO;
    let mut remaining = balance;
    let mut months = 0;

    simulate(balance, annual_rate, monthly_payment, extra_payment, |row| {
        total_interest = or_overflow("total_interest", total_interest.checked_add(row.interest))?;
        remaining = row.closing_balance;
        months = row.month;
        Ok(())
    })?;

    let first_interest = or_overflow("interest", balance.checked_mul(monthly_rate(annual_rate)))?;
    let payment = or_overflow("monthly_payment", monthly_payment.checked_add(extra_payment))?;
    let status = if remaining.is_zero() {
        PayoffStatus::PaidOff
    } else if payment <= first_interest {
        PayoffStatus::NonAmortizing
    } else {
        PayoffStatus::Capped
    };

    if status != PayoffStatus::PaidOff {
        log::warn!(
            "Loan of {} at {} not paid off after {} months ({:?}), {} still owing",
            balance,
            annual_rate,
            months,
            status,
            remaining
        );
    }

    let total_paid = or_overflow(
        "total_paid",
        balance
            .checked_add(total_interest)
            .and_then(|owed| owed.checked_sub(remaining)),
    )?;
    let payoff_date = as_of
        .checked_add_signed(Duration::days(i64::from(months) * DAYS_PER_MONTH))
        .ok_or(ValidationError::DateOutOfRange { as_of, months })?;

    Ok(LoanPayoffResult {
        starting_balance: balance,
        annual_rate,
        monthly_payment,
        extra_payment,
        months,
        total_interest,
        total_paid,
        remaining_balance: remaining,
        payoff_date,
        status,
    })
}

/// Full month-by-month schedule for a loan, up to payoff or the 360-month cap
pub fn amortization_schedule(
    balance: Decimal,
    annual_rate: Decimal,
    monthly_payment: Decimal,
    extra_payment: Decimal,
) -> Result<Vec<AmortizationRow>, ValidationError> {
    let mut rows = Vec::new();
    simulate(balance, annual_rate, monthly_payment, extra_payment, |row| {
        rows.push(row);
        Ok(())
    })?;
    Ok(rows)
}

/// Amortize every loan account that has a plan in the assumptions.
///
/// Loan accounts without a plan are skipped.
pub fn plan_loans(
    accounts: &[Account],
    assumptions: &Assumptions,
    as_of: NaiveDate,
) -> Result<Vec<LoanReport>, ValidationError> {
    let mut reports = Vec::new();

    for account in accounts.iter().filter(|a| a.account_type == AccountType::Loan) {
        let Some(plan) = assumptions.loan_plan(account.id) else {
            log::warn!("No loan plan for account {} ({}), skipping", account.id, account.name);
            continue;
        };

        let payoff = amortize(
            account.balance,
            plan.annual_rate,
            plan.monthly_payment,
            plan.extra_payment,
            as_of,
        )?;

        let name = if plan.name.is_empty() {
            account.name.clone()
        } else {
            plan.name.clone()
        };

        reports.push(LoanReport {
            account_id: account.id,
            name,
            payoff,
        });
    }

    Ok(reports)
}

fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / Decimal::from(12)
}

/// Core amortization loop shared by [`amortize`] and [`amortization_schedule`]
fn simulate(
    balance: Decimal,
    annual_rate: Decimal,
    monthly_payment: Decimal,
    extra_payment: Decimal,
    mut on_month: impl FnMut(AmortizationRow) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    ensure_non_negative("balance", balance)?;
    ensure_non_negative("annual_rate", annual_rate)?;
    ensure_non_negative("monthly_payment", monthly_payment)?;
    ensure_non_negative("extra_payment", extra_payment)?;

    let rate = monthly_rate(annual_rate);
    let payment = or_overflow("monthly_payment", monthly_payment.checked_add(extra_payment))?;
    let mut remaining = balance;

    for month in 1..=MAX_AMORTIZATION_MONTHS {
        if remaining.is_zero() {
            break;
        }

        let interest = or_overflow("interest", remaining.checked_mul(rate))?;
        // A payment below the interest grows the balance, which can outrun Decimal::MAX
        let closing = or_overflow(
            "balance",
            payment
                .checked_sub(interest)
                .and_then(|principal| remaining.checked_sub(principal)),
        )?
        .max(Decimal::ZERO);

        on_month(AmortizationRow {
            month,
            opening_balance: remaining,
            interest,
            principal: remaining - closing,
            closing_balance: closing,
        })?;

        remaining = closing;
    }

    Ok(())
}
