//! Ledger records and the point-in-time financial snapshot built from them

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Days per averaging month when turning transaction history into monthly flows
const DAYS_PER_MONTH: Decimal = dec!(30);

/// Kind of ledger account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Cash,
    Investment,
    Loan,
    RealEstate,
    Crypto,
    Credit,
    Vehicle,
    OtherAsset,
    OtherLiability,
}

impl AccountType {
    /// Map a single free-form type name (as used by ledger services) to an account type
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.trim().to_lowercase().as_str() {
            "cash" | "checking" | "savings" | "depository" => AccountType::Cash,
            "investment" | "brokerage" | "401k" | "ira" => AccountType::Investment,
            "loan" | "mortgage" | "student" | "auto" => AccountType::Loan,
            "real estate" | "real_estate" => AccountType::RealEstate,
            "crypto" | "cryptocurrency" => AccountType::Crypto,
            "credit" => AccountType::Credit,
            "vehicle" => AccountType::Vehicle,
            "other asset" | "other_asset" | "employee compensation" => AccountType::OtherAsset,
            "other liability" | "other_liability" => AccountType::OtherLiability,
            _ => return None,
        };
        Some(kind)
    }

    /// Resolve an account type from its type and subtype names.
    ///
    /// The subtype is more specific and wins when recognised. Anything
    /// unrecognised is counted as an other asset.
    pub fn from_names(type_name: Option<&str>, subtype_name: Option<&str>) -> Self {
        subtype_name
            .and_then(Self::from_name)
            .or_else(|| type_name.and_then(Self::from_name))
            .unwrap_or_else(|| {
                log::warn!(
                    "Unknown account type {:?}/{:?}, treating as other asset",
                    type_name,
                    subtype_name
                );
                AccountType::OtherAsset
            })
    }

    /// Whether balances of this type reduce net worth
    pub fn is_liability(&self) -> bool {
        matches!(
            self,
            AccountType::Loan | AccountType::Credit | AccountType::OtherLiability
        )
    }

    pub fn is_asset(&self) -> bool {
        !self.is_liability()
    }
}

/// A single account balance from the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
}

/// A single ledger transaction, used only for cash-flow averaging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub is_income: bool,
}

/// Point-in-time aggregate of balances and monthly cash flow.
///
/// Built fresh from ledger records and never mutated afterwards; every
/// projection takes it by shared reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Date the balances were observed; anchors all calendar years in projections
    pub as_of: NaiveDate,

    pub net_worth: Decimal,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,

    // Asset breakdown
    pub investments: Decimal,
    pub cash: Decimal,
    pub real_estate: Decimal,
    pub crypto: Decimal,
    pub other_assets: Decimal,

    // Liability breakdown
    pub loans: Decimal,
    pub credit: Decimal,
    pub other_liabilities: Decimal,

    // Cash flow (monthly averages)
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_savings: Decimal,
}

impl FinancialSnapshot {
    /// Aggregate account balances and transaction history into a snapshot
    pub fn from_records(accounts: &[Account], transactions: &[Transaction], as_of: NaiveDate) -> Self {
        let sum_of = |kinds: &[AccountType]| -> Decimal {
            accounts
                .iter()
                .filter(|a| kinds.contains(&a.account_type))
                .map(|a| a.balance)
                .sum()
        };

        let investments = sum_of(&[AccountType::Investment]);
        let cash = sum_of(&[AccountType::Cash]);
        let real_estate = sum_of(&[AccountType::RealEstate]);
        let crypto = sum_of(&[AccountType::Crypto]);
        let other_assets = sum_of(&[AccountType::Vehicle, AccountType::OtherAsset]);

        let loans = sum_of(&[AccountType::Loan]);
        let credit = sum_of(&[AccountType::Credit]);
        let other_liabilities = sum_of(&[AccountType::OtherLiability]);

        let total_assets = investments + cash + real_estate + crypto + other_assets;
        let total_liabilities = loans + credit + other_liabilities;

        let (monthly_income, monthly_expenses) = monthly_cash_flow(transactions, as_of);

        log::debug!(
            "Snapshot as of {}: {} accounts, {} transactions",
            as_of,
            accounts.len(),
            transactions.len()
        );

        Self {
            as_of,
            net_worth: total_assets - total_liabilities,
            total_assets,
            total_liabilities,
            investments,
            cash,
            real_estate,
            crypto,
            other_assets,
            loans,
            credit,
            other_liabilities,
            monthly_income,
            monthly_expenses,
            monthly_savings: monthly_income - monthly_expenses,
        }
    }

    /// Fraction of monthly income saved (0 when there is no income)
    pub fn savings_rate(&self) -> Decimal {
        if self.monthly_income.is_zero() {
            Decimal::ZERO
        } else {
            self.monthly_savings / self.monthly_income
        }
    }

    pub fn annual_expenses(&self) -> Decimal {
        self.monthly_expenses * Decimal::from(12)
    }

    pub fn annual_savings(&self) -> Decimal {
        self.monthly_savings * Decimal::from(12)
    }
}

/// Average monthly income and expenses over the span of the transaction history
fn monthly_cash_flow(transactions: &[Transaction], as_of: NaiveDate) -> (Decimal, Decimal) {
    let Some(earliest) = transactions.iter().map(|t| t.date).min() else {
        return (Decimal::ZERO, Decimal::ZERO);
    };

    let days = (as_of - earliest).num_days();
    let months = (Decimal::from(days) / DAYS_PER_MONTH).max(Decimal::ONE);

    let income: Decimal = transactions
        .iter()
        .filter(|t| t.is_income)
        .map(|t| t.amount)
        .sum();
    let expenses: Decimal = transactions
        .iter()
        .filter(|t| !t.is_income)
        .map(|t| t.amount)
        .sum();

    (income.abs() / months, expenses.abs() / months)
}
