//! Load ledger accounts and transactions from CSV exports
//!
//! accounts.csv:     id,name,type,subtype,balance
//! transactions.csv: id,date,amount,is_income

use super::{Account, AccountType, FinancialSnapshot, Transaction};
use crate::error::LoadError;
use chrono::NaiveDate;
use csv::Reader;
use rust_decimal::Decimal;
use std::path::Path;

/// Raw CSV row of an account export
#[derive(Debug, serde::Deserialize)]
struct AccountRow {
    id: u64,
    name: String,
    #[serde(rename = "type")]
    type_name: Option<String>,
    subtype: Option<String>,
    balance: Decimal,
}

impl AccountRow {
    fn into_account(self) -> Account {
        let account_type = AccountType::from_names(self.type_name.as_deref(), self.subtype.as_deref());
        Account {
            id: self.id,
            name: self.name,
            account_type,
            balance: self.balance,
        }
    }
}

/// Raw CSV row of a transaction export
#[derive(Debug, serde::Deserialize)]
struct TransactionRow {
    id: u64,
    date: String,
    amount: Decimal,
    is_income: Option<bool>,
}

impl TransactionRow {
    fn into_transaction(self) -> Result<Transaction, LoadError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            LoadError::InvalidDate {
                id: self.id,
                value: self.date.clone(),
            }
        })?;

        // Ledger exports record income as negative amounts when no flag is given
        let is_income = self.is_income.unwrap_or(self.amount.is_sign_negative());

        Ok(Transaction {
            id: self.id,
            date,
            amount: self.amount,
            is_income,
        })
    }
}

/// Load accounts from any reader
pub fn load_accounts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Account>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut accounts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: AccountRow = result?;
        accounts.push(row.into_account());
    }

    Ok(accounts)
}

/// Load accounts from a CSV file
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<Account>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_accounts_from_reader(file)
}

/// Load transactions from any reader
pub fn load_transactions_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Transaction>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut transactions = Vec::new();

    for result in csv_reader.deserialize() {
        let row: TransactionRow = result?;
        transactions.push(row.into_transaction()?);
    }

    Ok(transactions)
}

/// Load transactions from a CSV file
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_transactions_from_reader(file)
}

/// Build a snapshot from an accounts export and an optional transactions export
pub fn load_snapshot(
    accounts_path: &Path,
    transactions_path: Option<&Path>,
    as_of: NaiveDate,
) -> Result<(FinancialSnapshot, Vec<Account>), LoadError> {
    let accounts = load_accounts(accounts_path)?;
    let transactions = match transactions_path {
        Some(path) => load_transactions(path)?,
        None => Vec::new(),
    };

    log::info!(
        "Loaded {} accounts and {} transactions",
        accounts.len(),
        transactions.len()
    );

    let snapshot = FinancialSnapshot::from_records(&accounts, &transactions, as_of);
    Ok((snapshot, accounts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ACCOUNTS_CSV: &str = "\
id,name,type,subtype,balance
1,Brokerage,investment,brokerage,85000.25
2,Checking,depository,checking,4200
3,House,real estate,,350000
4,Mortgage,loan,mortgage,210000
5,Card,credit,,900.10
";

    const TRANSACTIONS_CSV: &str = "\
id,date,amount,is_income
1,2026-01-01,-6000,true
2,2026-01-05,2500,false
3,2026-01-20,-6000,
4,2026-02-02,1700,
";

    #[test]
    fn test_load_accounts_from_reader() {
        let accounts = load_accounts_from_reader(ACCOUNTS_CSV.as_bytes()).unwrap();
        assert_eq!(accounts.len(), 5);

        assert_eq!(accounts[0].account_type, AccountType::Investment);
        assert_eq!(accounts[0].balance, dec!(85000.25));
        assert_eq!(accounts[1].account_type, AccountType::Cash);
        assert_eq!(accounts[2].account_type, AccountType::RealEstate);
        assert_eq!(accounts[3].account_type, AccountType::Loan);
        assert_eq!(accounts[4].account_type, AccountType::Credit);
    }

    #[test]
    fn test_load_transactions_infers_income_from_sign() {
        let transactions = load_transactions_from_reader(TRANSACTIONS_CSV.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 4);

        assert!(transactions[0].is_income);
        assert!(!transactions[1].is_income);
        assert!(transactions[2].is_income);
        assert!(!transactions[3].is_income);
        assert_eq!(
            transactions[3].date,
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
        );
    }

    #[test]
    fn test_bad_date_reported() {
        let csv = "id,date,amount,is_income\n7,01/02/2026,10,false\n";
        let err = load_transactions_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { id: 7, .. }));
    }

    #[test]
    fn test_snapshot_from_loaded_records() {
        let accounts = load_accounts_from_reader(ACCOUNTS_CSV.as_bytes()).unwrap();
        let transactions = load_transactions_from_reader(TRANSACTIONS_CSV.as_bytes()).unwrap();
        // 60 days after the first transaction -> two averaging months
        let as_of = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let snapshot = FinancialSnapshot::from_records(&accounts, &transactions, as_of);

        assert_eq!(snapshot.net_worth, dec!(228300.15));
        assert_eq!(snapshot.monthly_income, dec!(6000));
        assert_eq!(snapshot.monthly_expenses, dec!(2100));
        assert_eq!(snapshot.monthly_savings, dec!(3900));
    }
}
