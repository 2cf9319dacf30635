//! Ledger records and snapshot construction

mod data;
pub mod loader;

pub use data::{Account, AccountType, FinancialSnapshot, Transaction};
pub use loader::{load_accounts, load_accounts_from_reader, load_snapshot, load_transactions, load_transactions_from_reader};
