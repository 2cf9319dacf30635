//! Net-worth projection - deterministic long-horizon personal-finance projections
//!
//! This library provides:
//! - FIRE horizon estimation against an inflation-adjusted target
//! - Month-by-month loan amortization with a 30-year cap
//! - Year-by-year net-worth trajectories from a financial snapshot
//! - Ledger CSV and settings JSON loading at the boundary
//! - Parallel scenario runs across assumption sets
//!
//! All money is carried as exact decimals.

pub mod error;
pub mod snapshot;
pub mod assumptions;
pub mod fire;
pub mod loan;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{LoadError, ValidationError};
pub use snapshot::{Account, AccountType, FinancialSnapshot, Transaction};
pub use assumptions::{Assumptions, LoanPlan};
pub use fire::{estimate_fire, FireOutcome, FireResult};
pub use loan::{amortize, LoanPayoffResult, PayoffStatus};
pub use projection::{project, Projection, ProjectionEngine, ProjectionSeries};
pub use scenario::{FinancialReport, ScenarioRunner};
