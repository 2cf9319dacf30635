//! Year-by-year net-worth projection

mod state;
mod engine;
mod series;

pub use state::{ProjectionState, LOAN_PAYOFF_HORIZON_YEARS};
pub use engine::{project, project_default, ProjectionEngine};
pub use series::{Projection, ProjectionSeries, ProjectionSummary};
