//! JSON settings loader
//!
//! Reads user assumptions from a settings file. Missing fields fall back to
//! the defaults in [`Assumptions::default`].

use super::Assumptions;
use crate::error::LoadError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default path to the settings file
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Parse and validate assumptions from any reader
pub fn load_settings_from_reader<R: std::io::Read>(reader: R) -> Result<Assumptions, LoadError> {
    let assumptions: Assumptions = serde_json::from_reader(reader)?;
    assumptions.validate()?;

    log::debug!(
        "Settings: withdrawal={} return={} inflation={} years={} loans={}",
        assumptions.safe_withdrawal_rate,
        assumptions.expected_return,
        assumptions.inflation_rate,
        assumptions.projection_years,
        assumptions.loans.len()
    );

    Ok(assumptions)
}

/// Parse and validate assumptions from a settings file
pub fn load_settings(path: &Path) -> Result<Assumptions, LoadError> {
    let file = File::open(path)?;
    load_settings_from_reader(BufReader::new(file))
}

/// Write assumptions back out as pretty JSON
pub fn save_settings(path: &Path, assumptions: &Assumptions) -> Result<(), LoadError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, assumptions)?;
    Ok(())
}
