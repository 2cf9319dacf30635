//! Projection output structures

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One simulated year of a net-worth trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Calendar year
    pub year: i32,
    pub net_worth: Decimal,
    pub investments: Decimal,
    /// Never negative
    pub loan_balance: Decimal,
    /// Investments over the FIRE target, clamped to [0, 1]
    pub fire_progress: f64,
}

/// Full trajectory, one point per simulated year in ascending order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    pub as_of: NaiveDate,
    /// Non-inflated FIRE target used for progress
    pub fire_target: Decimal,
    pub points: Vec<Projection>,
}

/// Summary statistics of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: usize,
    pub final_year: Option<i32>,
    pub final_net_worth: Decimal,
    pub final_investments: Decimal,
    pub peak_net_worth: Decimal,
    /// First calendar year with progress at 1.0
    pub fire_reached_year: Option<i32>,
}

impl ProjectionSeries {
    pub fn new(as_of: NaiveDate, fire_target: Decimal) -> Self {
        Self {
            as_of,
            fire_target,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, point: Projection) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Projection> {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&Projection> {
        self.points.last()
    }

    /// Point for a given calendar year
    pub fn at_year(&self, year: i32) -> Option<&Projection> {
        self.points.iter().find(|p| p.year == year)
    }

    /// First calendar year in which investments reach the FIRE target
    pub fn fire_reached_year(&self) -> Option<i32> {
        self.points
            .iter()
            .find(|p| p.fire_progress >= 1.0)
            .map(|p| p.year)
    }

    pub fn summary(&self) -> ProjectionSummary {
        let last = self.points.last();
        ProjectionSummary {
            years: self.points.len(),
            final_year: last.map(|p| p.year),
            final_net_worth: last.map(|p| p.net_worth).unwrap_or_default(),
            final_investments: last.map(|p| p.investments).unwrap_or_default(),
            peak_net_worth: self
                .points
                .iter()
                .map(|p| p.net_worth)
                .max()
                .unwrap_or_default(),
            fire_reached_year: self.fire_reached_year(),
        }
    }

    /// Write the series as CSV with one row per year
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a Projection;
    type IntoIter = std::slice::Iter<'a, Projection>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
