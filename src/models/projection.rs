use serde::{Deserialize, Serialize};

use super::params::TargetMode;

/// Estimated population for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: i32,
    /// Estimated head count
    pub population: u64,
}

/// Where a trajectory crosses a target, plus the series used to chart it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossingAnalysis {
    /// Target in people, when one was given
    pub target: Option<f64>,
    pub mode: TargetMode,
    /// First year satisfying the target under `mode`
    pub crossing_year: Option<i32>,
    pub population_at_crossing: Option<u64>,
    pub series: Vec<ProjectionPoint>,
}

impl CrossingAnalysis {
    pub fn first_year(&self) -> Option<i32> {
        self.series.first().map(|p| p.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.series.last().map(|p| p.year)
    }
}
