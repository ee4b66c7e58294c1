use serde::Serialize;

use crate::analysis::{analyze_crossing, population_for_year, project_range, year_to_reach};
use crate::error::PopulationError;
use crate::models::{CrossingAnalysis, ModelParameters, ProjectionPoint, TargetMode};

/// Unified API that groups every projection operation on one set of parameters.
///
/// Instances are immutable and hold no state besides their parameters, so one
/// model can be shared freely between callers and threads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopulationModel {
    params: ModelParameters,
}

impl PopulationModel {
    /// Create a model, rejecting parameters that cannot describe a population.
    pub fn new(params: ModelParameters) -> Result<Self, PopulationError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn base_year(&self) -> i32 {
        self.params.base_year
    }

    /// Estimated population at `year` (must not precede the base year).
    pub fn population_for_year(&self, year: i32) -> Result<u64, PopulationError> {
        population_for_year(&self.params, year)
    }

    /// First year reaching (`>=`) or exceeding (`>`) `target` people.
    pub fn year_to_reach(&self, target: f64, mode: TargetMode) -> Result<i32, PopulationError> {
        year_to_reach(&self.params, target, mode)
    }

    /// `year_to_reach` with the mode given as a "strictly greater" flag.
    pub fn year_to_reach_strict(
        &self,
        target: f64,
        strictly_greater: bool,
    ) -> Result<i32, PopulationError> {
        self.year_to_reach(target, TargetMode::from_strict(strictly_greater))
    }

    /// Year-by-year projection over `start..=end`.
    pub fn project(&self, start: i32, end: i32) -> Result<Vec<ProjectionPoint>, PopulationError> {
        project_range(&self.params, start, end)
    }

    /// Trajectory and crossing year for an optional target.
    pub fn crossing(
        &self,
        target: Option<f64>,
        mode: TargetMode,
    ) -> Result<CrossingAnalysis, PopulationError> {
        analyze_crossing(&self.params, target, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_parameters() {
        let err = PopulationModel::new(ModelParameters::new(2023, -1.0, 0.03)).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_population_matches_standalone() {
        let model = PopulationModel::default();
        for year in [2023, 2030, 2050] {
            assert_eq!(
                model.population_for_year(year).unwrap(),
                population_for_year(model.params(), year).unwrap()
            );
        }
    }

    #[test]
    fn test_strict_flag_maps_to_mode() {
        let model = PopulationModel::default();
        assert_eq!(model.year_to_reach_strict(2_500_000.0, false).unwrap(), 2023);
        assert_eq!(model.year_to_reach_strict(2_500_000.0, true).unwrap(), 2024);
    }

    #[test]
    fn test_project_matches_standalone() {
        let model = PopulationModel::default();
        let from_model = model.project(2023, 2030).unwrap();
        let from_standalone = project_range(model.params(), 2023, 2030).unwrap();
        assert_eq!(from_model, from_standalone);
    }

    #[test]
    fn test_independent_models() {
        let fast = PopulationModel::new(ModelParameters::new(2000, 1_000.0, 0.10)).unwrap();
        let slow = PopulationModel::new(ModelParameters::new(2000, 1_000.0, 0.01)).unwrap();
        assert_eq!(fast.population_for_year(2001).unwrap(), 1_100);
        assert_eq!(slow.population_for_year(2001).unwrap(), 1_010);
        assert!(
            fast.year_to_reach(2_000.0, TargetMode::ReachOrExceed).unwrap()
                < slow.year_to_reach(2_000.0, TargetMode::ReachOrExceed).unwrap()
        );
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PopulationModel>();
    }
}
