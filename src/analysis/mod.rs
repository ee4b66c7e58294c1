mod growth;
mod model;

pub use growth::{
    analyze_crossing, population_for_year, project_range, year_to_reach, MAX_PROJECTION_YEARS,
};
pub use model::PopulationModel;
