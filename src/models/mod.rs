mod params;
mod projection;
mod unit;

pub use params::{ModelParameters, RoundingRule, TargetMode};
pub use projection::{CrossingAnalysis, ProjectionPoint};
pub use unit::PopulationUnit;
