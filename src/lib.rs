pub mod analysis;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod visualization;

pub use analysis::PopulationModel;
pub use config::AppConfig;
pub use error::PopulationError;
pub use models::{
    CrossingAnalysis, ModelParameters, PopulationUnit, ProjectionPoint, RoundingRule, TargetMode,
};
