use thiserror::Error;

/// Errors that can occur while projecting population.
#[derive(Error, Debug)]
pub enum PopulationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "Unreachable target: {target} people can never be reached with growth factor {growth_factor}"
    )]
    UnreachableTarget { target: f64, growth_factor: f64 },

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PopulationError {
    /// True for failures caused by the caller's values rather than the environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PopulationError::InvalidInput(_)
                | PopulationError::UnreachableTarget { .. }
                | PopulationError::Parse(_)
        )
    }
}

impl From<toml::de::Error> for PopulationError {
    fn from(e: toml::de::Error) -> Self {
        PopulationError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = PopulationError::InvalidInput("year 2022 precedes model's base year 2023".into());
        assert_eq!(
            err.to_string(),
            "Invalid input: year 2022 precedes model's base year 2023"
        );
    }

    #[test]
    fn test_unreachable_target_display() {
        let err = PopulationError::UnreachableTarget {
            target: 4_000_000.0,
            growth_factor: 0.98,
        };
        let msg = err.to_string();
        assert!(msg.contains("Unreachable target"));
        assert!(msg.contains("4000000"));
        assert!(msg.contains("0.98"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = PopulationError::Parse("'abc' is not a year".to_string());
        assert_eq!(err.to_string(), "Parse error: 'abc' is not a year");
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: PopulationError = io_err.into();
        assert!(matches!(err, PopulationError::Io(_)));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_toml_error_from_conversion() {
        let result: Result<toml::Value, _> = toml::from_str("base_year = = 3");
        let err: PopulationError = result.unwrap_err().into();
        assert!(matches!(err, PopulationError::Config(_)));
        assert!(err.to_string().starts_with("Config error"));
    }

    #[test]
    fn test_json_error_from_conversion() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{{not json");
        let err: PopulationError = result.unwrap_err().into();
        assert!(matches!(err, PopulationError::Json(_)));
    }

    #[test]
    fn test_is_invalid_input_classification() {
        assert!(PopulationError::InvalidInput("x".into()).is_invalid_input());
        assert!(PopulationError::Parse("x".into()).is_invalid_input());
        assert!(PopulationError::UnreachableTarget {
            target: 1.0,
            growth_factor: 1.0
        }
        .is_invalid_input());
        assert!(!PopulationError::OutOfRange("x".into()).is_invalid_input());
        assert!(!PopulationError::Config("x".into()).is_invalid_input());
    }
}
