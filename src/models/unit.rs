use serde::{Deserialize, Serialize};

use crate::error::PopulationError;

const PEOPLE_PER_MILLION: f64 = 1_000_000.0;

/// Unit a caller uses to express a population figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationUnit {
    People,
    #[default]
    Millions,
}

impl PopulationUnit {
    /// Convert a value expressed in this unit to people.
    pub fn to_people(self, value: f64) -> f64 {
        match self {
            PopulationUnit::People => value,
            PopulationUnit::Millions => value * PEOPLE_PER_MILLION,
        }
    }

    /// Express a head count in this unit.
    pub fn from_people(self, people: u64) -> f64 {
        match self {
            PopulationUnit::People => people as f64,
            PopulationUnit::Millions => people as f64 / PEOPLE_PER_MILLION,
        }
    }
}

impl std::fmt::Display for PopulationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PopulationUnit::People => write!(f, "people"),
            PopulationUnit::Millions => write!(f, "millions"),
        }
    }
}

impl std::str::FromStr for PopulationUnit {
    type Err = PopulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "people" | "persons" | "p" => Ok(PopulationUnit::People),
            "millions" | "million" | "m" => Ok(PopulationUnit::Millions),
            _ => Err(PopulationError::Parse(format!(
                "Unknown population unit: '{s}'. Use: people or millions"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_millions_to_people() {
        assert_approx_eq!(PopulationUnit::Millions.to_people(4.0), 4_000_000.0);
        assert_approx_eq!(PopulationUnit::Millions.to_people(2.5), 2_500_000.0);
        assert_approx_eq!(PopulationUnit::People.to_people(42.0), 42.0);
    }

    #[test]
    fn test_from_people() {
        assert_approx_eq!(PopulationUnit::Millions.from_people(3_074_685), 3.074685);
        assert_approx_eq!(PopulationUnit::People.from_people(17), 17.0);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("M".parse::<PopulationUnit>().unwrap(), PopulationUnit::Millions);
        assert_eq!("people".parse::<PopulationUnit>().unwrap(), PopulationUnit::People);
        let err = "thousands".parse::<PopulationUnit>().unwrap_err();
        assert!(err.to_string().contains("thousands"));
    }
}
