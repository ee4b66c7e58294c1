use serde::{Deserialize, Serialize};

use crate::error::PopulationError;

/// Rounding applied when the continuous model value is reported as a count of people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingRule {
    /// Round half away from zero.
    #[default]
    Nearest,
    /// Round up to the next whole person.
    Ceiling,
}

impl RoundingRule {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            RoundingRule::Nearest => value.round(),
            RoundingRule::Ceiling => value.ceil(),
        }
    }

    /// Smallest continuous value reported as at least `count` people.
    /// Under `Ceiling` the bound is exclusive.
    pub fn lower_bound(self, count: f64) -> f64 {
        match self {
            RoundingRule::Nearest => count - 0.5,
            RoundingRule::Ceiling => count - 1.0,
        }
    }
}

impl std::fmt::Display for RoundingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundingRule::Nearest => write!(f, "nearest"),
            RoundingRule::Ceiling => write!(f, "ceiling"),
        }
    }
}

impl std::str::FromStr for RoundingRule {
    type Err = PopulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" | "round" | "n" => Ok(RoundingRule::Nearest),
            "ceiling" | "ceil" | "c" => Ok(RoundingRule::Ceiling),
            _ => Err(PopulationError::Parse(format!(
                "Unknown rounding rule: '{s}'. Use: nearest or ceiling"
            ))),
        }
    }
}

/// How a population is compared against a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetMode {
    /// Population >= target.
    #[default]
    ReachOrExceed,
    /// Population > target.
    StrictlyExceed,
}

impl TargetMode {
    pub fn from_strict(strictly_greater: bool) -> Self {
        if strictly_greater {
            TargetMode::StrictlyExceed
        } else {
            TargetMode::ReachOrExceed
        }
    }

    pub fn is_satisfied(self, population: f64, target: f64) -> bool {
        match self {
            TargetMode::ReachOrExceed => population >= target,
            TargetMode::StrictlyExceed => population > target,
        }
    }

    /// Smallest whole head count that satisfies `target`.
    pub fn required_head_count(self, target: f64) -> f64 {
        match self {
            TargetMode::ReachOrExceed => target.ceil(),
            TargetMode::StrictlyExceed => target.floor() + 1.0,
        }
    }

    /// Comparison operator shown to users.
    pub fn symbol(self) -> &'static str {
        match self {
            TargetMode::ReachOrExceed => "\u{2265}",
            TargetMode::StrictlyExceed => ">",
        }
    }
}

/// Immutable parameters of the geometric growth model P(n) = P0 * (1 + r)^n.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Year at which the population equals `base_population` exactly
    pub base_year: i32,
    /// Population at the base year, in people
    pub base_population: f64,
    /// Annual growth rate as a proportion (0.03 = 3%)
    pub annual_growth_rate: f64,
    /// Rounding used for every reported population
    pub rounding: RoundingRule,
}

impl Default for ModelParameters {
    /// Medellín, 2023: 2.5 million people growing 3% a year.
    fn default() -> Self {
        Self {
            base_year: 2023,
            base_population: 2_500_000.0,
            annual_growth_rate: 0.03,
            rounding: RoundingRule::Nearest,
        }
    }
}

impl ModelParameters {
    pub fn new(base_year: i32, base_population: f64, annual_growth_rate: f64) -> Self {
        Self {
            base_year,
            base_population,
            annual_growth_rate,
            rounding: RoundingRule::default(),
        }
    }

    pub fn with_rounding(mut self, rounding: RoundingRule) -> Self {
        self.rounding = rounding;
        self
    }

    /// Ratio of the progression, `1 + annual_growth_rate`.
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.annual_growth_rate
    }

    /// Check that the parameters describe a usable model.
    pub fn validate(&self) -> Result<(), PopulationError> {
        if !self.base_population.is_finite() || self.base_population <= 0.0 {
            return Err(PopulationError::InvalidInput(format!(
                "base population must be positive and finite, got {}",
                self.base_population
            )));
        }
        if !self.annual_growth_rate.is_finite() || self.annual_growth_rate <= -1.0 {
            return Err(PopulationError::InvalidInput(format!(
                "annual growth rate must be finite and greater than -1, got {}",
                self.annual_growth_rate
            )));
        }
        Ok(())
    }
}
