use tracing::debug;

use crate::error::PopulationError;
use crate::models::{CrossingAnalysis, ModelParameters, ProjectionPoint, TargetMode};

/// Longest series `project_range` will build.
pub const MAX_PROJECTION_YEARS: i64 = 10_000;

/// Years charted past the base year when no target is given.
const DEFAULT_CHART_SPAN: i32 = 10;
/// Years charted past the crossing year.
const CROSSING_MARGIN: i32 = 2;

/// Continuous model value after `elapsed` years.
fn raw_population(params: &ModelParameters, elapsed: i32) -> f64 {
    params.base_population * params.growth_factor().powi(elapsed)
}

/// Model value as reported to callers, using the model's rounding rule.
fn reported_population(params: &ModelParameters, elapsed: i32) -> f64 {
    params.rounding.apply(raw_population(params, elapsed))
}

fn to_head_count(value: f64) -> Result<u64, PopulationError> {
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return Err(PopulationError::OutOfRange(format!(
            "population {value} cannot be represented as a head count"
        )));
    }
    Ok(value as u64)
}

/// Estimated population at `year`:
/// `base_population * (1 + rate)^(year - base_year)`, rounded to whole people.
pub fn population_for_year(params: &ModelParameters, year: i32) -> Result<u64, PopulationError> {
    params.validate()?;
    if year < params.base_year {
        return Err(PopulationError::InvalidInput(format!(
            "year {year} precedes model's base year {}",
            params.base_year
        )));
    }
    let elapsed = year.checked_sub(params.base_year).ok_or_else(|| {
        PopulationError::OutOfRange(format!(
            "{year} is too far from base year {}",
            params.base_year
        ))
    })?;
    to_head_count(reported_population(params, elapsed))
}

/// First year whose estimated population satisfies `target` under `mode`.
///
/// Uses the closed form `n = ceil(ln(threshold / P0) / ln(1 + rate))`, where
/// `threshold` is the smallest continuous value that rounds to a satisfying head
/// count, then walks `n` against the reported (rounded) population so that
/// floating-point error at the boundary can never yield a year that is too early
/// or too late.
pub fn year_to_reach(
    params: &ModelParameters,
    target: f64,
    mode: TargetMode,
) -> Result<i32, PopulationError> {
    params.validate()?;
    if !target.is_finite() || target <= 0.0 {
        return Err(PopulationError::InvalidInput(format!(
            "target population must be positive, got {target}"
        )));
    }

    let satisfied = |n: i32| mode.is_satisfied(reported_population(params, n), target);

    if satisfied(0) {
        return Ok(params.base_year);
    }

    let growth_factor = params.growth_factor();
    if growth_factor <= 1.0 {
        return Err(PopulationError::UnreachableTarget {
            target,
            growth_factor,
        });
    }

    let max_elapsed = (i32::MAX as i64 - params.base_year as i64).min(i32::MAX as i64) as i32;
    let out_of_range = || {
        PopulationError::OutOfRange(format!(
            "target {target} is not reached before year {}",
            i32::MAX
        ))
    };

    // Aim the closed form at the continuous value whose reported count first
    // satisfies the target, so the loops below only absorb floating-point error.
    let threshold = params
        .rounding
        .lower_bound(mode.required_head_count(target));
    let estimate = ((threshold / params.base_population).ln() / growth_factor.ln())
        .ceil()
        .max(0.0);
    if estimate > max_elapsed as f64 {
        return Err(out_of_range());
    }
    let mut n = estimate as i32;
    debug!(target, ?mode, n, "closed-form crossing estimate");

    while !satisfied(n) {
        if n >= max_elapsed {
            return Err(out_of_range());
        }
        n += 1;
        debug!(n, "stepping past boundary");
    }
    while n > 0 && satisfied(n - 1) {
        n -= 1;
        debug!(n, "stepping back to first satisfying year");
    }

    Ok(params.base_year + n)
}

/// One projection point per year in `start..=end`.
pub fn project_range(
    params: &ModelParameters,
    start: i32,
    end: i32,
) -> Result<Vec<ProjectionPoint>, PopulationError> {
    if start < params.base_year {
        return Err(PopulationError::InvalidInput(format!(
            "start year {start} precedes model's base year {}",
            params.base_year
        )));
    }
    if end < start {
        return Err(PopulationError::InvalidInput(format!(
            "end year {end} must not precede start year {start}"
        )));
    }
    let span = end as i64 - start as i64 + 1;
    if span > MAX_PROJECTION_YEARS {
        return Err(PopulationError::OutOfRange(format!(
            "projection of {span} years exceeds the limit of {MAX_PROJECTION_YEARS}"
        )));
    }

    (start..=end)
        .map(|year| {
            Ok(ProjectionPoint {
                year,
                population: population_for_year(params, year)?,
            })
        })
        .collect()
}

/// Trajectory around the year a target is crossed.
///
/// With a positive target the series runs from the base year to two years past
/// the crossing (at least two years in total). A missing or non-positive target
/// charts the first ten years with no crossing.
pub fn analyze_crossing(
    params: &ModelParameters,
    target: Option<f64>,
    mode: TargetMode,
) -> Result<CrossingAnalysis, PopulationError> {
    let base = params.base_year;

    match target.filter(|t| *t > 0.0) {
        Some(target) => {
            let crossing_year = year_to_reach(params, target, mode)?;
            let end = base
                .saturating_add(CROSSING_MARGIN)
                .max(crossing_year.saturating_add(CROSSING_MARGIN));
            let series = project_range(params, base, end)?;
            let population_at_crossing = population_for_year(params, crossing_year)?;
            Ok(CrossingAnalysis {
                target: Some(target),
                mode,
                crossing_year: Some(crossing_year),
                population_at_crossing: Some(population_at_crossing),
                series,
            })
        }
        None => Ok(CrossingAnalysis {
            target: None,
            mode,
            crossing_year: None,
            population_at_crossing: None,
            series: project_range(params, base, base.saturating_add(DEFAULT_CHART_SPAN))?,
        }),
    }
}
