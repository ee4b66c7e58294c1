use colored::Colorize;
use tracing::warn;

use crate::error::PopulationError;
use crate::models::{CrossingAnalysis, ProjectionPoint};

use super::format::format_people;
use super::tables::{format_crossing_summary, format_projection_table};

const BAR: char = '\u{2588}';
const TARGET_MARK: char = '\u{2502}';

/// A charting capability the presentation layer may or may not have.
pub trait ChartBackend {
    /// Short name shown in diagnostics.
    fn name(&self) -> &'static str;

    /// Chart of a year-by-year trajectory.
    fn render_projection(&self, series: &[ProjectionPoint]) -> String;

    /// Chart of a trajectory with the target threshold and crossing year marked.
    fn render_crossing(&self, analysis: &CrossingAnalysis) -> String;
}

/// Horizontal bar charts drawn with block characters.
#[derive(Debug, Clone, Copy)]
pub struct TerminalChart {
    pub bar_width: usize,
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self { bar_width: 40 }
    }
}

impl TerminalChart {
    fn max_population(series: &[ProjectionPoint]) -> f64 {
        series
            .iter()
            .map(|p| p.population as f64)
            .fold(0.0f64, f64::max)
    }

    fn scale(&self, value: f64, max: f64) -> usize {
        if max > 0.0 {
            ((value / max) * self.bar_width as f64).round() as usize
        } else {
            0
        }
    }

    /// Bar for one row with an optional target marker column.
    fn bar(&self, len: usize, marker: Option<usize>) -> String {
        let width = match marker {
            Some(m) => len.max(m + 1),
            None => len,
        };
        (0..width)
            .map(|i| {
                if Some(i) == marker {
                    TARGET_MARK
                } else if i < len {
                    BAR
                } else {
                    ' '
                }
            })
            .collect()
    }
}

impl ChartBackend for TerminalChart {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn render_projection(&self, series: &[ProjectionPoint]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", "Projection Chart".bold().green()));
        output.push_str(&format!("{}\n", "=".repeat(60)));

        if series.is_empty() {
            output.push_str("  No data available.\n");
            return output;
        }

        let max = Self::max_population(series);
        output.push_str(&format!("  {:>6}  {:>13}  Population\n", "Year", "People"));
        output.push_str(&format!("  {}\n", "-".repeat(66)));

        for point in series {
            let bar = self.bar(self.scale(point.population as f64, max), None);
            output.push_str(&format!(
                "  {:>6}  {:>13}  {}\n",
                point.year,
                format_people(point.population),
                bar.blue()
            ));
        }

        output.push('\n');
        output
    }

    fn render_crossing(&self, analysis: &CrossingAnalysis) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", "Population and Target".bold().green()));
        output.push_str(&format!("{}\n", "=".repeat(60)));

        if analysis.series.is_empty() {
            output.push_str("  No data available.\n");
            return output;
        }

        let max = Self::max_population(&analysis.series).max(analysis.target.unwrap_or(0.0));
        let marker = analysis
            .target
            .map(|t| self.scale(t, max).min(self.bar_width.saturating_sub(1)));

        output.push_str(&format!("  {:>6}  {:>13}  Population\n", "Year", "People"));
        output.push_str(&format!("  {}\n", "-".repeat(66)));

        for point in &analysis.series {
            let bar = self.bar(self.scale(point.population as f64, max), marker);
            if Some(point.year) == analysis.crossing_year {
                output.push_str(&format!(
                    "{}\n",
                    format!(
                        "  {:>6}  {:>13}  {}  \u{25c0} crossing",
                        point.year,
                        format_people(point.population),
                        bar
                    )
                    .yellow()
                    .bold()
                ));
            } else {
                output.push_str(&format!(
                    "  {:>6}  {:>13}  {}\n",
                    point.year,
                    format_people(point.population),
                    bar.green()
                ));
            }
        }

        match analysis.target {
            Some(target) => output.push_str(&format!(
                "\n  {} target: P {} {:.0} people\n",
                TARGET_MARK.to_string().red(),
                analysis.mode.symbol(),
                target
            )),
            None => output.push_str("\n  No target given.\n"),
        }
        output
    }
}

/// Pick the chart backend for this session; `None` means text only.
pub fn chart_backend(charts_enabled: bool) -> Option<Box<dyn ChartBackend>> {
    if charts_enabled {
        Some(Box::new(TerminalChart::default()))
    } else {
        None
    }
}

const CHARTS_UNAVAILABLE_HINT: &str =
    "  Charts are unavailable; set `charts = true` under [display] or drop --no-charts.\n";

/// Note shown in place of a chart whose data could not be built; the answer
/// it accompanies stays valid.
pub fn chart_fallback(error: &PopulationError) -> String {
    warn!(error = %error, "chart skipped");
    format!("\n  Chart unavailable ({error}); showing text only.\n")
}

/// Projection table followed by a chart when one is available.
pub fn render_projection_view(series: &[ProjectionPoint], backend: Option<&dyn ChartBackend>) -> String {
    let mut output = format_projection_table(series);
    match backend {
        Some(chart) => output.push_str(&chart.render_projection(series)),
        None => {
            output.push('\n');
            output.push_str(CHARTS_UNAVAILABLE_HINT);
        }
    }
    output
}

/// Crossing summary followed by a chart when one is available.
pub fn render_crossing_view(analysis: &CrossingAnalysis, backend: Option<&dyn ChartBackend>) -> String {
    let mut output = format_crossing_summary(analysis);
    match backend {
        Some(chart) => output.push_str(&chart.render_crossing(analysis)),
        None => {
            output.push('\n');
            output.push_str(CHARTS_UNAVAILABLE_HINT);
        }
    }
    output
}
