use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::models::{CrossingAnalysis, ModelParameters, ProjectionPoint};

use super::format::{format_people, format_people_to_millions};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format the model formula and its parameters as a string.
pub fn format_model_summary(params: &ModelParameters) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Geometric Growth Model".bold().green()));
    output.push_str(&format!(
        "{}\n",
        format!(
            "P(n) = P0 \u{b7} (1 + r)^n, n = year \u{2212} {}",
            params.base_year
        )
        .dimmed()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Parameter", "Value"]);
    table.add_row(vec![
        Cell::new("Base year"),
        Cell::new(params.base_year.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Base population (P0)"),
        Cell::new(format!("{:.0} people", params.base_population)),
    ]);
    table.add_row(vec![
        Cell::new("Annual growth rate (r)"),
        Cell::new(format!("{:.2}%", params.annual_growth_rate * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Growth factor (1 + r)"),
        Cell::new(format!("{}", params.growth_factor())),
    ]);
    table.add_row(vec![
        Cell::new("Rounding"),
        Cell::new(params.rounding.to_string()),
    ]);

    output.push_str(&format!("{table}"));
    output
}

/// Print the model summary.
pub fn print_model_summary(params: &ModelParameters) {
    print!("{}", format_model_summary(params));
}

/// Format a year-by-year projection table as a string.
pub fn format_projection_table(points: &[ProjectionPoint]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Population Projection".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = new_table();
    table.set_header(vec!["Year", "Population", "Millions", "Change"]);

    let mut previous: Option<u64> = None;
    for point in points {
        let change = match previous {
            Some(prev) => format!("+{}", format_people(point.population.saturating_sub(prev))),
            None => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(point.year.to_string()),
            Cell::new(format_people(point.population)),
            Cell::new(format_people_to_millions(point.population)),
            Cell::new(change),
        ]);
        previous = Some(point.population);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print a projection table.
pub fn print_projection_table(points: &[ProjectionPoint]) {
    print!("{}", format_projection_table(points));
}

/// Format the target, crossing year and population at crossing.
pub fn format_crossing_summary(analysis: &CrossingAnalysis) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Target Crossing".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    match (analysis.target, analysis.crossing_year) {
        (Some(target), Some(year)) => {
            table.add_row(vec![
                Cell::new("Target"),
                Cell::new(format!("P {} {:.0} people", analysis.mode.symbol(), target)),
            ]);
            table.add_row(vec![Cell::new("Crossing year"), Cell::new(year.to_string())]);
            if let Some(population) = analysis.population_at_crossing {
                table.add_row(vec![
                    Cell::new("Population at crossing"),
                    Cell::new(format_people(population)),
                ]);
            }
        }
        _ => {
            table.add_row(vec![Cell::new("Target"), Cell::new("none")]);
        }
    }
    if let (Some(first), Some(last)) = (analysis.first_year(), analysis.last_year()) {
        table.add_row(vec![
            Cell::new("Charted years"),
            Cell::new(format!("{first}-{last}")),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}
