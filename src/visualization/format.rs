use crate::models::{PopulationUnit, TargetMode};

/// Insert `sep` between every group of three digits, counting from the right.
fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(ch);
    }
    grouped
}

/// Head count with comma thousands separators, e.g. `3,073,276`.
pub fn format_people(people: u64) -> String {
    group_digits(&people.to_string(), ',')
}

/// Head count in millions with Spanish separators, e.g. `1.234,568 millones`.
pub fn format_people_to_millions(people: u64) -> String {
    let fixed = format!("{:.3}", people as f64 / 1_000_000.0);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "000"));
    format!("{},{} millones", group_digits(whole, '.'), fraction)
}

/// Target value as the user typed it, with its unit.
pub fn format_target(value: f64, unit: PopulationUnit) -> String {
    match unit {
        PopulationUnit::People => format!("{value} people"),
        PopulationUnit::Millions => format!("{value} million"),
    }
}

/// One-line answer for the forward model.
pub fn format_population_result(year: i32, population: u64) -> String {
    format!(
        "Estimated population in {year}: {} people ({})",
        format_people(population),
        format_people_to_millions(population)
    )
}

/// One-line answer for the inverse model.
pub fn format_reach_result(target: f64, unit: PopulationUnit, mode: TargetMode, year: i32) -> String {
    format!(
        "Population {} {} is first reached in {year}.",
        mode.symbol(),
        format_target(target, unit)
    )
}
