//! Line-oriented input form: parses free text, calls the model, renders replies.

use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::warn;

use crate::analysis::PopulationModel;
use crate::error::PopulationError;
use crate::models::{PopulationUnit, TargetMode};
use crate::visualization::{
    chart_fallback, format_population_result, format_reach_result, render_crossing_view,
    render_projection_view, ChartBackend,
};

const HELP: &str = "\
Commands:
  year <YEAR>              estimate the population in YEAR
  target <VALUE> [strict]  first year reaching VALUE (strict: exceeding it)
  project <FROM> <TO>      year-by-year projection
  help                     show this help
  quit                     leave the form
";

/// Parse a year typed by the user.
pub fn parse_year(text: &str) -> Result<i32, PopulationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PopulationError::Parse("a year is required".to_string()));
    }
    text.parse()
        .map_err(|_| PopulationError::Parse(format!("'{text}' is not a valid year")))
}

/// Parse a target value, accepting a comma as decimal separator.
pub fn parse_target(text: &str) -> Result<f64, PopulationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PopulationError::Parse(
            "a target population is required".to_string(),
        ));
    }
    text.replace(',', ".")
        .parse()
        .map_err(|_| PopulationError::Parse(format!("'{text}' is not a valid number")))
}

/// One parsed line of form input.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    Population { year: i32 },
    Reach { target: f64, mode: TargetMode },
    Project { start: i32, end: i32 },
    Help,
    Quit,
}

impl std::str::FromStr for FormCommand {
    type Err = PopulationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("").to_lowercase();
        let args: Vec<&str> = words.collect();

        match (command.as_str(), args.as_slice()) {
            ("year" | "y", [year]) => Ok(FormCommand::Population {
                year: parse_year(year)?,
            }),
            ("target" | "t", [target]) => Ok(FormCommand::Reach {
                target: parse_target(target)?,
                mode: TargetMode::ReachOrExceed,
            }),
            ("target" | "t", [target, flag]) if flag.eq_ignore_ascii_case("strict") => {
                Ok(FormCommand::Reach {
                    target: parse_target(target)?,
                    mode: TargetMode::StrictlyExceed,
                })
            }
            ("project" | "p", [start, end]) => Ok(FormCommand::Project {
                start: parse_year(start)?,
                end: parse_year(end)?,
            }),
            ("help" | "h" | "?", []) => Ok(FormCommand::Help),
            ("quit" | "q" | "exit", []) => Ok(FormCommand::Quit),
            ("", _) => Err(PopulationError::Parse("empty input".to_string())),
            _ => Err(PopulationError::Parse(format!(
                "unrecognised input '{}'; type 'help' for commands",
                line.trim()
            ))),
        }
    }
}

/// Result of handling one line.
#[derive(Debug, Clone, PartialEq)]
pub enum FormReply {
    Output(String),
    Quit,
}

/// Interactive session over one model.
pub struct FormSession<'a> {
    model: &'a PopulationModel,
    unit: PopulationUnit,
    charts: Option<&'a dyn ChartBackend>,
}

impl<'a> FormSession<'a> {
    pub fn new(
        model: &'a PopulationModel,
        unit: PopulationUnit,
        charts: Option<&'a dyn ChartBackend>,
    ) -> Self {
        Self {
            model,
            unit,
            charts,
        }
    }

    /// Parse and answer one line of input.
    pub fn handle(&self, line: &str) -> Result<FormReply, PopulationError> {
        let reply = match line.parse::<FormCommand>()? {
            FormCommand::Population { year } => {
                let population = self.model.population_for_year(year)?;
                let mut text = format_population_result(year, population);
                text.push('\n');
                if let Some(chart) = self.charts {
                    match self.model.project(self.model.base_year(), year) {
                        Ok(series) => text.push_str(&chart.render_projection(&series)),
                        Err(e) => text.push_str(&chart_fallback(&e)),
                    }
                }
                text
            }
            FormCommand::Reach { target, mode } => {
                let people = self.unit.to_people(target);
                let year = self.model.year_to_reach(people, mode)?;
                let mut text = format_reach_result(target, self.unit, mode, year);
                text.push('\n');
                if self.charts.is_some() {
                    match self.model.crossing(Some(people), mode) {
                        Ok(analysis) => {
                            text.push_str(&render_crossing_view(&analysis, self.charts))
                        }
                        Err(e) => text.push_str(&chart_fallback(&e)),
                    }
                }
                text
            }
            FormCommand::Project { start, end } => {
                let series = self.model.project(start, end)?;
                render_projection_view(&series, self.charts)
            }
            FormCommand::Help => HELP.to_string(),
            FormCommand::Quit => return Ok(FormReply::Quit),
        };
        Ok(FormReply::Output(reply))
    }

    /// Read commands until `quit` or end of input, writing replies and errors to `output`.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<(), PopulationError> {
        write!(output, "{HELP}> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                match self.handle(&line) {
                    Ok(FormReply::Output(text)) => write!(output, "{text}")?,
                    Ok(FormReply::Quit) => return Ok(()),
                    Err(e) if e.is_invalid_input() => writeln!(output, "{}", e.to_string().red())?,
                    Err(e) => {
                        warn!(error = %e, "form command failed");
                        writeln!(output, "{} {e}", "Error:".red().bold())?;
                    }
                }
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelParameters;
    use crate::visualization::TerminalChart;

    fn reply_text(reply: FormReply) -> String {
        match reply {
            FormReply::Output(text) => text,
            FormReply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(" 2030 ").unwrap(), 2030);
        assert!(matches!(parse_year(""), Err(PopulationError::Parse(_))));
        assert!(matches!(parse_year("20x0"), Err(PopulationError::Parse(_))));
    }

    #[test]
    fn test_parse_target_accepts_comma_decimal() {
        assert_eq!(parse_target("4,5").unwrap(), 4.5);
        assert_eq!(parse_target("4.0").unwrap(), 4.0);
        assert!(parse_target("four").is_err());
        assert!(parse_target("  ").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "year 2030".parse::<FormCommand>().unwrap(),
            FormCommand::Population { year: 2030 }
        );
        assert_eq!(
            "target 4 strict".parse::<FormCommand>().unwrap(),
            FormCommand::Reach {
                target: 4.0,
                mode: TargetMode::StrictlyExceed
            }
        );
        assert_eq!(
            "T 3,5".parse::<FormCommand>().unwrap(),
            FormCommand::Reach {
                target: 3.5,
                mode: TargetMode::ReachOrExceed
            }
        );
        assert_eq!(
            "project 2023 2030".parse::<FormCommand>().unwrap(),
            FormCommand::Project {
                start: 2023,
                end: 2030
            }
        );
        assert_eq!("quit".parse::<FormCommand>().unwrap(), FormCommand::Quit);
        assert!("target 4 loose".parse::<FormCommand>().is_err());
        assert!("dance".parse::<FormCommand>().is_err());
    }

    #[test]
    fn test_handle_population() {
        let model = PopulationModel::default();
        let session = FormSession::new(&model, PopulationUnit::Millions, None);
        let text = reply_text(session.handle("year 2030").unwrap());
        assert!(text.contains("Estimated population in 2030: 3,074,685 people"));
    }

    #[test]
    fn test_handle_population_before_base_year() {
        let model = PopulationModel::default();
        let session = FormSession::new(&model, PopulationUnit::Millions, None);
        let err = session.handle("year 2000").unwrap_err();
        assert!(matches!(err, PopulationError::InvalidInput(_)));
    }

    #[test]
    fn test_handle_reach_in_millions() {
        let model = PopulationModel::default();
        let session = FormSession::new(&model, PopulationUnit::Millions, None);
        let text = reply_text(session.handle("target 4").unwrap());
        assert!(text.contains("first reached in 2039"));
    }

    #[test]
    fn test_handle_reach_in_people_strict() {
        let model = PopulationModel::default();
        let session = FormSession::new(&model, PopulationUnit::People, None);
        let text = reply_text(session.handle("target 2500000 strict").unwrap());
        assert!(text.contains("first reached in 2024"));
    }

    #[test]
    fn test_handle_negative_target() {
        let model = PopulationModel::default();
        let session = FormSession::new(&model, PopulationUnit::Millions, None);
        let err = session.handle("target -5").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_handle_with_charts() {
        let model = PopulationModel::default();
        let chart = TerminalChart::default();
        let session = FormSession::new(&model, PopulationUnit::Millions, Some(&chart));
        let text = reply_text(session.handle("target 4").unwrap());
        assert!(text.contains("Population and Target"));
        let text = reply_text(session.handle("year 2026").unwrap());
        assert!(text.contains("Projection Chart"));
    }

    #[test]
    fn test_handle_keeps_answer_when_chart_is_too_long() {
        let model =
            PopulationModel::new(ModelParameters::new(2023, 2_500_000.0, 0.0001)).unwrap();
        let chart = TerminalChart::default();
        let session = FormSession::new(&model, PopulationUnit::Millions, Some(&chart));

        let text = reply_text(session.handle("target 7,5").unwrap());
        assert!(text.contains("first reached in 13010"));
        assert!(text.contains("Chart unavailable"));
        assert!(!text.contains("Population and Target"));

        let text = reply_text(session.handle("year 13500").unwrap());
        assert!(text.contains("Estimated population in 13500"));
        assert!(text.contains("Chart unavailable"));
    }

    #[test]
    fn test_run_continues_after_errors() {
        let model = PopulationModel::default();
        let session = FormSession::new(&model, PopulationUnit::Millions, None);
        let input = b"year 2020\nyear abc\nyear 2030\nquit\nyear 2031\n";
        let mut output = Vec::new();
        session.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("precedes model's base year"));
        assert!(text.contains("'abc' is not a valid year"));
        assert!(text.contains("Estimated population in 2030"));
        assert!(!text.contains("Estimated population in 2031"));
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let model = PopulationModel::default();
        let session = FormSession::new(&model, PopulationUnit::Millions, None);
        let mut output = Vec::new();
        session.run(&b"help\n"[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.matches("Commands:").count() >= 2);
    }
}
