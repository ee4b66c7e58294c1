use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use population_projection::{
    form::FormSession,
    visualization::{
        chart_backend, chart_fallback, format_people, format_population_result,
        format_reach_result, print_model_summary, render_crossing_view, render_projection_view,
    },
    AppConfig, PopulationModel, PopulationUnit, ProjectionPoint, RoundingRule, TargetMode,
};

/// Years projected by `project` when `--to` is omitted.
const DEFAULT_PROJECTION_SPAN: i32 = 20;
/// Reference scenario shown by `summary`.
const REFERENCE_YEAR_OFFSET: i32 = 7;
const REFERENCE_TARGET: f64 = 4_000_000.0;

#[derive(Parser)]
#[command(
    name = "population-projection",
    about = "Population Projection - geometric growth estimates and target crossings",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the model's base year
    #[arg(long, global = true, allow_negative_numbers = true)]
    base_year: Option<i32>,

    /// Override the population at the base year (people)
    #[arg(long, global = true)]
    base_population: Option<f64>,

    /// Override the annual growth rate (0.03 = 3%)
    #[arg(long, global = true, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Rounding rule for reported populations: nearest or ceiling
    #[arg(long, global = true)]
    rounding: Option<RoundingRule>,

    /// Disable terminal charts
    #[arg(long, global = true)]
    no_charts: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the population in a given year
    Population {
        /// Year to estimate (must not precede the base year)
        #[arg(short, long, allow_negative_numbers = true)]
        year: i32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the first year a target population is reached
    Reach {
        /// Target population
        #[arg(short, long, allow_negative_numbers = true)]
        target: f64,

        /// Unit of the target: people or millions
        #[arg(short, long)]
        unit: Option<PopulationUnit>,

        /// Require the population to strictly exceed the target
        #[arg(short, long)]
        strict: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project the population year by year
    Project {
        /// First year (defaults to the base year)
        #[arg(long, allow_negative_numbers = true)]
        from: Option<i32>,

        /// Last year (defaults to twenty years after the base year)
        #[arg(long, allow_negative_numbers = true)]
        to: Option<i32>,

        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the model and its reference scenario
    Summary,

    /// Answer questions typed line by line on stdin
    Interactive {
        /// Unit used for targets: people or millions
        #[arg(short, long)]
        unit: Option<PopulationUnit>,
    },
}

#[derive(Serialize)]
struct ReachReport {
    target_people: f64,
    mode: TargetMode,
    year: i32,
    population: u64,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("population_projection=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = AppConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            config
        }
        None => AppConfig::default(),
    };

    if let Some(year) = cli.base_year {
        config.model.base_year = year;
    }
    if let Some(population) = cli.base_population {
        config.model.base_population = population;
    }
    if let Some(rate) = cli.rate {
        config.model.annual_growth_rate = rate;
    }
    if let Some(rounding) = cli.rounding {
        config.model.rounding = rounding;
    }
    if cli.no_charts {
        config.display.charts = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let model = PopulationModel::new(config.model)?;
    let charts = chart_backend(config.display.charts);
    debug!(params = ?model.params(), charts = charts.is_some(), "model ready");

    match cli.command {
        Commands::Population { year, json } => {
            let population = model.population_for_year(year)?;
            if json {
                let point = ProjectionPoint { year, population };
                println!("{}", serde_json::to_string_pretty(&point)?);
            } else {
                println!("{}", format_population_result(year, population));
            }
        }

        Commands::Reach {
            target,
            unit,
            strict,
            json,
        } => {
            let unit = unit.unwrap_or(config.display.unit);
            let mode = TargetMode::from_strict(strict);
            let people = unit.to_people(target);
            let year = model.year_to_reach(people, mode)?;

            if json {
                let report = ReachReport {
                    target_people: people,
                    mode,
                    year,
                    population: model.population_for_year(year)?,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", format_reach_result(target, unit, mode, year));
                if charts.is_some() {
                    match model.crossing(Some(people), mode) {
                        Ok(analysis) => {
                            print!("{}", render_crossing_view(&analysis, charts.as_deref()))
                        }
                        Err(e) => print!("{}", chart_fallback(&e)),
                    }
                }
            }
        }

        Commands::Project { from, to, json } => {
            let start = from.unwrap_or(model.base_year());
            let end = to.unwrap_or_else(|| model.base_year().saturating_add(DEFAULT_PROJECTION_SPAN));
            let series = model.project(start, end)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                println!(
                    "\n{}",
                    format!("Population Projection: {start}-{end}").bold().cyan()
                );
                print!("{}", render_projection_view(&series, charts.as_deref()));
            }
        }

        Commands::Summary => {
            let params = model.params();
            print_model_summary(params);

            let year = params.base_year.saturating_add(REFERENCE_YEAR_OFFSET);
            let population = model.population_for_year(year)?;
            println!("\n{}", "Reference Scenario".bold().cyan());
            println!("{}", "=".repeat(50));
            println!("  {}", format_population_result(year, population));

            let label = format!(
                "First year exceeding {} people",
                format_people(REFERENCE_TARGET as u64)
            );
            match model.year_to_reach(REFERENCE_TARGET, TargetMode::StrictlyExceed) {
                Ok(crossing) => println!(
                    "  {label}: {crossing} ({} people)",
                    format_people(model.population_for_year(crossing)?)
                ),
                Err(e) => println!("  {label}: {} ({e})", "never".yellow()),
            }
        }

        Commands::Interactive { unit } => {
            let unit = unit.unwrap_or(config.display.unit);
            println!(
                "\n{}",
                format!(
                    "Population form (base year {}, targets in {unit})",
                    model.base_year()
                )
                .bold()
                .cyan()
            );
            let session = FormSession::new(&model, unit, charts.as_deref());
            let stdin = std::io::stdin();
            session.run(stdin.lock(), std::io::stdout())?;
        }
    }

    Ok(())
}
