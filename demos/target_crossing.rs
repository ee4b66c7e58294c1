//! Target crossing example: when does the population pass 4 million?
//!
//! Run from the project root:
//!   cargo run --example target_crossing

use population_projection::visualization::{render_crossing_view, TerminalChart};
use population_projection::{ModelParameters, PopulationModel, TargetMode};

fn main() {
    let model = PopulationModel::default();
    let chart = TerminalChart::default();

    for mode in [TargetMode::ReachOrExceed, TargetMode::StrictlyExceed] {
        match model.crossing(Some(4_000_000.0), mode) {
            Ok(analysis) => print!("{}", render_crossing_view(&analysis, Some(&chart))),
            Err(e) => eprintln!("Crossing analysis failed: {e}"),
        }
    }

    // Shrinking populations never reach a larger target.
    let shrinking = PopulationModel::new(ModelParameters::new(2023, 2_500_000.0, -0.01))
        .expect("valid parameters");
    if let Err(e) = shrinking.year_to_reach(4_000_000.0, TargetMode::ReachOrExceed) {
        println!("\n{e}");
    }
}
