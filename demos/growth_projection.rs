//! Growth projection example: compare the projection of two growth rates.
//!
//! Run from the project root:
//!   cargo run --example growth_projection

use population_projection::visualization::{print_model_summary, print_projection_table};
use population_projection::{ModelParameters, PopulationModel};

fn main() {
    for rate in [0.03, 0.015] {
        let params = ModelParameters {
            annual_growth_rate: rate,
            ..ModelParameters::default()
        };
        let model = match PopulationModel::new(params) {
            Ok(model) => model,
            Err(e) => {
                eprintln!("Invalid parameters: {e}");
                continue;
            }
        };

        print_model_summary(model.params());
        match model.project(model.base_year(), model.base_year() + 20) {
            Ok(series) => print_projection_table(&series),
            Err(e) => eprintln!("Projection failed: {e}"),
        }
        println!();
    }
}
