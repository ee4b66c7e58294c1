mod charts;
mod format;
mod tables;

pub use charts::{
    chart_backend, chart_fallback, render_crossing_view, render_projection_view, ChartBackend,
    TerminalChart,
};
pub use format::{
    format_people, format_people_to_millions, format_population_result, format_reach_result,
    format_target,
};
pub use tables::{
    format_crossing_summary, format_model_summary, format_projection_table, print_model_summary,
    print_projection_table,
};
