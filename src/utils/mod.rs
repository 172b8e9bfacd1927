pub mod csv_handler;
pub mod time_parser;

pub use csv_handler::{export_ranking_to_csv, export_revenue_to_csv};
pub use time_parser::{lookback_range, parse_duration};
