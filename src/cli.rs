//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for order-analytics using clap's derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_CONFIG_PATH;

/// order-analytics - Dashboard analytics for restaurant orders
#[derive(Parser)]
#[command(name = "order-analytics")]
#[command(version)]
#[command(about = "Revenue, peak hours and rankings from restaurant orders", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the dashboard report
    Report {
        #[command(flatten)]
        range: RangeArgs,

        /// Number of entries in each ranking (max 100)
        #[arg(long)]
        limit: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Export a dataset to CSV
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Output CSV path
        #[arg(long, short = 'o')]
        output: String,

        /// Dataset to export
        #[arg(long, value_enum, default_value_t = ExportDataset::Revenue)]
        dataset: ExportDataset,

        /// Number of ranking entries (rankings only, max 100)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Order source and date range shared by report commands
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Orders JSON file (overrides store.orders_file)
    #[arg(long)]
    pub orders: Option<String>,

    /// Range start (RFC3339 or YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (RFC3339 or YYYY-MM-DD, date-only means end of day)
    #[arg(long)]
    pub end: Option<String>,

    /// Relative range ending now, e.g. "24h", "7d", "2w" (overrides --start/--end)
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub last: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportDataset {
    Revenue,
    Customers,
    Products,
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}
