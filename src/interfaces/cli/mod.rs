//! CLI interface module
//!
//! This module provides command-line interface functionality for order-analytics.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cli::{Commands, ConfigCommands, RangeArgs};
use crate::config::get_config;
use crate::errors::AnalyticsError;
use crate::services::{AnalyticsService, AnalyticsSettings};
use crate::storage::{OrderStore, StorageFactory};
use crate::utils::lookback_range;
use commands::{config_management, export_dataset, print_report};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple text (for logs and non-TTY output)
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<AnalyticsError> for CliError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::DateParse(_) | AnalyticsError::InvalidDateRange(_) => {
                CliError::ParseError(err.format_simple())
            }
            AnalyticsError::FileOperation(_)
            | AnalyticsError::Serialization(_)
            | AnalyticsError::StoreQuery(_) => CliError::StorageError(err.format_simple()),
            AnalyticsError::Config(_) => CliError::CommandError(err.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Report {
            range,
            limit,
            format,
        } => {
            let service = build_service(&range)?;
            let (start, end) = resolve_range(&service, &range, Utc::now())?;
            let limit = limit.unwrap_or(service.settings().default_top_limit);
            print_report(&service, start, end, limit, format).await
        }

        Commands::Export {
            range,
            output,
            dataset,
            limit,
        } => {
            let service = build_service(&range)?;
            let (start, end) = resolve_range(&service, &range, Utc::now())?;
            let limit = limit.unwrap_or(service.settings().default_top_limit);
            export_dataset(&service, start, end, limit, dataset, &output).await
        }

        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                config_management::config_generate(output_path, force)
            }
            ConfigCommands::Show => config_management::config_show(),
        },
    }
}

/// 创建订单存储，`--orders` 优先于配置中的 `store.orders_file`
fn open_store(range: &RangeArgs) -> Result<Arc<dyn OrderStore>, CliError> {
    let store = match range.orders.as_deref() {
        Some(path) => StorageFactory::create_with("file", path),
        None => StorageFactory::create(),
    };
    store.map_err(|e| CliError::StorageError(e.message().to_string()))
}

fn build_service(range: &RangeArgs) -> Result<AnalyticsService, CliError> {
    let store = open_store(range)?;
    let settings = AnalyticsSettings::from_config(&get_config().analytics)?;
    Ok(AnalyticsService::new(store, settings))
}

/// 解析报表区间：`--last` 优先，其次 `--start/--end`，都未提供时使用默认区间
pub fn resolve_range(
    service: &AnalyticsService,
    range: &RangeArgs,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), CliError> {
    if let Some(last) = range.last.as_deref() {
        return lookback_range(last, now)
            .map_err(|e| CliError::ParseError(format!("Invalid --last '{}': {}", last, e)));
    }
    Ok(service.parse_date_range_strict(range.start.as_deref(), range.end.as_deref())?)
}
