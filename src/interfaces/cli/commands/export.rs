//! CSV export command

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::cli::ExportDataset;
use crate::interfaces::cli::CliError;
use crate::services::AnalyticsService;
use crate::utils::{export_ranking_to_csv, export_revenue_to_csv};

pub async fn export_dataset(
    service: &AnalyticsService,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    limit: u32,
    dataset: ExportDataset,
    output: &str,
) -> Result<(), CliError> {
    let rows = match dataset {
        ExportDataset::Revenue => {
            let buckets = service.get_revenue_series(start, end).await;
            export_revenue_to_csv(&buckets, output)?;
            buckets.len()
        }
        ExportDataset::Customers => {
            let entries = service.get_top_customers(start, end, limit).await;
            export_ranking_to_csv(&entries, output)?;
            entries.len()
        }
        ExportDataset::Products => {
            let entries = service.get_best_sellers(start, end, limit).await;
            export_ranking_to_csv(&entries, output)?;
            entries.len()
        }
    };

    println!(
        "{} Exported {} rows to: {}",
        "✓".bold().green(),
        rows.to_string().green(),
        output.cyan()
    );
    Ok(())
}
