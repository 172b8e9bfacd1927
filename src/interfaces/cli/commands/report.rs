//! Dashboard report command

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::analytics::{HourSlot, RankingEntry, RevenueBucket, peak_hour};
use crate::cli::OutputFormat;
use crate::interfaces::cli::CliError;
use crate::services::{AnalyticsService, DashboardReport};

const BAR_WIDTH: u64 = 30;

pub async fn print_report(
    service: &AnalyticsService,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    limit: u32,
    format: OutputFormat,
) -> Result<(), CliError> {
    let report = service.get_dashboard(start, end, limit).await;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(|e| {
                CliError::CommandError(format!("Failed to encode report as JSON: {}", e))
            })?;
            println!("{}", json);
        }
        OutputFormat::Text => print_text_report(&report),
    }
    Ok(())
}

fn print_text_report(report: &DashboardReport) {
    println!(
        "{} {} {} {} {}",
        "Dashboard".bold().green(),
        report.start.format("%Y-%m-%d %H:%M:%S").to_string().cyan(),
        "->".dimmed(),
        report.end.format("%Y-%m-%d %H:%M:%S").to_string().cyan(),
        format!("({})", report.granularity.as_ref()).dimmed()
    );
    println!();

    let summary = &report.summary;
    println!("{}", "Summary".bold().green());
    println!(
        "  Revenue: {}   Paid: {}   Unpaid: {}",
        format!("{:.2}", summary.total_revenue).green(),
        summary.paid_orders.to_string().cyan(),
        summary.unpaid_orders.to_string().yellow()
    );
    println!(
        "  Pending: {}   Done: {}   Avg order: {}",
        summary.pending_orders.to_string().yellow(),
        summary.done_orders.to_string().cyan(),
        format!("{:.2}", summary.average_order_value).green()
    );
    println!();

    print_revenue(&report.revenue);
    print_peak_hours(&report.peak_hours);
    print_ranking("Top customers", &report.top_customers);
    print_ranking("Best sellers", &report.best_sellers);
}

fn print_revenue(buckets: &[RevenueBucket]) {
    println!("{}", "Revenue".bold().green());
    if buckets.is_empty() {
        println!("  {} No paid orders in range", "ℹ".bold().blue());
    }
    for bucket in buckets {
        println!(
            "  {:<20} {:>12} {}",
            bucket.bucket_key.cyan(),
            format!("{:.2}", bucket.revenue),
            format!("({} orders)", bucket.order_count).dimmed()
        );
    }
    println!();
}

fn print_peak_hours(slots: &[HourSlot]) {
    println!("{}", "Peak hours".bold().green());
    let Some(peak) = peak_hour(slots) else {
        println!("  {} No orders in range", "ℹ".bold().blue());
        println!();
        return;
    };

    for slot in slots {
        let width = slot.order_count * BAR_WIDTH / peak.order_count;
        let bar = "█".repeat(width as usize);
        let line = format!("  {:02}:00 {:>5} {}", slot.hour, slot.order_count, bar);
        if slot.hour == peak.hour {
            println!("{}", line.yellow().bold());
        } else {
            println!("{}", line);
        }
    }
    println!(
        "  {} Busiest hour: {:02}:00 ({} orders)",
        "ℹ".bold().blue(),
        peak.hour,
        peak.order_count
    );
    println!();
}

fn print_ranking(title: &str, entries: &[RankingEntry]) {
    println!("{}", title.bold().green());
    if entries.is_empty() {
        println!("  {} Nothing to rank", "ℹ".bold().blue());
    }
    for (index, entry) in entries.iter().enumerate() {
        println!(
            "  {:>3}. {:<32} {:>12} {}",
            index + 1,
            entry.key.cyan(),
            format!("{:.2}", entry.total_value),
            format!("x{}", entry.count_value).dimmed()
        );
    }
    println!();
}
