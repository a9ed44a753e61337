//! Analyzer - Cleans a mentions CSV and prints the media intelligence dashboard
//!
//! Responsibilities:
//! - Read the CSV file from disk
//! - Clean it (normalize headers, validate schema, coerce dates/engagements)
//! - Print the cleaning summary, chart tables and insights (text or JSON)
//!
//! Usage:
//!   analyzer --file mentions.csv
//!   analyzer --file mentions.csv --chart platform_engagements
//!   analyzer --file mentions.csv --format json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pipeline::{ChartCategory, ChartReport, CleaningSummary, DashboardReport, MentionRecord, Session};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "analyzer", about = "Cleans a mentions CSV and prints chart insights")]
struct Args {
    /// CSV file with Date, Platform, Sentiment, Location, Engagements, Media Type columns
    #[arg(long)]
    file: PathBuf,

    /// Only print this chart (sentiment, engagement_trend, platform_engagements, media_type_mix, top_locations)
    #[arg(long, value_parser = parse_chart)]
    chart: Option<ChartCategory>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the first N cleaned rows
    #[arg(long, default_value = "0")]
    records: usize,
}

fn parse_chart(s: &str) -> Result<ChartCategory, String> {
    s.parse::<ChartCategory>().map_err(|e| e.to_string())
}

const DEFAULT_LOG_LEVEL: &str = "info";

fn log_level(configured: Option<String>) -> String {
    configured.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn init_tracing() -> Result<()> {
    let level = log_level(std::env::var("LOG_LEVEL").ok());
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn print_summary(summary: &CleaningSummary) {
    if let Some(name) = &summary.file_name {
        println!("Selected: {}", name);
    }
    println!("\n--- Data Cleaning Summary ---");
    for step in &summary.steps {
        println!("  * {}", step);
    }
    println!("{}", summary.message.replace("**", ""));
    println!(
        "Rows read: {} | dropped (invalid date): {} | engagements defaulted to 0: {}",
        summary.stats.rows_read, summary.stats.invalid_dates_dropped, summary.stats.engagements_defaulted
    );
    if summary.stats.negative_engagements > 0 {
        println!("Negative engagement values kept: {}", summary.stats.negative_engagements);
    }
}

fn print_records(records: &[MentionRecord], limit: usize) {
    if limit == 0 {
        return;
    }
    println!("\n--- Cleaned Rows ---");
    let dash = "-".to_string();
    for (i, r) in records.iter().take(limit).enumerate() {
        println!(
            "  [{}] {} | {} | {} | {} | {} | {}",
            i + 1,
            r.date,
            r.platform.as_ref().unwrap_or(&dash),
            r.sentiment.as_ref().unwrap_or(&dash),
            r.location.as_ref().unwrap_or(&dash),
            r.engagements,
            r.media_type.as_ref().unwrap_or(&dash),
        );
    }
    if records.len() > limit {
        println!("  ... and {} more", records.len() - limit);
    }
}

fn print_chart(chart: &ChartReport) {
    println!("\n--- {} ---", chart.title);
    println!("{} ({} vs {})", chart.description, chart.y_label, chart.x_label);
    let width = chart.points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
    for point in &chart.points {
        println!("  {:<width$}  {}", point.label, pipeline::format::format_thousands(point.value), width = width);
    }
    println!("Top Insights:");
    for insight in &chart.insights {
        println!("  - {}", insight.replace("**", ""));
    }
}

fn print_dashboard(report: &DashboardReport) {
    print_summary(&report.summary);
    for chart in &report.charts {
        print_chart(chart);
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing()?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read CSV file {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    tracing::debug!(file = %args.file.display(), size = bytes.len(), "read upload");

    let mut session = Session::new();
    let summary = session.ingest(&file_name, &bytes)?;

    if !session.has_data() {
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Text => {
                print_summary(&summary);
                println!("\nNo valid rows to chart.");
            }
        }
        return Ok(());
    }

    match (args.format, args.chart) {
        (OutputFormat::Json, Some(category)) => {
            let chart = session.chart(category).context("No data to chart")?;
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }
        (OutputFormat::Json, None) => {
            let report = session.dashboard().context("No data to chart")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        (OutputFormat::Text, Some(category)) => {
            print_summary(&summary);
            print_records(session.records().records(), args.records);
            if let Some(chart) = session.chart(category) {
                print_chart(&chart);
            }
        }
        (OutputFormat::Text, None) => {
            println!("=== Interactive Media Intelligence Dashboard ===");
            if let Some(report) = session.dashboard() {
                print_records(session.records().records(), args.records);
                print_dashboard(&report);
            }
        }
    }

    Ok(())
}
