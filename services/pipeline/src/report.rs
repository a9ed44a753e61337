//! Chart tables and the assembled dashboard report handed to renderers.

use serde::Serialize;

use crate::aggregate::{daily_engagements, engagement_sums, value_counts, TextField};
use crate::format::format_count;
use crate::insights::{generate_insights, ChartCategory, TOP_LOCATIONS_LIMIT};
use crate::record::{CleanedRecordSet, CleaningStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Donut,
    Line,
    Bar,
}

/// One category/value pair, ready to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    pub category: ChartCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningSummary {
    pub file_name: Option<String>,
    pub valid_rows: usize,
    pub stats: CleaningStats,
    pub steps: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub summary: CleaningSummary,
    pub charts: Vec<ChartReport>,
}

struct ChartMeta {
    title: &'static str,
    description: &'static str,
    kind: ChartKind,
    x_label: &'static str,
    y_label: &'static str,
}

fn chart_meta(category: ChartCategory) -> ChartMeta {
    match category {
        ChartCategory::Sentiment => ChartMeta {
            title: "Sentiment Breakdown",
            description: "Distribution of Sentiments",
            kind: ChartKind::Donut,
            x_label: "Sentiment",
            y_label: "Count",
        },
        ChartCategory::EngagementTrend => ChartMeta {
            title: "Engagement Trend over Time",
            description: "Total Engagements Over Time",
            kind: ChartKind::Line,
            x_label: "Date",
            y_label: "Total Engagements",
        },
        ChartCategory::PlatformEngagements => ChartMeta {
            title: "Platform Engagements",
            description: "Total Engagements by Platform",
            kind: ChartKind::Bar,
            x_label: "Platform",
            y_label: "Total Engagements",
        },
        ChartCategory::MediaTypeMix => ChartMeta {
            title: "Media Type Mix",
            description: "Distribution of Media Types",
            kind: ChartKind::Donut,
            x_label: "Media Type",
            y_label: "Count",
        },
        ChartCategory::TopLocations => ChartMeta {
            title: "Top 5 Locations",
            description: "Top 5 Locations by Mentions",
            kind: ChartKind::Bar,
            x_label: "Location",
            y_label: "Mentions",
        },
    }
}

fn counts_to_points(counts: Vec<(String, usize)>) -> Vec<ChartPoint> {
    counts
        .into_iter()
        .map(|(label, count)| ChartPoint {
            label,
            value: count as f64,
        })
        .collect()
}

/// Aggregated table for one chart category.
pub fn chart_points(category: ChartCategory, data: &CleanedRecordSet) -> Vec<ChartPoint> {
    match category {
        ChartCategory::Sentiment => counts_to_points(value_counts(data, TextField::Sentiment)),
        ChartCategory::EngagementTrend => daily_engagements(data)
            .into_iter()
            .map(|(date, sum)| ChartPoint {
                label: date.to_string(),
                value: sum,
            })
            .collect(),
        ChartCategory::PlatformEngagements => engagement_sums(data, TextField::Platform)
            .into_iter()
            .map(|(label, value)| ChartPoint { label, value })
            .collect(),
        ChartCategory::MediaTypeMix => counts_to_points(value_counts(data, TextField::MediaType)),
        ChartCategory::TopLocations => {
            let mut counts = value_counts(data, TextField::Location);
            counts.truncate(TOP_LOCATIONS_LIMIT);
            counts_to_points(counts)
        }
    }
}

pub fn build_chart(category: ChartCategory, data: &CleanedRecordSet) -> ChartReport {
    let meta = chart_meta(category);
    ChartReport {
        category,
        title: meta.title,
        description: meta.description,
        kind: meta.kind,
        x_label: meta.x_label,
        y_label: meta.y_label,
        points: chart_points(category, data),
        insights: generate_insights(category, data),
    }
}

pub fn cleaning_summary(
    file_name: Option<&str>,
    data: &CleanedRecordSet,
    stats: &CleaningStats,
) -> CleaningSummary {
    CleaningSummary {
        file_name: file_name.map(str::to_string),
        valid_rows: data.len(),
        stats: *stats,
        steps: vec![
            "'Date' column converted to calendar dates (invalid dates filtered out).".to_string(),
            "Missing 'Engagements' values filled with 0.".to_string(),
            "Column names normalized to lowercase and underscores (e.g., 'Media Type' to 'media_type')."
                .to_string(),
        ],
        message: format!(
            "Successfully processed **{}** valid rows.",
            format_count(data.len())
        ),
    }
}

/// All five charts, in dashboard order.
pub fn build_dashboard(
    file_name: Option<&str>,
    data: &CleanedRecordSet,
    stats: &CleaningStats,
) -> DashboardReport {
    DashboardReport {
        summary: cleaning_summary(file_name, data, stats),
        charts: ChartCategory::ALL
            .into_iter()
            .map(|category| build_chart(category, data))
            .collect(),
    }
}
