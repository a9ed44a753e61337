//! Insight statements per chart category.
//!
//! Each category computes one aggregate and phrases up to three ranked
//! facts about it. Key values are wrapped in `**` for markdown renderers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::{
    daily_engagements, engagement_sums, mean, non_missing_count, peak_day, relative_frequencies,
    value_counts, TextField,
};
use crate::error::UnknownChartCategory;
use crate::format::{format_count, format_percent, format_thousands};
use crate::record::CleanedRecordSet;

pub const NO_DATA_INSIGHT: &str = "No data available for insights.";

/// Locations shown on the chart.
pub const TOP_LOCATIONS_LIMIT: usize = 5;

/// The five fixed analysis dimensions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartCategory {
    Sentiment,
    EngagementTrend,
    PlatformEngagements,
    MediaTypeMix,
    TopLocations,
}

impl ChartCategory {
    /// Dashboard order.
    pub const ALL: [ChartCategory; 5] = [
        ChartCategory::Sentiment,
        ChartCategory::EngagementTrend,
        ChartCategory::PlatformEngagements,
        ChartCategory::MediaTypeMix,
        ChartCategory::TopLocations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartCategory::Sentiment => "sentiment",
            ChartCategory::EngagementTrend => "engagement_trend",
            ChartCategory::PlatformEngagements => "platform_engagements",
            ChartCategory::MediaTypeMix => "media_type_mix",
            ChartCategory::TopLocations => "top_locations",
        }
    }
}

impl fmt::Display for ChartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartCategory {
    type Err = UnknownChartCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        ChartCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownChartCategory(s.to_string()))
    }
}

/// Ranked statements for one chart category.
///
/// An empty dataset always yields exactly [`NO_DATA_INSIGHT`].
pub fn generate_insights(category: ChartCategory, data: &CleanedRecordSet) -> Vec<String> {
    if data.is_empty() {
        return vec![NO_DATA_INSIGHT.to_string()];
    }

    match category {
        ChartCategory::Sentiment => sentiment_insights(data),
        ChartCategory::EngagementTrend => engagement_trend_insights(data),
        ChartCategory::PlatformEngagements => platform_insights(data),
        ChartCategory::MediaTypeMix => media_type_insights(data),
        ChartCategory::TopLocations => location_insights(data),
    }
}

fn sentiment_insights(data: &CleanedRecordSet) -> Vec<String> {
    let shares = relative_frequencies(data, TextField::Sentiment);
    let mut insights = Vec::new();

    let Some((top, top_pct)) = shares.first() else {
        return insights;
    };
    insights.push(format!(
        "Dominant sentiment: **{}** ({}%).",
        top,
        format_percent(*top_pct)
    ));
    if let Some((second, second_pct)) = shares.get(1) {
        insights.push(format!(
            "Second most common sentiment: **{}** ({}%).",
            second,
            format_percent(*second_pct)
        ));
    }
    insights.push(format!(
        "Overall, {} sentiment entries were analyzed.",
        format_count(non_missing_count(data, TextField::Sentiment))
    ));
    insights
}

fn engagement_trend_insights(data: &CleanedRecordSet) -> Vec<String> {
    let daily = daily_engagements(data);

    let (Some((peak_date, peak_sum)), Some(average), Some(first), Some(last)) = (
        peak_day(&daily),
        mean(daily.iter().map(|(_, sum)| *sum)),
        daily.first(),
        daily.last(),
    ) else {
        return vec!["No valid date-based engagement data found.".to_string()];
    };

    vec![
        format!(
            "Peak engagement occurred on **{}** with **{}** total engagements.",
            peak_date,
            format_thousands(peak_sum)
        ),
        format!(
            "Average daily engagements across the period: **{}**.",
            format_thousands(average)
        ),
        format!(
            "Data covers the period from **{}** to **{}**.",
            first.0, last.0
        ),
    ]
}

fn platform_insights(data: &CleanedRecordSet) -> Vec<String> {
    let sums = engagement_sums(data, TextField::Platform);
    let mut insights = Vec::new();

    let Some((top, top_sum)) = sums.first() else {
        return insights;
    };
    insights.push(format!(
        "The platform with the highest engagement is **{}** with **{}** engagements.",
        top,
        format_thousands(*top_sum)
    ));
    if let Some((second, second_sum)) = sums.get(1) {
        insights.push(format!(
            "The second highest engaging platform is **{}** with **{}** engagements.",
            second,
            format_thousands(*second_sum)
        ));
    }
    insights.push(format!(
        "A total of **{}** unique platforms were identified.",
        sums.len()
    ));
    insights
}

fn media_type_insights(data: &CleanedRecordSet) -> Vec<String> {
    let shares = relative_frequencies(data, TextField::MediaType);
    let mut insights = Vec::new();

    let Some((top, top_pct)) = shares.first() else {
        return insights;
    };
    insights.push(format!(
        "The most prevalent media type is **{}** ({}%).",
        top,
        format_percent(*top_pct)
    ));
    if let Some((second, second_pct)) = shares.get(1) {
        insights.push(format!(
            "The second most common media type is **{}** ({}%).",
            second,
            format_percent(*second_pct)
        ));
    }
    insights.push(format!(
        "In total, **{}** media type entries were counted.",
        format_count(non_missing_count(data, TextField::MediaType))
    ));
    insights
}

fn location_insights(data: &CleanedRecordSet) -> Vec<String> {
    let counts: Vec<(String, usize)> = value_counts(data, TextField::Location)
        .into_iter()
        .take(TOP_LOCATIONS_LIMIT)
        .collect();

    if counts.is_empty() {
        return vec!["No location data available for analysis.".to_string()];
    }

    const ORDINALS: [&str; 3] = ["The top location", "The second top location", "The third top location"];
    ORDINALS
        .iter()
        .zip(counts.iter())
        .enumerate()
        .map(|(i, (ordinal, (location, count)))| {
            let prefix = if i == 0 {
                format!("{} for mentions", ordinal)
            } else {
                ordinal.to_string()
            };
            format!(
                "{} is **{}** with **{}** occurrences.",
                prefix,
                location,
                format_count(*count)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MentionRecord;
    use chrono::NaiveDate;

    struct Row<'a> {
        date: &'a str,
        platform: &'a str,
        sentiment: &'a str,
        location: &'a str,
        engagements: f64,
        media_type: &'a str,
    }

    fn opt(s: &str) -> Option<String> {
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    }

    fn dataset(rows: &[Row]) -> CleanedRecordSet {
        rows.iter()
            .map(|r| MentionRecord {
                date: NaiveDate::parse_from_str(r.date, "%Y-%m-%d").unwrap(),
                platform: opt(r.platform),
                sentiment: opt(r.sentiment),
                location: opt(r.location),
                engagements: r.engagements,
                media_type: opt(r.media_type),
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn row<'a>(date: &'a str, platform: &'a str, sentiment: &'a str, location: &'a str, engagements: f64, media_type: &'a str) -> Row<'a> {
        Row {
            date,
            platform,
            sentiment,
            location,
            engagements,
            media_type,
        }
    }

    // -------------------------------------------------------------------------
    // CATEGORY NAMES
    // -------------------------------------------------------------------------

    #[test]
    fn test_category_round_trips_through_str() {
        for category in ChartCategory::ALL {
            assert_eq!(category.as_str().parse::<ChartCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_parse_lenient() {
        assert_eq!("Media-Type-Mix".parse::<ChartCategory>().unwrap(), ChartCategory::MediaTypeMix);
        assert_eq!(" top locations ".parse::<ChartCategory>().unwrap(), ChartCategory::TopLocations);
    }

    #[test]
    fn test_category_parse_unknown() {
        let err = "word_cloud".parse::<ChartCategory>().unwrap_err();
        assert_eq!(err.0, "word_cloud");
    }

    // -------------------------------------------------------------------------
    // EMPTY DATA
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_dataset_every_category() {
        let empty = CleanedRecordSet::default();
        for category in ChartCategory::ALL {
            assert_eq!(generate_insights(category, &empty), vec![NO_DATA_INSIGHT.to_string()]);
        }
    }

    // -------------------------------------------------------------------------
    // SENTIMENT
    // -------------------------------------------------------------------------

    #[test]
    fn test_sentiment_single_value() {
        let data = dataset(&[row("2024-01-01", "X", "Positive", "NY", 10.0, "Video")]);
        let insights = generate_insights(ChartCategory::Sentiment, &data);
        assert_eq!(
            insights,
            vec![
                "Dominant sentiment: **Positive** (100.0%).".to_string(),
                "Overall, 1 sentiment entries were analyzed.".to_string(),
            ]
        );
    }

    #[test]
    fn test_sentiment_top_two_and_missing_excluded() {
        let data = dataset(&[
            row("2024-01-01", "X", "Positive", "NY", 1.0, "Video"),
            row("2024-01-01", "X", "Positive", "NY", 1.0, "Video"),
            row("2024-01-02", "X", "Negative", "NY", 1.0, "Video"),
            row("2024-01-02", "X", "", "NY", 1.0, "Video"),
        ]);
        let insights = generate_insights(ChartCategory::Sentiment, &data);
        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0], "Dominant sentiment: **Positive** (66.7%).");
        assert_eq!(insights[1], "Second most common sentiment: **Negative** (33.3%).");
        assert_eq!(insights[2], "Overall, 3 sentiment entries were analyzed.");
    }

    #[test]
    fn test_sentiment_tie_breaks_alphabetically() {
        let data = dataset(&[
            row("2024-01-01", "X", "Positive", "NY", 1.0, "Video"),
            row("2024-01-01", "X", "Negative", "NY", 1.0, "Video"),
        ]);
        let insights = generate_insights(ChartCategory::Sentiment, &data);
        assert_eq!(insights[0], "Dominant sentiment: **Negative** (50.0%).");
        assert_eq!(insights[1], "Second most common sentiment: **Positive** (50.0%).");
    }

    #[test]
    fn test_sentiment_all_missing_no_statements() {
        let data = dataset(&[row("2024-01-01", "X", "", "NY", 1.0, "Video")]);
        assert!(generate_insights(ChartCategory::Sentiment, &data).is_empty());
    }

    // -------------------------------------------------------------------------
    // ENGAGEMENT TREND
    // -------------------------------------------------------------------------

    #[test]
    fn test_engagement_trend() {
        let data = dataset(&[
            row("2024-01-02", "X", "Positive", "NY", 1500.0, "Video"),
            row("2024-01-01", "X", "Positive", "NY", 200.0, "Video"),
            row("2024-01-02", "Y", "Positive", "NY", 500.0, "Video"),
            row("2024-01-05", "Y", "Positive", "NY", 100.0, "Video"),
        ]);
        let insights = generate_insights(ChartCategory::EngagementTrend, &data);
        assert_eq!(
            insights,
            vec![
                "Peak engagement occurred on **2024-01-02** with **2,000** total engagements.".to_string(),
                "Average daily engagements across the period: **767**.".to_string(),
                "Data covers the period from **2024-01-01** to **2024-01-05**.".to_string(),
            ]
        );
    }

    #[test]
    fn test_engagement_trend_mean_rounds_half_to_even() {
        let data = dataset(&[
            row("2024-01-01", "X", "Positive", "NY", 2.0, "Video"),
            row("2024-01-02", "X", "Positive", "NY", 3.0, "Video"),
        ]);
        let insights = generate_insights(ChartCategory::EngagementTrend, &data);
        assert_eq!(insights[1], "Average daily engagements across the period: **2**.");
    }

    // -------------------------------------------------------------------------
    // PLATFORM ENGAGEMENTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_platform_engagements_ranked() {
        let data = dataset(&[
            row("2024-01-01", "A", "Positive", "NY", 100.0, "Video"),
            row("2024-01-01", "B", "Positive", "NY", 700.0, "Video"),
            row("2024-01-02", "A", "Positive", "NY", 200.0, "Video"),
        ]);
        let insights = generate_insights(ChartCategory::PlatformEngagements, &data);
        assert_eq!(
            insights,
            vec![
                "The platform with the highest engagement is **B** with **700** engagements.".to_string(),
                "The second highest engaging platform is **A** with **300** engagements.".to_string(),
                "A total of **2** unique platforms were identified.".to_string(),
            ]
        );
    }

    #[test]
    fn test_platform_single_platform_omits_second() {
        let data = dataset(&[row("2024-01-01", "A", "Positive", "NY", 12345.0, "Video")]);
        let insights = generate_insights(ChartCategory::PlatformEngagements, &data);
        assert_eq!(insights.len(), 2);
        assert_eq!(
            insights[0],
            "The platform with the highest engagement is **A** with **12,345** engagements."
        );
        assert_eq!(insights[1], "A total of **1** unique platforms were identified.");
    }

    // -------------------------------------------------------------------------
    // MEDIA TYPE MIX
    // -------------------------------------------------------------------------

    #[test]
    fn test_media_type_mix() {
        let data = dataset(&[
            row("2024-01-01", "A", "Positive", "NY", 1.0, "Video"),
            row("2024-01-01", "A", "Positive", "NY", 1.0, "Image"),
            row("2024-01-01", "A", "Positive", "NY", 1.0, "Video"),
            row("2024-01-01", "A", "Positive", "NY", 1.0, "Text"),
        ]);
        let insights = generate_insights(ChartCategory::MediaTypeMix, &data);
        assert_eq!(
            insights,
            vec![
                "The most prevalent media type is **Video** (50.0%).".to_string(),
                "The second most common media type is **Image** (25.0%).".to_string(),
                "In total, **4** media type entries were counted.".to_string(),
            ]
        );
    }

    // -------------------------------------------------------------------------
    // TOP LOCATIONS
    // -------------------------------------------------------------------------

    #[test]
    fn test_top_locations_three_statements_max() {
        let mut rows = Vec::new();
        for (loc, n) in [("NY", 4), ("LA", 3), ("SF", 2), ("TX", 1), ("DC", 1), ("MI", 1)] {
            for _ in 0..n {
                rows.push(row("2024-01-01", "A", "Positive", loc, 1.0, "Video"));
            }
        }
        let insights = generate_insights(ChartCategory::TopLocations, &dataset(&rows));
        assert_eq!(
            insights,
            vec![
                "The top location for mentions is **NY** with **4** occurrences.".to_string(),
                "The second top location is **LA** with **3** occurrences.".to_string(),
                "The third top location is **SF** with **2** occurrences.".to_string(),
            ]
        );
    }

    #[test]
    fn test_top_locations_single() {
        let data = dataset(&[row("2024-01-01", "A", "Positive", "Paris", 1.0, "Video")]);
        let insights = generate_insights(ChartCategory::TopLocations, &data);
        assert_eq!(
            insights,
            vec!["The top location for mentions is **Paris** with **1** occurrences.".to_string()]
        );
    }

    #[test]
    fn test_top_locations_all_missing() {
        let data = dataset(&[row("2024-01-01", "A", "Positive", "", 1.0, "Video")]);
        assert_eq!(
            generate_insights(ChartCategory::TopLocations, &data),
            vec!["No location data available for analysis.".to_string()]
        );
    }

    #[test]
    fn test_entry_counts_use_thousands_separators() {
        let rows: Vec<Row> = (0..1200)
            .map(|_| row("2024-01-01", "X", "Positive", "NY", 1.0, "Video"))
            .collect();
        let data = dataset(&rows);
        assert_eq!(
            generate_insights(ChartCategory::Sentiment, &data).last().unwrap(),
            "Overall, 1,200 sentiment entries were analyzed."
        );
        assert_eq!(
            generate_insights(ChartCategory::MediaTypeMix, &data).last().unwrap(),
            "In total, **1,200** media type entries were counted."
        );
    }
}
