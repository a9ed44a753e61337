//! Descriptive aggregates behind the dashboard charts.
//!
//! Ranking rule used everywhere: value descending, ties broken by label
//! ascending. Accumulation goes through `BTreeMap` so the output never
//! depends on hash order or on row order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::record::{CleanedRecordSet, MentionRecord};

/// Which text column to aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Platform,
    Sentiment,
    Location,
    MediaType,
}

impl TextField {
    pub fn get(self, record: &MentionRecord) -> Option<&str> {
        match self {
            TextField::Platform => record.platform.as_deref(),
            TextField::Sentiment => record.sentiment.as_deref(),
            TextField::Location => record.location.as_deref(),
            TextField::MediaType => record.media_type.as_deref(),
        }
    }
}

fn rank_desc<V: PartialOrd>(a: &(String, V), b: &(String, V)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

/// Occurrences of each distinct non-missing value, ranked.
pub fn value_counts(data: &CleanedRecordSet, field: TextField) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in data.iter().filter_map(|r| field.get(r)) {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    ranked.sort_by(rank_desc);
    ranked
}

/// Number of rows where `field` is present.
pub fn non_missing_count(data: &CleanedRecordSet, field: TextField) -> usize {
    data.iter().filter(|r| field.get(r).is_some()).count()
}

/// Percentage share of each value over the non-missing entries, ranked.
pub fn relative_frequencies(data: &CleanedRecordSet, field: TextField) -> Vec<(String, f64)> {
    let counts = value_counts(data, field);
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / total as f64 * 100.0))
        .collect()
}

/// Sum of engagements per distinct non-missing value, ranked.
pub fn engagement_sums(data: &CleanedRecordSet, field: TextField) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for record in data.iter() {
        if let Some(key) = field.get(record) {
            *sums.entry(key).or_insert(0.0) += record.engagements;
        }
    }

    let mut ranked: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    ranked.sort_by(rank_desc);
    ranked
}

/// Sum of engagements per calendar date, in chronological order.
pub fn daily_engagements(data: &CleanedRecordSet) -> Vec<(NaiveDate, f64)> {
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in data.iter() {
        *daily.entry(record.date).or_insert(0.0) += record.engagements;
    }
    daily.into_iter().collect()
}

/// Highest daily sum; the earliest date wins a tie.
pub fn peak_day(daily: &[(NaiveDate, f64)]) -> Option<(NaiveDate, f64)> {
    daily.iter().copied().fold(None, |best, (date, sum)| match best {
        Some((_, best_sum)) if best_sum >= sum => best,
        _ => Some((date, sum)),
    })
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, platform: &str, sentiment: Option<&str>, engagements: f64) -> MentionRecord {
        MentionRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            platform: Some(platform.to_string()),
            sentiment: sentiment.map(str::to_string),
            location: None,
            engagements,
            media_type: None,
        }
    }

    #[test]
    fn test_value_counts_ranked_with_label_tiebreak() {
        let data = CleanedRecordSet::new(vec![
            rec("2024-01-01", "X", Some("Neutral"), 0.0),
            rec("2024-01-01", "X", Some("Positive"), 0.0),
            rec("2024-01-01", "X", Some("Negative"), 0.0),
            rec("2024-01-01", "X", Some("Positive"), 0.0),
            rec("2024-01-01", "X", None, 0.0),
        ]);
        let counts = value_counts(&data, TextField::Sentiment);
        assert_eq!(
            counts,
            vec![
                ("Positive".to_string(), 2),
                ("Negative".to_string(), 1),
                ("Neutral".to_string(), 1),
            ]
        );
        assert_eq!(non_missing_count(&data, TextField::Sentiment), 4);
    }

    #[test]
    fn test_relative_frequencies_exclude_missing() {
        let data = CleanedRecordSet::new(vec![
            rec("2024-01-01", "X", Some("Positive"), 0.0),
            rec("2024-01-01", "X", None, 0.0),
        ]);
        let freqs = relative_frequencies(&data, TextField::Sentiment);
        assert_eq!(freqs, vec![("Positive".to_string(), 100.0)]);
    }

    #[test]
    fn test_relative_frequencies_empty() {
        let data = CleanedRecordSet::new(vec![rec("2024-01-01", "X", None, 0.0)]);
        assert!(relative_frequencies(&data, TextField::Sentiment).is_empty());
    }

    #[test]
    fn test_engagement_sums_ranked() {
        let data = CleanedRecordSet::new(vec![
            rec("2024-01-01", "A", None, 100.0),
            rec("2024-01-02", "B", None, 700.0),
            rec("2024-01-03", "A", None, 200.0),
        ]);
        let sums = engagement_sums(&data, TextField::Platform);
        assert_eq!(sums, vec![("B".to_string(), 700.0), ("A".to_string(), 300.0)]);
    }

    #[test]
    fn test_daily_engagements_chronological() {
        let data = CleanedRecordSet::new(vec![
            rec("2024-01-03", "A", None, 5.0),
            rec("2024-01-01", "A", None, 10.0),
            rec("2024-01-03", "B", None, 20.0),
        ]);
        let daily = daily_engagements(&data);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].0.to_string(), "2024-01-01");
        assert_eq!(daily[1], (NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 25.0));
    }

    #[test]
    fn test_peak_day_earliest_wins_tie() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let d3 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(peak_day(&[(d1, 5.0), (d2, 9.0), (d3, 9.0)]), Some((d2, 9.0)));
        assert_eq!(peak_day(&[]), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean([10.0, 20.0, 30.0]), Some(20.0));
        assert_eq!(mean(Vec::<f64>::new()), None);
    }
}
