//! Type coercion of raw CSV rows into [`MentionRecord`]s.
//!
//! Nothing in here fails: an unparseable date drops the row, an
//! unparseable engagement count becomes 0.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::record::{CleaningStats, MentionRecord};
use crate::schema::ColumnIndex;

/// Cell values treated as missing, matching what spreadsheet exports and
/// dataframe tools conventionally write for "no value".
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Calendar date layouts, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date-time layouts; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M",
];

/// chrono's `%Y` also accepts one to three digits; a short year is never a full year.
fn has_full_year(date: &NaiveDate) -> bool {
    date.year() >= 1000
}

/// Trimmed cell text, or `None` for a missing marker.
pub fn clean_text(cell: Option<&str>) -> Option<String> {
    let value = cell?.trim();
    if MISSING_MARKERS.contains(&value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a date cell. `None` means the row must be dropped.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let value = cell.trim();
    if MISSING_MARKERS.contains(&value) {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok().filter(has_full_year))
    {
        return Some(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDateTime::parse_from_str(value, fmt)
                .ok()
                .filter(|dt| has_full_year(&dt.date()))
        })
    {
        return Some(dt.date());
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
        .filter(has_full_year)
}

/// Parse an engagement count. `None` means the caller defaults to 0.
pub fn parse_engagements(cell: &str) -> Option<f64> {
    let value = cell.trim();
    if MISSING_MARKERS.contains(&value) {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce one raw row. Updates `stats` for every row seen.
pub fn coerce_record(
    record: &StringRecord,
    index: &ColumnIndex,
    stats: &mut CleaningStats,
) -> Option<MentionRecord> {
    stats.rows_read += 1;

    let date = match record.get(index.date).and_then(parse_date) {
        Some(d) => d,
        None => {
            stats.invalid_dates_dropped += 1;
            tracing::debug!(
                line = ?record.position().map(|p| p.line()),
                value = record.get(index.date).unwrap_or_default(),
                "dropping row with unparseable date"
            );
            return None;
        }
    };

    let engagements = match record.get(index.engagements).and_then(parse_engagements) {
        Some(v) => v,
        None => {
            stats.engagements_defaulted += 1;
            0.0
        }
    };
    if engagements < 0.0 {
        stats.negative_engagements += 1;
    }

    stats.rows_kept += 1;

    Some(MentionRecord {
        date,
        platform: clean_text(record.get(index.platform)),
        sentiment: clean_text(record.get(index.sentiment)),
        location: clean_text(record.get(index.location)),
        engagements,
        media_type: clean_text(record.get(index.media_type)),
    })
}
