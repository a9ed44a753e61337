//! Required-column validation.
//!
//! Runs on normalized headers and produces a [`ColumnIndex`] so that no
//! downstream step ever looks a column up by name.

use serde::Serialize;

use crate::error::MissingColumns;

/// The six columns every upload must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Date,
    Platform,
    Sentiment,
    Location,
    Engagements,
    MediaType,
}

impl RequiredField {
    pub const ALL: [RequiredField; 6] = [
        RequiredField::Date,
        RequiredField::Platform,
        RequiredField::Sentiment,
        RequiredField::Location,
        RequiredField::Engagements,
        RequiredField::MediaType,
    ];

    /// Normalized header key.
    pub fn key(self) -> &'static str {
        match self {
            RequiredField::Date => "date",
            RequiredField::Platform => "platform",
            RequiredField::Sentiment => "sentiment",
            RequiredField::Location => "location",
            RequiredField::Engagements => "engagements",
            RequiredField::MediaType => "media_type",
        }
    }

    /// Name as users write it in their spreadsheet.
    pub fn display_name(self) -> &'static str {
        match self {
            RequiredField::Date => "Date",
            RequiredField::Platform => "Platform",
            RequiredField::Sentiment => "Sentiment",
            RequiredField::Location => "Location",
            RequiredField::Engagements => "Engagements",
            RequiredField::MediaType => "Media Type",
        }
    }
}

/// Position of each required column in the raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub platform: usize,
    pub sentiment: usize,
    pub location: usize,
    pub engagements: usize,
    pub media_type: usize,
}

/// Find column index by exact match on a normalized header.
/// First occurrence wins when a header is duplicated.
fn find_column(headers: &[String], field: RequiredField) -> Option<usize> {
    headers.iter().position(|h| h == field.key())
}

/// Check that all required columns are present.
///
/// `headers` must already be normalized. The error lists exactly the
/// absent fields, in [`RequiredField::ALL`] order.
pub fn validate_columns(headers: &[String]) -> Result<ColumnIndex, MissingColumns> {
    let positions: Vec<(RequiredField, Option<usize>)> = RequiredField::ALL
        .iter()
        .map(|&field| (field, find_column(headers, field)))
        .collect();

    let missing: Vec<RequiredField> = positions
        .iter()
        .filter(|(_, pos)| pos.is_none())
        .map(|(field, _)| *field)
        .collect();

    if !missing.is_empty() {
        return Err(MissingColumns { fields: missing });
    }

    let at = |field: RequiredField| -> usize {
        positions
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, pos)| *pos)
            .unwrap_or_default()
    };

    let duplicates: Vec<&str> = RequiredField::ALL
        .iter()
        .filter(|f| headers.iter().filter(|h| *h == f.key()).count() > 1)
        .map(|f| f.key())
        .collect();
    if !duplicates.is_empty() {
        tracing::warn!(columns = ?duplicates, "duplicate required columns, using first occurrence");
    }

    Ok(ColumnIndex {
        date: at(RequiredField::Date),
        platform: at(RequiredField::Platform),
        sentiment: at(RequiredField::Sentiment),
        location: at(RequiredField::Location),
        engagements: at(RequiredField::Engagements),
        media_type: at(RequiredField::MediaType),
    })
}
