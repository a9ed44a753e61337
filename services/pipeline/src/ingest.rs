//! Upload ingestion: bytes -> decoded text -> CSV rows -> cleaned records.
//!
//! This function is DETERMINISTIC: same bytes = same records, same stats.

use std::borrow::Cow;

use csv::StringRecord;
use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::coerce::coerce_record;
use crate::error::PipelineError;
use crate::normalize::normalize_headers;
use crate::record::{CleanedRecordSet, CleaningStats};
use crate::schema::validate_columns;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Result of a successful clean.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    pub records: CleanedRecordSet,
    pub stats: CleaningStats,
    /// Normalized header row as uploaded, extra columns included.
    pub columns: Vec<String>,
}

/// Decode upload bytes.
/// UTF-8 with the BOM removed; anything that is not valid UTF-8 is read as Windows-1252,
/// also without a leading UTF-8 BOM.
pub fn decode_upload(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }
    tracing::warn!("upload is not valid UTF-8, decoding as Windows-1252");
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
    text
}

/// Parse, validate and coerce an uploaded CSV.
///
/// Halts on unreadable CSV, on an upload without data rows, and on missing
/// required columns. Row-level problems are absorbed into the stats.
pub fn clean_csv(bytes: &[u8]) -> Result<CleanOutcome, PipelineError> {
    let content = decode_upload(bytes);
    if content.trim().is_empty() {
        return Err(PipelineError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = normalize_headers(reader.headers()?.iter());
    tracing::debug!(columns = ?headers, "read CSV header");

    let mut rows: Vec<StringRecord> = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(PipelineError::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: headers.len(),
                found: record.len(),
            });
        }
        rows.push(record);
    }

    if rows.is_empty() {
        return Err(PipelineError::Empty);
    }

    let index = validate_columns(&headers)?;

    let mut stats = CleaningStats::default();
    let records: Vec<_> = rows
        .iter()
        .filter_map(|row| coerce_record(row, &index, &mut stats))
        .collect();

    tracing::info!(
        rows_read = stats.rows_read,
        rows_kept = stats.rows_kept,
        invalid_dates_dropped = stats.invalid_dates_dropped,
        engagements_defaulted = stats.engagements_defaulted,
        negative_engagements = stats.negative_engagements,
        "cleaned upload"
    );

    Ok(CleanOutcome {
        records: CleanedRecordSet::new(records),
        stats,
        columns: headers,
    })
}
