use chrono::NaiveDate;
use serde::Serialize;

/// One cleaned mention row.
///
/// Text fields are `None` when the cell was empty or held a missing-value
/// marker (`NA`, `null`, ...). `date` is always valid: rows without one
/// never make it this far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionRecord {
    pub date: NaiveDate,
    pub platform: Option<String>,
    pub sentiment: Option<String>,
    pub location: Option<String>,
    pub engagements: f64,
    pub media_type: Option<String>,
}

/// Counters collected while coercing rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub invalid_dates_dropped: usize,
    pub engagements_defaulted: usize,
    pub negative_engagements: usize,
}

/// Validated, type-coerced rows ready for aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CleanedRecordSet {
    records: Vec<MentionRecord>,
}

impl CleanedRecordSet {
    pub fn new(records: Vec<MentionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MentionRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MentionRecord] {
        &self.records
    }
}

impl From<Vec<MentionRecord>> for CleanedRecordSet {
    fn from(records: Vec<MentionRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a CleanedRecordSet {
    type Item = &'a MentionRecord;
    type IntoIter = std::slice::Iter<'a, MentionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
