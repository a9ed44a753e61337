use std::fmt;

use thiserror::Error;

use crate::schema::RequiredField;

/// Halting failures of the cleaning pipeline.
///
/// Every variant leaves the session empty. Per-row problems (bad dates,
/// bad engagement counts) are never errors; they only show up in
/// [`CleaningStats`](crate::record::CleaningStats).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error reading CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error reading CSV file: line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("No data to clean or process.")]
    Empty,

    #[error(transparent)]
    MissingColumns(#[from] MissingColumns),
}

/// Schema validation failure naming every absent required column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns {
    pub fields: Vec<RequiredField>,
}

impl fmt::Display for MissingColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(|c| c.display_name()).collect();
        let expected: Vec<String> = RequiredField::ALL
            .iter()
            .map(|c| format!("'{}'", c.display_name()))
            .collect();
        write!(
            f,
            "Missing required columns: {}. Please ensure your CSV has {} columns.",
            names.join(", "),
            expected.join(", ")
        )
    }
}

impl std::error::Error for MissingColumns {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart category '{0}'. Expected one of: sentiment, engagement_trend, platform_engagements, media_type_mix, top_locations")]
pub struct UnknownChartCategory(pub String);
