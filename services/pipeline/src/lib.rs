//! Media mention pipeline - Cleans uploaded mention CSVs and derives chart insights
//!
//! Responsibilities:
//! - Decode and parse uploaded CSV bytes
//! - Normalize headers and validate the required schema
//! - Coerce dates and engagement counts (drop / default, never fail per row)
//! - Aggregate the five dashboard charts and phrase their insights
//! - Hold the current upload in an explicit session context
//!
//! Everything here is DETERMINISTIC: the same bytes produce the same
//! records, the same chart tables and the same statements.

pub mod aggregate;
pub mod coerce;
pub mod error;
pub mod format;
pub mod ingest;
pub mod insights;
pub mod normalize;
pub mod record;
pub mod report;
pub mod schema;
pub mod session;

pub use error::{MissingColumns, PipelineError, UnknownChartCategory};
pub use ingest::{clean_csv, CleanOutcome};
pub use insights::{generate_insights, ChartCategory, NO_DATA_INSIGHT};
pub use normalize::{normalize_column_name, normalize_headers};
pub use record::{CleanedRecordSet, CleaningStats, MentionRecord};
pub use report::{
    build_chart, build_dashboard, ChartKind, ChartPoint, ChartReport, CleaningSummary, DashboardReport,
};
pub use schema::{validate_columns, ColumnIndex, RequiredField};
pub use session::Session;
