//! Session-scoped holder of the current upload.
//!
//! The cleaned record set is replaced wholesale by a successful upload and
//! cleared by removal or by any halting failure. There is never a partially
//! cleaned state.

use crate::error::PipelineError;
use crate::ingest::clean_csv;
use crate::insights::{generate_insights, ChartCategory};
use crate::record::{CleanedRecordSet, CleaningStats};
use crate::report::{build_chart, build_dashboard, cleaning_summary, ChartReport, CleaningSummary, DashboardReport};

#[derive(Debug, Default)]
pub struct Session {
    file_name: Option<String>,
    records: CleanedRecordSet,
    stats: CleaningStats,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean `bytes` and make them the session's data.
    ///
    /// On error the session is left empty and the error is returned for
    /// display.
    pub fn ingest(&mut self, file_name: &str, bytes: &[u8]) -> Result<CleaningSummary, PipelineError> {
        match clean_csv(bytes) {
            Ok(outcome) => {
                self.file_name = Some(file_name.to_string());
                self.records = outcome.records;
                self.stats = outcome.stats;
                tracing::info!(file_name, rows = self.records.len(), "upload accepted");
                Ok(self.summary())
            }
            Err(e) => {
                tracing::warn!(file_name, error = %e, "upload rejected, clearing session");
                self.clear();
                Err(e)
            }
        }
    }

    /// Forget the current upload.
    pub fn clear(&mut self) {
        self.file_name = None;
        self.records = CleanedRecordSet::default();
        self.stats = CleaningStats::default();
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn records(&self) -> &CleanedRecordSet {
        &self.records
    }

    pub fn stats(&self) -> &CleaningStats {
        &self.stats
    }

    /// True when there is something to chart.
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn summary(&self) -> CleaningSummary {
        cleaning_summary(self.file_name(), &self.records, &self.stats)
    }

    pub fn dashboard(&self) -> Option<DashboardReport> {
        self.has_data()
            .then(|| build_dashboard(self.file_name(), &self.records, &self.stats))
    }

    pub fn chart(&self, category: ChartCategory) -> Option<ChartReport> {
        self.has_data().then(|| build_chart(category, &self.records))
    }

    pub fn insights(&self, category: ChartCategory) -> Vec<String> {
        generate_insights(category, &self.records)
    }
}
