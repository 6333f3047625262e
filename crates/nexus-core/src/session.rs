//! Per-session analysis history
//!
//! Each user session owns one `SessionHistory`. Records are only ever
//! appended; nothing edits or removes them, and the history goes away with
//! the session.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::ai::{InsightOutcome, InsightStatus};

/// One completed insight request
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    /// 1-based position in the session
    pub id: usize,
    pub timestamp: DateTime<Local>,
    /// The model's text, or the error message when the request failed
    pub content: String,
    pub status: InsightStatus,
}

impl AnalysisRecord {
    /// Heading used when listing history, e.g. "Analysis 2 - 2025-03-14 15:30:12"
    pub fn title(&self) -> String {
        format!(
            "Analysis {} - {}",
            self.id,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Append-only list of analysis records
#[derive(Debug, Default)]
pub struct SessionHistory {
    records: Vec<AnalysisRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome, stamped with the current time
    pub fn append(&mut self, outcome: &InsightOutcome) -> &AnalysisRecord {
        self.append_at(outcome, Local::now())
    }

    pub fn append_at(
        &mut self,
        outcome: &InsightOutcome,
        timestamp: DateTime<Local>,
    ) -> &AnalysisRecord {
        let record = AnalysisRecord {
            id: self.records.len() + 1,
            timestamp,
            content: outcome.display_text().to_string(),
            status: outcome.status(),
        };
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Records in the order they were made
    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    /// Records with the most recent first, as shown in history views
    pub fn newest_first(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.records.iter().rev()
    }

    pub fn latest(&self) -> Option<&AnalysisRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
