use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{HealthReport, LabValue, Severity};

// ---------------------------------------------------------------------------
// FlaggedLabValue
// ---------------------------------------------------------------------------

/// A lab value plus its derived range status. Never persisted on its own;
/// always recomputed from the LabValue and the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedLabValue {
    #[serde(flatten)]
    pub value: LabValue,
    #[serde(rename = "isOutOfRange")]
    pub is_out_of_range: bool,
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// ReportInsights
// ---------------------------------------------------------------------------

/// Structured insights derived from one report. Computed once at upload
/// time and cached by report id; a re-upload gets a fresh id, never a
/// mutation of an existing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInsights {
    pub report_id: String,
    pub patient_name: String,
    pub test_date: String,
    pub flagged_values: Vec<FlaggedLabValue>,
    pub headline_insights: Vec<String>,
    pub risk_tags: Vec<String>,
    pub summary_text: String,
}

/// What the report store holds per id: the accepted report and the
/// insights derived from it at upload time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    pub report: HealthReport,
    pub insights: ReportInsights,
}

// ---------------------------------------------------------------------------
// InsightError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Internal lock failed")]
    LockFailed,
}
