//! Store collaborators for derived entities. The pipeline itself is pure;
//! these traits are the boundary's put/get contract, keyed by report id.
//! Ids are generated fresh per accepted upload, so at-most-one-writer per
//! id holds without locking beyond the map itself.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::summary::SessionSummary;

use super::types::{InsightError, StoredReport};

/// Report + insights storage, keyed by report id.
pub trait ReportStore: Send + Sync {
    fn put(&self, id: &str, stored: StoredReport) -> Result<(), InsightError>;
    fn get(&self, id: &str) -> Result<Option<StoredReport>, InsightError>;
}

/// Session-summary storage, keyed by report id.
pub trait SummaryStore: Send + Sync {
    fn put(&self, id: &str, summary: SessionSummary) -> Result<(), InsightError>;
    fn get(&self, id: &str) -> Result<Option<SessionSummary>, InsightError>;
}

/// In-memory report store backed by RwLock.
pub struct MemoryReportStore {
    reports: RwLock<HashMap<String, StoredReport>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore for MemoryReportStore {
    fn put(&self, id: &str, stored: StoredReport) -> Result<(), InsightError> {
        let mut reports = self.reports.write().map_err(|_| InsightError::LockFailed)?;
        reports.insert(id.to_string(), stored);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<StoredReport>, InsightError> {
        let reports = self.reports.read().map_err(|_| InsightError::LockFailed)?;
        Ok(reports.get(id).cloned())
    }
}

/// In-memory summary store backed by RwLock.
pub struct MemorySummaryStore {
    summaries: RwLock<HashMap<String, SessionSummary>>,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self {
            summaries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemorySummaryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryStore for MemorySummaryStore {
    fn put(&self, id: &str, summary: SessionSummary) -> Result<(), InsightError> {
        let mut summaries = self.summaries.write().map_err(|_| InsightError::LockFailed)?;
        summaries.insert(id.to_string(), summary);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<SessionSummary>, InsightError> {
        let summaries = self.summaries.read().map_err(|_| InsightError::LockFailed)?;
        Ok(summaries.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use crate::insight::engine::InsightEngine;
    use crate::models::{HealthReport, PatientInfo};

    use super::*;

    fn stored_report(id: &str) -> StoredReport {
        let report = HealthReport {
            report_id: Some(id.into()),
            patient: PatientInfo {
                name: "Jane Doe".into(),
                age: 34.0,
                gender: "F".into(),
                email: None,
                phone: None,
                patient_id: None,
            },
            test_date: Some("2024-01-15".into()),
            lab_name: None,
            lab_values: Some(vec![]),
            tests: None,
            metadata: None,
            notes: None,
            created_at: None,
        };
        let insights = InsightEngine::default()
            .generate_at(&report, chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        StoredReport { report, insights }
    }

    #[test]
    fn report_put_then_get() {
        let store = MemoryReportStore::new();
        store.put("report_1", stored_report("report_1")).unwrap();

        let fetched = store.get("report_1").unwrap().unwrap();
        assert_eq!(fetched.report.report_id.as_deref(), Some("report_1"));
        assert_eq!(fetched.insights.patient_name, "Jane Doe");
    }

    #[test]
    fn report_get_absent_is_none() {
        let store = MemoryReportStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn summary_put_then_get() {
        let store = MemorySummaryStore::new();
        let summary = SessionSummary {
            report_id: "report_1".into(),
            generated_at: "2024-06-01T12:00:00.000Z".into(),
            findings: vec!["Your glucose is slightly elevated".into()],
            key_questions_answered: vec![],
            recommendations: vec![],
            follow_up_actions: vec![],
        };
        store.put("report_1", summary).unwrap();

        let fetched = store.get("report_1").unwrap().unwrap();
        assert_eq!(fetched.findings.len(), 1);
        assert!(store.get("other").unwrap().is_none());
    }
}
