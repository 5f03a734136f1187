//! Shared state and id generation for the API layer.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::insight::{
    InsightEngine, MemoryReportStore, MemorySummaryStore, ReportStore, SummaryStore,
};

/// Random suffix length of a report id.
const REPORT_ID_SUFFIX_LEN: usize = 9;

/// Shared context for all API routes: the insight engine plus the two
/// store collaborators. Stores are trait objects so a real database can
/// replace them without touching the pipeline.
#[derive(Clone)]
pub struct ApiContext {
    pub engine: Arc<InsightEngine>,
    pub reports: Arc<dyn ReportStore>,
    pub summaries: Arc<dyn SummaryStore>,
}

impl ApiContext {
    /// Context with the built-in reference table and in-memory stores.
    pub fn new() -> Self {
        Self::with_stores(
            Arc::new(MemoryReportStore::new()),
            Arc::new(MemorySummaryStore::new()),
        )
    }

    pub fn with_stores(reports: Arc<dyn ReportStore>, summaries: Arc<dyn SummaryStore>) -> Self {
        Self {
            engine: Arc::new(InsightEngine::default()),
            reports,
            summaries,
        }
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate an opaque report id: `report_<unix-millis>_<random suffix>`.
/// Fresh per accepted upload; uniqueness makes every id written exactly
/// once.
pub fn generate_report_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REPORT_ID_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("report_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_id_shape() {
        let id = generate_report_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts[0], "report");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), REPORT_ID_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn report_ids_are_unique() {
        let a = generate_report_id();
        let b = generate_report_id();
        assert_ne!(a, b);
    }
}
