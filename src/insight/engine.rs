use std::time::Instant;

use chrono::NaiveDate;

use crate::models::HealthReport;

use super::detection::{flag_lab_values, risk_tags};
use super::helpers::date_portion;
use super::messages::{headline_insights, summary_text};
use super::reconcile::canonical_lab_values;
use super::reference::LabReferenceTable;
use super::types::ReportInsights;

/// Derives structured insights from an accepted report: reconcile the
/// shape, flag every value, then aggregate headlines, risk tags and the
/// summary block. Pure over its inputs; the only ambient input is the
/// fallback date, which `generate` pins to today.
pub struct InsightEngine {
    reference: LabReferenceTable,
}

impl InsightEngine {
    pub fn new(reference: LabReferenceTable) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &LabReferenceTable {
        &self.reference
    }

    /// Generate insights, using the current local date as the last-resort
    /// test date.
    pub fn generate(&self, report: &HealthReport) -> ReportInsights {
        self.generate_at(report, chrono::Local::now().date_naive())
    }

    /// Generate insights with an explicit fallback date. Deterministic:
    /// the same report and fallback always produce identical insights.
    pub fn generate_at(&self, report: &HealthReport, fallback: NaiveDate) -> ReportInsights {
        let start = Instant::now();

        let values = canonical_lab_values(report);
        let flagged = flag_lab_values(&values, &self.reference);
        let headlines = headline_insights(&flagged);
        let tags = risk_tags(&flagged);
        let test_date = resolve_test_date(report, fallback);
        let summary = summary_text(report, &test_date, &headlines);

        let out_of_range = flagged.iter().filter(|f| f.is_out_of_range).count();
        tracing::info!(
            report_id = report.report_id.as_deref().unwrap_or("unassigned"),
            values = flagged.len(),
            out_of_range,
            risk_tags = tags.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Report insights generated"
        );

        ReportInsights {
            report_id: report.report_id.clone().unwrap_or_default(),
            patient_name: report.patient.name.clone(),
            test_date,
            flagged_values: flagged,
            headline_insights: headlines,
            risk_tags: tags,
            summary_text: summary,
        }
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(LabReferenceTable::builtin())
    }
}

/// Resolve the report's test date. Precedence is fixed: explicit
/// `test_date` (verbatim), then the date portion of
/// `metadata.reported_on`, then of `metadata.sample_collected`, then the
/// fallback date.
pub fn resolve_test_date(report: &HealthReport, fallback: NaiveDate) -> String {
    if let Some(date) = non_empty(report.test_date.as_deref()) {
        return date.to_string();
    }

    if let Some(metadata) = &report.metadata {
        if let Some(reported) = non_empty(metadata.reported_on.as_deref()) {
            return date_portion(reported).to_string();
        }
        if let Some(collected) = non_empty(metadata.sample_collected.as_deref()) {
            return date_portion(collected).to_string();
        }
    }

    fallback.format("%Y-%m-%d").to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
