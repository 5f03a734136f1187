//! Shape reconciliation: collapse the two accepted report shapes into the
//! single canonical lab-value sequence the rest of the pipeline consumes.

use crate::models::{HealthReport, LabFlag, LabScalar, LabValue, TestCategory};

/// Canonical lab values for a report.
///
/// A non-empty `lab_values` array is returned verbatim and `tests` is
/// ignored (no merge). Otherwise the categorized test tree is walked and
/// converted.
pub fn canonical_lab_values(report: &HealthReport) -> Vec<LabValue> {
    if let Some(values) = &report.lab_values {
        if !values.is_empty() {
            return values.clone();
        }
    }

    match &report.tests {
        Some(categories) => convert_tests(categories),
        None => Vec::new(),
    }
}

/// Convert the categorized test tree into flat lab values.
///
/// Tests whose result is a non-numeric string are dropped without a
/// warning — qualitative results ("positive"/"negative") cannot be
/// range-checked. That silence is inherited behavior and possibly an
/// oversight; kept until product intent says otherwise.
fn convert_tests(categories: &[TestCategory]) -> Vec<LabValue> {
    let mut values = Vec::new();
    let mut dropped = 0usize;

    for category in categories {
        for test in &category.tests {
            let number = test.result.value.as_ref().and_then(LabScalar::as_number);
            let Some(number) = number else {
                dropped += 1;
                continue;
            };

            values.push(LabValue {
                name: test.test_name.clone(),
                value: LabScalar::Number(number),
                unit: Some(test.result.unit.clone().unwrap_or_default()),
                reference_min: test.reference_range.as_ref().and_then(|r| r.low),
                reference_max: test.reference_range.as_ref().and_then(|r| r.high),
                flag: Some(test.flag.as_ref().map(|f| f.status).unwrap_or(LabFlag::Normal)),
            });
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "Non-numeric test results dropped during conversion");
    }

    values
}
