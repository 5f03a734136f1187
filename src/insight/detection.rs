//! Range detection: flag each canonical lab value against reference bounds
//! and map out-of-range values onto coarse physiological risk categories.

use std::collections::BTreeSet;

use crate::models::{LabValue, Severity};

use super::helpers::normalize_lab_name;
use super::reference::LabReferenceTable;
use super::types::FlaggedLabValue;

/// Values this far past a canonical bound escalate to critical:
/// below `min * 0.8` or above `max * 1.2`.
const CRITICAL_LOW_FACTOR: f64 = 0.8;
const CRITICAL_HIGH_FACTOR: f64 = 1.2;

// ---------------------------------------------------------------------------
// Value flagging
// ---------------------------------------------------------------------------

/// Flag a single lab value.
///
/// The canonical table takes precedence over report-supplied bounds even
/// when both exist. Report-supplied bounds can only ever yield `warning` —
/// there is no critical tier without a canonical reference. Boundary
/// values are in range (strict `<` / `>`). String values are never
/// flagged.
///
/// Units are not compared: a value is checked numerically against the
/// reference even if the report's unit differs from the table's. Known
/// correctness gap, left as-is.
pub fn flag_lab_value(value: &LabValue, table: &LabReferenceTable) -> FlaggedLabValue {
    let mut is_out_of_range = false;
    let mut severity = Severity::Normal;

    if let Some(number) = value.value.as_number() {
        let normalized = normalize_lab_name(&value.name);

        if let Some(reference) = table.get(&normalized) {
            if number < reference.min {
                is_out_of_range = true;
                severity = if number < reference.min * CRITICAL_LOW_FACTOR {
                    Severity::Critical
                } else {
                    Severity::Warning
                };
            } else if number > reference.max {
                is_out_of_range = true;
                severity = if number > reference.max * CRITICAL_HIGH_FACTOR {
                    Severity::Critical
                } else {
                    Severity::Warning
                };
            }
        } else if let (Some(min), Some(max)) = (value.reference_min, value.reference_max) {
            if number < min || number > max {
                is_out_of_range = true;
                severity = Severity::Warning;
            }
        }
    }

    FlaggedLabValue {
        value: value.clone(),
        is_out_of_range,
        severity,
    }
}

/// Flag every value in a canonical sequence.
pub fn flag_lab_values(values: &[LabValue], table: &LabReferenceTable) -> Vec<FlaggedLabValue> {
    values.iter().map(|v| flag_lab_value(v, table)).collect()
}

// ---------------------------------------------------------------------------
// Risk tags
// ---------------------------------------------------------------------------

/// Fixed keyword sets mapping normalized test names onto risk categories.
/// Substring membership, deliberately approximate; the sets are pinned by
/// downstream expectations and must not be "improved".
const RISK_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "blood_health",
        &["hemoglobin", "hematocrit", "rbc", "wbc", "platelets"],
    ),
    ("metabolic", &["glucose", "glucose_fasting"]),
    ("kidney_function", &["creatinine", "bun"]),
    (
        "liver_function",
        &["ast", "alt", "alkaline_phosphatase", "total_bilirubin"],
    ),
    (
        "cardiovascular",
        &["ldl", "hdl", "triglycerides", "total_cholesterol"],
    ),
    (
        "electrolytes",
        &["sodium", "potassium", "calcium", "magnesium"],
    ),
    ("thyroid", &["tsh"]),
];

/// Risk-category tags for the out-of-range values in a flagged sequence.
/// Warning and critical both count; normal values contribute nothing.
/// Deduplicated; order carries no meaning.
pub fn risk_tags(flagged: &[FlaggedLabValue]) -> Vec<String> {
    let mut tags = BTreeSet::new();

    for flagged_value in flagged.iter().filter(|f| f.is_out_of_range) {
        let normalized = normalize_lab_name(&flagged_value.value.name);
        for (tag, keywords) in RISK_CATEGORIES {
            if keywords.iter().any(|kw| normalized.contains(kw)) {
                tags.insert((*tag).to_string());
            }
        }
    }

    tags.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use crate::models::LabScalar;

    use super::*;

    fn lab_value(name: &str, value: LabScalar) -> LabValue {
        LabValue {
            name: name.into(),
            value,
            unit: None,
            reference_min: None,
            reference_max: None,
            flag: None,
        }
    }

    fn numeric(name: &str, value: f64) -> LabValue {
        lab_value(name, LabScalar::Number(value))
    }

    #[test]
    fn in_range_value_is_normal() {
        let table = LabReferenceTable::builtin();
        let flagged = flag_lab_value(&numeric("Glucose", 95.0), &table);
        assert!(!flagged.is_out_of_range);
        assert_eq!(flagged.severity, Severity::Normal);
    }

    #[test]
    fn boundary_values_are_in_range() {
        let table = LabReferenceTable::builtin();
        // Glucose range is [70, 100]; strict comparisons keep both ends in.
        for value in [70.0, 100.0] {
            let flagged = flag_lab_value(&numeric("Glucose", value), &table);
            assert!(!flagged.is_out_of_range, "value {value} should be in range");
        }
    }

    #[test]
    fn mildly_low_value_is_warning() {
        let table = LabReferenceTable::builtin();
        // Hemoglobin [12.0, 17.5]: 11.0 is low but above 12.0 * 0.8 = 9.6.
        let flagged = flag_lab_value(&numeric("Hemoglobin", 11.0), &table);
        assert!(flagged.is_out_of_range);
        assert_eq!(flagged.severity, Severity::Warning);
    }

    #[test]
    fn deeply_low_hemoglobin_is_critical() {
        let table = LabReferenceTable::builtin();
        // 9.0 < 12.0 * 0.8 = 9.6.
        let flagged = flag_lab_value(&numeric("Hemoglobin", 9.0), &table);
        assert!(flagged.is_out_of_range);
        assert_eq!(flagged.severity, Severity::Critical);
    }

    #[test]
    fn deeply_high_value_is_critical() {
        let table = LabReferenceTable::builtin();
        // Glucose max 100; 121 > 100 * 1.2.
        let flagged = flag_lab_value(&numeric("Glucose", 121.0), &table);
        assert_eq!(flagged.severity, Severity::Critical);

        // 120 is exactly max * 1.2 — strict comparison keeps it at warning.
        let flagged = flag_lab_value(&numeric("Glucose", 120.0), &table);
        assert_eq!(flagged.severity, Severity::Warning);
    }

    #[test]
    fn canonical_reference_takes_precedence_over_report_bounds() {
        let table = LabReferenceTable::builtin();
        let mut value = numeric("Glucose", 95.0);
        // Report claims [10, 20]; canonical [70, 100] must win → in range.
        value.reference_min = Some(10.0);
        value.reference_max = Some(20.0);
        let flagged = flag_lab_value(&value, &table);
        assert!(!flagged.is_out_of_range);
        assert_eq!(flagged.severity, Severity::Normal);
    }

    #[test]
    fn report_bounds_fallback_caps_at_warning() {
        let table = LabReferenceTable::builtin();
        let mut value = numeric("Serum Widgetase", 500.0);
        value.reference_min = Some(10.0);
        value.reference_max = Some(20.0);
        let flagged = flag_lab_value(&value, &table);
        assert!(flagged.is_out_of_range);
        // No canonical reference → never critical, however extreme.
        assert_eq!(flagged.severity, Severity::Warning);
    }

    #[test]
    fn report_bounds_require_both_ends() {
        let table = LabReferenceTable::builtin();
        let mut value = numeric("Serum Widgetase", 500.0);
        value.reference_max = Some(20.0);
        let flagged = flag_lab_value(&value, &table);
        assert!(!flagged.is_out_of_range);
        assert_eq!(flagged.severity, Severity::Normal);
    }

    #[test]
    fn no_reference_anywhere_is_normal() {
        let table = LabReferenceTable::builtin();
        let flagged = flag_lab_value(&numeric("Serum Widgetase", 500.0), &table);
        assert!(!flagged.is_out_of_range);
        assert_eq!(flagged.severity, Severity::Normal);
    }

    #[test]
    fn string_values_never_flagged() {
        let table = LabReferenceTable::builtin();
        let mut value = lab_value("Hemoglobin", LabScalar::Text("low".into()));
        value.reference_min = Some(12.0);
        value.reference_max = Some(17.5);
        let flagged = flag_lab_value(&value, &table);
        assert!(!flagged.is_out_of_range);
        assert_eq!(flagged.severity, Severity::Normal);
    }

    #[test]
    fn free_text_names_normalize_before_lookup() {
        let table = LabReferenceTable::builtin();
        let flagged = flag_lab_value(&numeric("Total Cholesterol", 250.0), &table);
        assert!(flagged.is_out_of_range);
        assert_eq!(flagged.severity, Severity::Critical);
    }

    #[test]
    fn risk_tags_cover_matching_categories() {
        let table = LabReferenceTable::builtin();
        let flagged = flag_lab_values(
            &[
                numeric("Hemoglobin", 9.0),
                numeric("Creatinine", 2.5),
                numeric("Glucose", 95.0),
            ],
            &table,
        );
        let tags = risk_tags(&flagged);
        assert!(tags.contains(&"blood_health".to_string()));
        assert!(tags.contains(&"kidney_function".to_string()));
        // In-range glucose contributes nothing.
        assert!(!tags.contains(&"metabolic".to_string()));
    }

    #[test]
    fn risk_tags_deduplicate() {
        let table = LabReferenceTable::builtin();
        let flagged = flag_lab_values(
            &[numeric("Hemoglobin", 9.0), numeric("Platelets", 100.0)],
            &table,
        );
        let tags = risk_tags(&flagged);
        assert_eq!(
            tags.iter().filter(|t| *t == "blood_health").count(),
            1
        );
    }

    #[test]
    fn all_normal_yields_no_tags() {
        let table = LabReferenceTable::builtin();
        let flagged = flag_lab_values(&[numeric("Glucose", 95.0)], &table);
        assert!(risk_tags(&flagged).is_empty());
    }
}
