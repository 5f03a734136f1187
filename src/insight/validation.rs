//! Structural and semantic validation of an incoming report payload.
//!
//! All rules are evaluated in a single pass so the caller sees every
//! violation at once; nothing here panics or short-circuits (except the
//! not-an-object case, where no further rule can apply). Warnings never
//! block acceptance.

use serde_json::Value;

use super::helpers::is_iso_date_prefix;

/// Outcome of validating a report payload. `valid` is true iff `errors`
/// is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a decoded report payload.
pub fn validate_report(payload: &Value) -> ReportValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let Some(report) = payload.as_object() else {
        errors.push("Report must be a valid JSON object".to_string());
        return ReportValidation {
            valid: false,
            errors,
            warnings,
        };
    };

    validate_patient(report.get("patient"), &mut errors);
    validate_test_date(report, &mut errors, &mut warnings);

    let has_lab_values = non_empty_array(report.get("lab_values"));
    let has_tests = non_empty_array(report.get("tests"));

    if !has_lab_values && !has_tests {
        errors.push(
            "Report must contain either lab_values array or tests array with test categories"
                .to_string(),
        );
    }

    if has_lab_values {
        if let Some(values) = report.get("lab_values").and_then(Value::as_array) {
            validate_lab_values(values, &mut errors);
        }
    }

    if has_tests {
        if let Some(categories) = report.get("tests").and_then(Value::as_array) {
            validate_test_categories(categories, &mut errors);
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(warning_count = warnings.len(), "Report validation warnings");
    }

    ReportValidation {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn validate_patient(patient: Option<&Value>, errors: &mut Vec<String>) {
    let Some(patient) = patient.and_then(Value::as_object) else {
        errors.push("Missing or invalid patient information".to_string());
        return;
    };

    match patient.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => {}
        _ => errors.push("Patient name is required".to_string()),
    }

    match patient.get("age").and_then(Value::as_f64) {
        Some(age) if age >= 0.0 => {}
        _ => errors.push("Patient age must be a valid positive number".to_string()),
    }

    match patient.get("gender").and_then(Value::as_str) {
        Some(gender) if !gender.is_empty() => {
            let normalized = gender.to_lowercase();
            if !["m", "f", "male", "female", "other"].contains(&normalized.as_str()) {
                errors.push("Patient gender must be M, F, Male, Female, or Other".to_string());
            }
        }
        _ => errors.push("Patient gender is required".to_string()),
    }
}

/// The test date may live at the top level or in lab metadata
/// (`reported_on` / `sample_collected`). Absence is only a warning because
/// complex reports often carry dates in metadata alone.
fn validate_test_date(
    report: &serde_json::Map<String, Value>,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let metadata = report.get("metadata").and_then(Value::as_object);

    let test_date = present(report.get("test_date"))
        .or_else(|| present(metadata.and_then(|m| m.get("reported_on"))))
        .or_else(|| present(metadata.and_then(|m| m.get("sample_collected"))));

    match test_date {
        None => warnings.push("Test date not found (optional for complex reports)".to_string()),
        Some(Value::String(date)) => {
            if !is_iso_date_prefix(date) {
                errors.push(
                    "Test date must be in ISO format (YYYY-MM-DD or ISO 8601)".to_string(),
                );
            }
        }
        // Non-string date values pass through unchecked, matching the
        // upload contract (only string dates are format-validated).
        Some(_) => {}
    }
}

fn validate_lab_values(values: &[Value], errors: &mut Vec<String>) {
    for (index, value) in values.iter().enumerate() {
        let Some(lab_value) = value.as_object() else {
            errors.push(format!("Lab value at index {index} is invalid"));
            continue;
        };

        match lab_value.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => {}
            _ => errors.push(format!("Lab value at index {index} missing name")),
        }
        if lab_value.get("value").is_none() {
            errors.push(format!("Lab value at index {index} missing value"));
        }
        match lab_value.get("unit").and_then(Value::as_str) {
            Some(unit) if !unit.is_empty() => {}
            _ => errors.push(format!("Lab value at index {index} missing unit")),
        }
    }
}

fn validate_test_categories(categories: &[Value], errors: &mut Vec<String>) {
    for (cat_index, category) in categories.iter().enumerate() {
        let Some(cat) = category.as_object() else {
            errors.push(format!("Test category at index {cat_index} is invalid"));
            continue;
        };

        match cat.get("category").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => {}
            _ => errors.push(format!(
                "Test category at index {cat_index} missing category name"
            )),
        }

        let Some(tests) = cat.get("tests").and_then(Value::as_array) else {
            errors.push(format!(
                "Test category at index {cat_index} missing tests array"
            ));
            continue;
        };

        for (test_index, test) in tests.iter().enumerate() {
            let Some(t) = test.as_object() else {
                errors.push(format!(
                    "Test at category {cat_index}, index {test_index} is invalid"
                ));
                continue;
            };

            match t.get("test_name").and_then(Value::as_str) {
                Some(name) if !name.is_empty() => {}
                _ => errors.push(format!(
                    "Test at category {cat_index}, index {test_index} missing test_name"
                )),
            }
            if !t.get("result").map(Value::is_object).unwrap_or(false) {
                errors.push(format!(
                    "Test at category {cat_index}, index {test_index} missing result object"
                ));
            }
        }
    }
}

/// A value counts as present when it exists and is not null or an empty
/// string (an empty `test_date` falls through to the metadata dates).
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

fn non_empty_array(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .map(|a| !a.is_empty())
        .unwrap_or(false)
}
