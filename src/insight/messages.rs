use crate::models::{HealthReport, LabValue};

use super::types::FlaggedLabValue;

/// Template builder for the patient-facing insight sentences and the
/// plain-text renderings handed to the voice agent. Advisory wording only;
/// nothing here prescribes treatment.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Headline for critical findings.
    pub fn critical_findings(names: &[&str]) -> String {
        format!(
            "Critical findings detected: {}. Please consult your healthcare provider immediately.",
            names.join(", "),
        )
    }

    /// Headline for out-of-range (warning) findings.
    pub fn warning_findings(names: &[&str]) -> String {
        format!(
            "Several values are outside normal range: {}. Discuss with your doctor.",
            names.join(", "),
        )
    }

    /// Headline when the report carries no measured values at all.
    pub fn all_normal() -> String {
        "All measured values are within normal ranges.".to_string()
    }
}

/// Headline insights for a flagged sequence.
///
/// Critical and warning sentences can coexist; the reassuring sentence
/// appears only when the flagged list itself is empty (a report with
/// values that all came back normal gets no headline at all).
pub fn headline_insights(flagged: &[FlaggedLabValue]) -> Vec<String> {
    use crate::models::Severity;

    let mut insights = Vec::new();

    let critical: Vec<&str> = flagged
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .map(|f| f.value.name.as_str())
        .collect();
    let warning: Vec<&str> = flagged
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .map(|f| f.value.name.as_str())
        .collect();

    if !critical.is_empty() {
        insights.push(MessageTemplates::critical_findings(&critical));
    }
    if !warning.is_empty() {
        insights.push(MessageTemplates::warning_findings(&warning));
    }
    if flagged.is_empty() {
        insights.push(MessageTemplates::all_normal());
    }

    insights
}

/// The deterministic multi-line summary block.
pub fn summary_text(report: &HealthReport, test_date: &str, insights: &[String]) -> String {
    let mut lines = vec![
        format!("Health Report Summary for {}", report.patient.name),
        format!("Test Date: {test_date}"),
        format!(
            "Age: {}, Gender: {}",
            report.patient.age, report.patient.gender
        ),
        String::new(),
        "Key Findings:".to_string(),
    ];
    lines.extend(insights.iter().cloned());

    if let Some(notes) = &report.notes {
        lines.push(String::new());
        lines.push("Additional Notes:".to_string());
        lines.push(notes.clone());
    }

    lines.join("\n")
}

/// Plain-text report rendering for the voice agent's context tool.
pub fn format_report_context(report: &HealthReport, test_date: &str, values: &[LabValue]) -> String {
    let mut lines = vec![
        format!("Patient: {}", report.patient.name),
        format!(
            "Age: {}, Gender: {}",
            report.patient.age, report.patient.gender
        ),
        format!("Test Date: {test_date}"),
        format!(
            "Lab Name: {}",
            report.lab_name.as_deref().unwrap_or("Not specified")
        ),
        String::new(),
        "Lab Values:".to_string(),
    ];

    for value in values {
        let mut line = format!(
            "  - {}: {} {}",
            value.name,
            value.value,
            value.unit.as_deref().unwrap_or(""),
        );
        if let (Some(min), Some(max)) = (value.reference_min, value.reference_max) {
            line.push_str(&format!(" (Reference: {min}-{max})"));
        }
        lines.push(line);
    }

    if let Some(notes) = &report.notes {
        lines.push(String::new());
        lines.push("Notes:".to_string());
        lines.push(notes.clone());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use crate::models::{LabScalar, PatientInfo, Severity};

    use super::*;

    fn flagged(name: &str, severity: Severity) -> FlaggedLabValue {
        FlaggedLabValue {
            value: LabValue {
                name: name.into(),
                value: LabScalar::Number(1.0),
                unit: None,
                reference_min: None,
                reference_max: None,
                flag: None,
            },
            is_out_of_range: severity != Severity::Normal,
            severity,
        }
    }

    fn report() -> HealthReport {
        HealthReport {
            report_id: None,
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
            lab_values: None,
            tests: None,
            metadata: None,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn critical_headline_names_every_value() {
        let insights = headline_insights(&[
            flagged("Hemoglobin", Severity::Critical),
            flagged("Potassium", Severity::Critical),
        ]);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("Hemoglobin, Potassium"));
        assert!(insights[0].contains("immediately"));
    }

    #[test]
    fn critical_and_warning_headlines_coexist() {
        let insights = headline_insights(&[
            flagged("Hemoglobin", Severity::Critical),
            flagged("Glucose", Severity::Warning),
        ]);
        assert_eq!(insights.len(), 2);
        assert!(insights[0].contains("Critical findings"));
        assert!(insights[1].contains("outside normal range: Glucose"));
    }

    #[test]
    fn all_normal_only_when_list_empty() {
        let insights = headline_insights(&[]);
        assert_eq!(
            insights,
            vec!["All measured values are within normal ranges."]
        );

        // A non-empty list of in-range values produces no headline.
        let insights = headline_insights(&[flagged("Glucose", Severity::Normal)]);
        assert!(insights.is_empty());
    }

    #[test]
    fn summary_text_layout() {
        let insights = vec!["Several values are outside normal range: Glucose. Discuss with your doctor.".to_string()];
        let text = summary_text(&report(), "2024-01-15", &insights);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Health Report Summary for Jane Doe");
        assert_eq!(lines[1], "Test Date: 2024-01-15");
        assert_eq!(lines[2], "Age: 34, Gender: F");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Key Findings:");
        assert!(lines[5].contains("Glucose"));
    }

    #[test]
    fn summary_text_appends_notes() {
        let mut report = report();
        report.notes = Some("Fasting sample.".into());
        let text = summary_text(&report, "2024-01-15", &[]);
        assert!(text.ends_with("Additional Notes:\nFasting sample."));
    }

    #[test]
    fn report_context_lists_values_with_ranges() {
        let mut report = report();
        report.lab_name = Some("Acme Labs".into());
        let values = vec![LabValue {
            name: "Glucose".into(),
            value: LabScalar::Number(95.0),
            unit: Some("mg/dL".into()),
            reference_min: Some(70.0),
            reference_max: Some(100.0),
            flag: None,
        }];
        let text = format_report_context(&report, "2024-01-15", &values);
        assert!(text.contains("Patient: Jane Doe"));
        assert!(text.contains("Lab Name: Acme Labs"));
        assert!(text.contains("  - Glucose: 95 mg/dL (Reference: 70-100)"));
    }

    #[test]
    fn report_context_without_lab_name() {
        let text = format_report_context(&report(), "2024-01-15", &[]);
        assert!(text.contains("Lab Name: Not specified"));
    }
}
