use std::fmt;

use serde::{Deserialize, Serialize};

use super::enums::LabFlag;

/// A lab measurement as reported: numeric when measurable, free text for
/// qualitative results ("positive", "trace"). Only numeric values are ever
/// range-checked downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabScalar {
    Number(f64),
    Text(String),
}

impl LabScalar {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for LabScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Canonical unit of the insight pipeline. Field names follow the upload
/// wire format, camelCase bounds included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabValue {
    pub name: String,
    pub value: LabScalar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "referenceMin", skip_serializing_if = "Option::is_none")]
    pub reference_min: Option<f64>,
    #[serde(rename = "referenceMax", skip_serializing_if = "Option::is_none")]
    pub reference_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<LabFlag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: String,
    pub age: f64,
    /// M, F, Male, Female, Other (case-insensitive); validated, not parsed.
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<LabScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestFlag {
    pub status: LabFlag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub test_name: String,
    pub result: TestResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<ReferenceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<TestFlag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCategory {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub tests: Vec<Test>,
}

/// Lab-level metadata carried by complex reports. Dates here are full ISO
/// timestamps; the date portion feeds test_date resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_collected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referring_doctor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,
}

/// An uploaded health report. Two interchangeable shapes share this struct:
/// simple reports carry `lab_values`, complex reports carry categorized
/// `tests`. When both are present, `lab_values` wins downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    pub patient: PatientInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_values: Option<Vec<LabValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<TestCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReportMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
