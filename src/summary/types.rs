use serde::{Deserialize, Serialize};

use crate::models::Role;

/// One utterance in a voice-session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Summary of one voice session about a report. Keyed by report id; the
/// id is not required to reference a stored report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub report_id: String,
    pub generated_at: String,
    /// At most 5.
    pub findings: Vec<String>,
    /// At most 3.
    pub key_questions_answered: Vec<String>,
    pub recommendations: Vec<String>,
    pub follow_up_actions: Vec<String>,
}
