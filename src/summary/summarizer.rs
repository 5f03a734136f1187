use crate::models::Role;

use super::types::{SessionSummary, TranscriptMessage};

/// Output caps, applied after extraction.
const MAX_FINDINGS: usize = 5;
const MAX_QUESTIONS: usize = 3;

/// Agent messages shorter than this carry no finding worth keeping.
const MIN_FINDING_MESSAGE_LEN: usize = 50;

/// Sentences kept per qualifying agent message.
const SENTENCES_PER_MESSAGE: usize = 2;

// ---------------------------------------------------------------------------
// Keyword sets
// ---------------------------------------------------------------------------
// Literal substring heuristics, pinned. Each set fires independently; any
// subset of the three recommendations may appear together.

const ELEVATED_KEYWORDS: &[&str] = &["high", "elevated", "above"];
const DEFICIENT_KEYWORDS: &[&str] = &["low", "below", "deficient"];
const NORMAL_KEYWORDS: &[&str] = &["normal", "within range"];

const QUESTION_MARKERS: &[&str] = &["?", "what", "why"];

/// Raw material pulled from a transcript before caps apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyPoints {
    pub findings: Vec<String>,
    pub questions: Vec<String>,
}

/// Scan a transcript for question and finding sentences.
///
/// User messages containing a question marker are collected verbatim.
/// Agent messages longer than the length gate are split on sentence
/// terminators and contribute their first two non-empty sentences.
pub fn extract_key_points(transcript: &[TranscriptMessage]) -> KeyPoints {
    let mut findings = Vec::new();
    let mut questions = Vec::new();

    for message in transcript {
        match message.role {
            Role::User => {
                let content = message.content.to_lowercase();
                if QUESTION_MARKERS.iter().any(|m| content.contains(m)) {
                    questions.push(message.content.clone());
                }
            }
            Role::Agent => {
                if message.content.len() > MIN_FINDING_MESSAGE_LEN {
                    findings.extend(
                        message
                            .content
                            .split(['.', '!', '?'])
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .take(SENTENCES_PER_MESSAGE)
                            .map(str::to_string),
                    );
                }
            }
        }
    }

    KeyPoints { findings, questions }
}

/// Recommendations from the joined, lowercased finding text. The three
/// keyword checks are independent; when none fire, a single generic
/// recommendation stands in.
pub fn recommendations(findings: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();
    let text = findings.join(" ").to_lowercase();

    if ELEVATED_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        recommendations.push(
            "Monitor the elevated values closely and schedule a follow-up with your doctor."
                .to_string(),
        );
    }
    if DEFICIENT_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        recommendations.push(
            "Consider dietary adjustments or supplementation as recommended by your healthcare provider."
                .to_string(),
        );
    }
    if NORMAL_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        recommendations
            .push("Continue current health practices and maintain regular check-ups.".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(
            "Consult with your healthcare provider for personalized recommendations.".to_string(),
        );
    }

    recommendations
}

/// Follow-up actions, in fixed order. The transcript-review action is
/// prepended only when at least one question was captured.
pub fn follow_up_actions(questions: &[String]) -> Vec<String> {
    let mut actions = Vec::new();

    if !questions.is_empty() {
        actions.push(
            "Review the conversation transcript for detailed explanations of your health metrics."
                .to_string(),
        );
    }

    actions.push(
        "Schedule a follow-up appointment with your healthcare provider to discuss results."
            .to_string(),
    );
    actions.push("Keep a record of this report for future reference and comparison.".to_string());
    actions.push("Share this summary with your healthcare provider if needed.".to_string());

    actions
}

/// Build the stored session summary for a transcript.
pub fn build_session_summary(
    report_id: &str,
    transcript: &[TranscriptMessage],
    generated_at: &str,
) -> SessionSummary {
    let key_points = extract_key_points(transcript);
    let recommendations = recommendations(&key_points.findings);
    let follow_up_actions = follow_up_actions(&key_points.questions);

    let mut findings = key_points.findings;
    findings.truncate(MAX_FINDINGS);
    let mut questions = key_points.questions;
    questions.truncate(MAX_QUESTIONS);

    SessionSummary {
        report_id: report_id.to_string(),
        generated_at: generated_at.to_string(),
        findings,
        key_questions_answered: questions,
        recommendations,
        follow_up_actions,
    }
}
