//! Session summarization: derive findings, answered questions,
//! recommendations and follow-ups from a voice-conversation transcript.
//! Independent of the report pipeline; shares only the "insight from
//! loosely structured text" family resemblance.

pub mod summarizer;
pub mod types;

pub use summarizer::{build_session_summary, extract_key_points, KeyPoints};
pub use types::{SessionSummary, TranscriptMessage};
