//! Session summaries derived from a voice-conversation transcript.
//!
//! `POST /api/summaries` — summarize a transcript, store by report id.
//! `GET /api/summaries/:id` — stored summary.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::summary::{build_session_summary, SessionSummary, TranscriptMessage};

/// Both fields are required; options let the handler surface one
/// message for either omission instead of a generic decode failure.
#[derive(Deserialize)]
pub struct SummaryRequest {
    pub report_id: Option<String>,
    pub transcript: Option<Vec<TranscriptMessage>>,
}

/// `POST /api/summaries` — derive and store a session summary.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(request): Json<SummaryRequest>,
) -> Result<(StatusCode, Json<SessionSummary>), ApiError> {
    let report_id = request.report_id.filter(|id| !id.is_empty());
    let (Some(report_id), Some(transcript)) = (report_id, request.transcript) else {
        return Err(ApiError::BadRequest(
            "report_id and transcript are required".to_string(),
        ));
    };

    let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let summary = build_session_summary(&report_id, &transcript, &generated_at);

    ctx.summaries.put(&report_id, summary.clone())?;

    tracing::info!(
        report_id,
        findings = summary.findings.len(),
        questions = summary.key_questions_answered.len(),
        "Session summary generated"
    );
    Ok((StatusCode::CREATED, Json(summary)))
}

/// `GET /api/summaries/:id` — stored summary for a report id.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<SessionSummary>, ApiError> {
    let summary = ctx
        .summaries
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound("Summary not found".to_string()))?;

    Ok(Json(summary))
}
