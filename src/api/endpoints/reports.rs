//! Report upload and retrieval.
//!
//! `POST /api/reports` — validate, derive insights, store, return a digest.
//! `GET /api/reports/:id` — stored report plus full insights.
//! `GET /api/reports/:id/context` — plain-text rendering for the voice agent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{generate_report_id, ApiContext};
use crate::insight::reconcile::canonical_lab_values;
use crate::insight::{messages, validate_report, ReportInsights, StoredReport};
use crate::models::HealthReport;

#[derive(Serialize)]
pub struct UploadResponse {
    pub report_id: String,
    pub patient_name: String,
    pub test_date: String,
    pub insights: UploadInsightsDigest,
    pub warnings: Vec<String>,
}

/// Digest of the derived insights returned on upload; the full object is
/// available from `GET /api/reports/:id`.
#[derive(Serialize)]
pub struct UploadInsightsDigest {
    pub headline_insights: Vec<String>,
    pub risk_tags: Vec<String>,
    pub flagged_count: usize,
}

#[derive(Serialize)]
pub struct ReportDetailResponse {
    pub report: HealthReport,
    pub insights: ReportInsights,
}

/// `POST /api/reports` — accept an uploaded report.
pub async fn upload(
    State(ctx): State<ApiContext>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let validation = validate_report(&payload);
    if !validation.valid {
        return Err(ApiError::Validation {
            errors: validation.errors,
            warnings: validation.warnings,
        });
    }

    // Validation passed, but the payload can still carry type mismatches
    // the validator does not police (e.g. a non-numeric reference bound).
    let mut report: HealthReport = serde_json::from_value(payload)
        .map_err(|e| ApiError::BadRequest(format!("Malformed report payload: {e}")))?;

    let report_id = generate_report_id();
    report.report_id = Some(report_id.clone());
    report.created_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    let insights = ctx.engine.generate(&report);
    let digest = UploadInsightsDigest {
        headline_insights: insights.headline_insights.clone(),
        risk_tags: insights.risk_tags.clone(),
        flagged_count: insights.flagged_values.len(),
    };
    let response = UploadResponse {
        report_id: report_id.clone(),
        patient_name: report.patient.name.clone(),
        test_date: insights.test_date.clone(),
        insights: digest,
        warnings: validation.warnings,
    };

    ctx.reports.put(&report_id, StoredReport { report, insights })?;

    tracing::info!(report_id, "Report accepted");
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/reports/:id` — stored report with full insights.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ReportDetailResponse>, ApiError> {
    let stored = ctx
        .reports
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    Ok(Json(ReportDetailResponse {
        report: stored.report,
        insights: stored.insights,
    }))
}

/// `GET /api/reports/:id/context` — readable report context for the agent.
pub async fn context(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    let stored = ctx
        .reports
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    let values = canonical_lab_values(&stored.report);
    Ok(messages::format_report_context(
        &stored.report,
        &stored.insights.test_date,
        &values,
    ))
}
