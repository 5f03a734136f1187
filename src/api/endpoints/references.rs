//! Canonical reference ranges, exposed as a server tool for the voice
//! agent.
//!
//! `GET /api/references` — every built-in range.
//! `GET /api/references/:name` — lookup by free-text lab name.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::insight::helpers::normalize_lab_name;
use crate::insight::reference;

#[derive(Serialize)]
pub struct ReferenceListResponse {
    pub references: Vec<ReferenceRangeView>,
}

#[derive(Serialize)]
pub struct ReferenceRangeView {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

#[derive(Serialize)]
pub struct ReferenceDetailResponse {
    pub lab_name: String,
    pub reference_min: f64,
    pub reference_max: f64,
    pub unit: String,
    pub description: String,
}

/// `GET /api/references` — all canonical ranges.
pub async fn list(State(ctx): State<ApiContext>) -> Json<ReferenceListResponse> {
    let references = ctx
        .engine
        .reference()
        .entries()
        .map(|(name, entry)| ReferenceRangeView {
            name: name.to_string(),
            min: entry.min,
            max: entry.max,
            unit: entry.unit.to_string(),
        })
        .collect();

    Json(ReferenceListResponse { references })
}

/// `GET /api/references/:name` — range for one lab name, normalized first.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(name): Path<String>,
) -> Result<Json<ReferenceDetailResponse>, ApiError> {
    let normalized = normalize_lab_name(&name);
    let entry = ctx
        .engine
        .reference()
        .get(&normalized)
        .ok_or_else(|| ApiError::NotFound(format!("No reference range found for: {name}")))?;

    Ok(Json(ReferenceDetailResponse {
        lab_name: name.clone(),
        reference_min: entry.min,
        reference_max: entry.max,
        unit: entry.unit.to_string(),
        description: reference::describe(&normalized).to_string(),
    }))
}
