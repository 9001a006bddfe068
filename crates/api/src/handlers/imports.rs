//! Handlers for the asset import pipeline: preview, execute, job listing.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use fleetdesk_core::error::CoreError;
use fleetdesk_core::mapping::{identity_mapping, suggest_mapping};
use fleetdesk_core::tabular::parse_delimited;
use fleetdesk_db::models::import_job::AssetImportJob;
use fleetdesk_db::repositories::ImportJobRepo;

use crate::engine::reconciler::{run_import, ImportRunResult};
use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantContext;
use crate::response::DataResponse;
use crate::state::AppState;

/// Rows echoed back by the preview endpoint.
const PREVIEW_ROW_LIMIT: usize = 10;

// ── Preview ──────────────────────────────────────────────────────────

/// Request body for import preview.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub raw_text: String,
}

/// Parsed shape of the uploaded text plus the advisory field mapping.
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub headers: Vec<String>,
    pub preview_rows: Vec<HashMap<String, String>>,
    pub total_rows: usize,
    pub suggested_mapping: HashMap<String, String>,
}

/// POST /api/v1/imports/preview
///
/// Parse delimited text and return the headers, the first rows, and a
/// suggested source-column to canonical-field mapping. Nothing is
/// persisted; the caller may override any suggestion before executing.
pub async fn preview_import(
    _ctx: TenantContext,
    Json(body): Json<PreviewRequest>,
) -> AppResult<Json<DataResponse<PreviewResult>>> {
    let table = parse_delimited(&body.raw_text)?;
    let suggested_mapping = suggest_mapping(&table.headers);
    let total_rows = table.rows.len();

    let preview_rows: Vec<HashMap<String, String>> =
        table.rows.into_iter().take(PREVIEW_ROW_LIMIT).collect();

    Ok(Json(DataResponse {
        data: PreviewResult {
            headers: table.headers,
            preview_rows,
            total_rows,
            suggested_mapping,
        },
    }))
}

// ── Execute ──────────────────────────────────────────────────────────

/// Request body for batch execution.
#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    /// Label for the feed (e.g. "csv", a future MDM/HR feed name).
    pub source: Option<String>,
    /// Raw rows, typically the parsed output of the preview step.
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
    /// Source key -> canonical field. Absent means rows are already keyed
    /// by canonical field names.
    pub field_mapping: Option<HashMap<String, String>>,
}

/// POST /api/v1/imports
///
/// Execute an import batch. Row failures are absorbed into the batch
/// ledger, so the response is always a success payload describing partial
/// outcomes; only a malformed top-level request is rejected.
pub async fn execute_import(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(body): Json<ExecuteRequest>,
) -> AppResult<Json<DataResponse<ImportRunResult>>> {
    let source = body
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("source is required".into())))?;

    if body.rows.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "rows must not be empty".into(),
        )));
    }

    let mapping = body
        .field_mapping
        .filter(|m| !m.is_empty())
        .unwrap_or_else(identity_mapping);

    let result = run_import(&state.pool, &ctx, source, &body.rows, &mapping).await?;

    Ok(Json(DataResponse { data: result }))
}

// ── Job listing ──────────────────────────────────────────────────────

/// GET /api/v1/imports/jobs
///
/// The tenant's import jobs, most recent first, bounded.
pub async fn list_import_jobs(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> AppResult<Json<DataResponse<Vec<AssetImportJob>>>> {
    let jobs = ImportJobRepo::list_by_tenant(&state.pool, ctx.tenant_id).await?;
    Ok(Json(DataResponse { data: jobs }))
}
