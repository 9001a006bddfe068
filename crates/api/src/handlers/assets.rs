//! Handlers for assets: listing, manual create, status changes with audit
//! events, assignment, and the warranty-expiring report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use fleetdesk_core::error::CoreError;
use fleetdesk_core::lifecycle::{validate_status, warranty_days_remaining, DEFAULT_STATUS};
use fleetdesk_core::types::DbId;
use fleetdesk_db::models::asset::{Asset, AssetWithWarranty, CreateAsset};
use fleetdesk_db::models::asset_event::{
    AssetEvent, NewAssetEvent, EVENT_ASSIGNED, EVENT_CREATED, EVENT_STATUS_CHANGED,
    EVENT_UNASSIGNED,
};
use fleetdesk_db::repositories::{AssetEventRepo, AssetRepo, AssignmentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantContext;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default horizon for the warranty-expiring report, in days.
const DEFAULT_WARRANTY_WINDOW_DAYS: i32 = 30;

// ── Listing & retrieval ──────────────────────────────────────────────

/// Query parameters for asset listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/assets
pub async fn list_assets(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Asset>>>> {
    let assets = AssetRepo::list(&state.pool, ctx.tenant_id, params.limit).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let asset = find_asset(&state, &ctx, id).await?;
    Ok(Json(DataResponse { data: asset }))
}

// ── Manual create ────────────────────────────────────────────────────

/// POST /api/v1/assets
///
/// Manual create flow. Unlike import, the status here is validated against
/// the fixed set before anything is written.
pub async fn create_asset(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<DataResponse<Asset>>)> {
    let status = match input.status.as_deref() {
        Some(s) => validate_status(s)?.as_str(),
        None => DEFAULT_STATUS.as_str(),
    };

    let asset = AssetRepo::create(&state.pool, ctx.tenant_id, &input, status).await?;

    AssetEventRepo::insert(
        &state.pool,
        &NewAssetEvent {
            asset_id: asset.id,
            tenant_id: ctx.tenant_id,
            event_type: EVENT_CREATED,
            from_status: None,
            to_status: Some(asset.status.clone()),
            actor_user_id: ctx.actor_user_id,
            payload: json!({ "source": "manual" }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

// ── Status change ────────────────────────────────────────────────────

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: Option<String>,
    pub reason: Option<String>,
    pub audit_note: Option<String>,
}

/// POST /api/v1/assets/{id}/status
///
/// Change an asset's lifecycle status. The new status must be a member of
/// the fixed set; any-to-any transitions are permitted. Exactly one
/// `status_changed` event is appended, carrying the caller's reason and
/// audit note.
pub async fn change_status(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
    Json(body): Json<ChangeStatusRequest>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let status = require_field(body.status.as_deref(), "status")?;
    let reason = require_field(body.reason.as_deref(), "reason")?;
    let audit_note = require_field(body.audit_note.as_deref(), "audit_note")?;

    let new_status = validate_status(status)?;

    let asset = find_asset(&state, &ctx, id).await?;
    let from_status = asset.status.clone();

    let updated = AssetRepo::update_status(&state.pool, ctx.tenant_id, id, new_status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;

    AssetEventRepo::insert(
        &state.pool,
        &NewAssetEvent {
            asset_id: id,
            tenant_id: ctx.tenant_id,
            event_type: EVENT_STATUS_CHANGED,
            from_status: Some(from_status),
            to_status: Some(new_status.as_str().to_string()),
            actor_user_id: ctx.actor_user_id,
            payload: json!({ "reason": reason, "audit_note": audit_note }),
        },
    )
    .await?;

    Ok(Json(DataResponse { data: updated }))
}

// ── Assignment ───────────────────────────────────────────────────────

/// Request body for assigning an asset to a user.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub assignee_user_id: DbId,
    pub reason: Option<String>,
}

/// POST /api/v1/assets/{id}/assign
///
/// Assign the asset to a user: closes any open assignment, opens a new
/// one, sets the owner, and appends an `assigned` event.
pub async fn assign_asset(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
    Json(body): Json<AssignRequest>,
) -> AppResult<Json<DataResponse<Asset>>> {
    find_asset(&state, &ctx, id).await?;

    AssignmentRepo::close_open(&state.pool, ctx.tenant_id, id).await?;
    AssignmentRepo::open(
        &state.pool,
        ctx.tenant_id,
        id,
        body.assignee_user_id,
        body.reason.as_deref(),
    )
    .await?;

    let updated = AssetRepo::set_owner(&state.pool, ctx.tenant_id, id, Some(body.assignee_user_id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;

    AssetEventRepo::insert(
        &state.pool,
        &NewAssetEvent {
            asset_id: id,
            tenant_id: ctx.tenant_id,
            event_type: EVENT_ASSIGNED,
            from_status: None,
            to_status: None,
            actor_user_id: ctx.actor_user_id,
            payload: json!({
                "assignee_user_id": body.assignee_user_id,
                "reason": body.reason,
            }),
        },
    )
    .await?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/assets/{id}/unassign
///
/// Clear the owner, close the open assignment, append an `unassigned`
/// event.
pub async fn unassign_asset(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let asset = find_asset(&state, &ctx, id).await?;

    AssignmentRepo::close_open(&state.pool, ctx.tenant_id, id).await?;

    let updated = AssetRepo::set_owner(&state.pool, ctx.tenant_id, id, None)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;

    AssetEventRepo::insert(
        &state.pool,
        &NewAssetEvent {
            asset_id: id,
            tenant_id: ctx.tenant_id,
            event_type: EVENT_UNASSIGNED,
            from_status: None,
            to_status: None,
            actor_user_id: ctx.actor_user_id,
            payload: json!({ "previous_owner_user_id": asset.owner_user_id }),
        },
    )
    .await?;

    Ok(Json(DataResponse { data: updated }))
}

// ── Events ───────────────────────────────────────────────────────────

/// GET /api/v1/assets/{id}/events
///
/// The asset's immutable audit trail, newest first.
pub async fn list_asset_events(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AssetEvent>>>> {
    find_asset(&state, &ctx, id).await?;
    let events = AssetEventRepo::list_by_asset(&state.pool, ctx.tenant_id, id).await?;
    Ok(Json(DataResponse { data: events }))
}

// ── Warranty report ──────────────────────────────────────────────────

/// Query parameters for the warranty-expiring report.
#[derive(Debug, Deserialize)]
pub struct WarrantyParams {
    pub within_days: Option<i32>,
}

/// GET /api/v1/assets/warranty-expiring?within_days=N
///
/// Assets whose warranty ends within the window, ascending by
/// `warranty_end`, each with its computed remaining-day count.
pub async fn warranty_expiring(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<WarrantyParams>,
) -> AppResult<Json<DataResponse<Vec<AssetWithWarranty>>>> {
    let within_days = params
        .within_days
        .unwrap_or(DEFAULT_WARRANTY_WINDOW_DAYS)
        .max(0);

    let assets = AssetRepo::list_warranty_expiring(&state.pool, ctx.tenant_id, within_days).await?;

    let today = chrono::Utc::now().date_naive();
    let data = assets
        .into_iter()
        .map(|asset| {
            let days_remaining = warranty_days_remaining(asset.warranty_end, today);
            AssetWithWarranty {
                asset,
                days_remaining,
            }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

// ── Private helpers ──────────────────────────────────────────────────

/// Fetch an asset within the tenant or fail with 404.
async fn find_asset(state: &AppState, ctx: &TenantContext, id: DbId) -> Result<Asset, AppError> {
    AssetRepo::find_by_id(&state.pool, ctx.tenant_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))
}

/// Require a non-empty request field.
fn require_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("{name} is required"))))
}
