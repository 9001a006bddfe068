//! Handlers for the reference-entity create/list flows (models, vendors,
//! locations).
//!
//! These are the explicit create flows: the import reconciler only ever
//! resolves against entities created here, never creating its own.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use fleetdesk_core::error::CoreError;
use fleetdesk_db::models::reference::{CreateReference, ReferenceEntity, ReferenceKind};
use fleetdesk_db::repositories::ReferenceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantContext;
use crate::response::DataResponse;
use crate::state::AppState;

async fn create(
    state: &AppState,
    ctx: &TenantContext,
    kind: ReferenceKind,
    input: &CreateReference,
) -> Result<(StatusCode, Json<DataResponse<ReferenceEntity>>), AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name is required".into(),
        )));
    }
    let entity = ReferenceRepo::create(&state.pool, ctx.tenant_id, kind, name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entity })))
}

async fn list(
    state: &AppState,
    ctx: &TenantContext,
    kind: ReferenceKind,
) -> Result<Json<DataResponse<Vec<ReferenceEntity>>>, AppError> {
    let entities = ReferenceRepo::list(&state.pool, ctx.tenant_id, kind).await?;
    Ok(Json(DataResponse { data: entities }))
}

/// POST /api/v1/models
pub async fn create_model(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CreateReference>,
) -> AppResult<(StatusCode, Json<DataResponse<ReferenceEntity>>)> {
    create(&state, &ctx, ReferenceKind::Model, &input).await
}

/// GET /api/v1/models
pub async fn list_models(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> AppResult<Json<DataResponse<Vec<ReferenceEntity>>>> {
    list(&state, &ctx, ReferenceKind::Model).await
}

/// POST /api/v1/vendors
pub async fn create_vendor(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CreateReference>,
) -> AppResult<(StatusCode, Json<DataResponse<ReferenceEntity>>)> {
    create(&state, &ctx, ReferenceKind::Vendor, &input).await
}

/// GET /api/v1/vendors
pub async fn list_vendors(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> AppResult<Json<DataResponse<Vec<ReferenceEntity>>>> {
    list(&state, &ctx, ReferenceKind::Vendor).await
}

/// POST /api/v1/locations
pub async fn create_location(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CreateReference>,
) -> AppResult<(StatusCode, Json<DataResponse<ReferenceEntity>>)> {
    create(&state, &ctx, ReferenceKind::Location, &input).await
}

/// GET /api/v1/locations
pub async fn list_locations(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> AppResult<Json<DataResponse<Vec<ReferenceEntity>>>> {
    list(&state, &ctx, ReferenceKind::Location).await
}
