//! Tenant-context extractor for Axum handlers.
//!
//! Authentication itself happens upstream (gateway middleware outside this
//! service); by the time a request arrives here the `x-tenant-id` header is
//! trusted. The optional `x-actor-id` header carries the caller identity
//! for audit attribution.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use fleetdesk_core::error::CoreError;
use fleetdesk_core::types::DbId;

use crate::error::AppError;

/// The multi-tenancy boundary for a request.
///
/// Use this as an extractor parameter in any handler that touches tenant
/// data:
///
/// ```ignore
/// async fn my_handler(ctx: TenantContext) -> AppResult<Json<()>> {
///     tracing::info!(tenant_id = ctx.tenant_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TenantContext {
    /// The tenant every query in this request must be scoped to.
    pub tenant_id: DbId,
    /// Caller identity for audit attribution, when the gateway supplies it.
    pub actor_user_id: Option<DbId>,
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = parts
            .headers
            .get("x-tenant-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-tenant-id header".into()))
            })?
            .parse::<DbId>()
            .map_err(|_| {
                AppError::Core(CoreError::Unauthorized("Invalid x-tenant-id header".into()))
            })?;

        let actor_user_id = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<DbId>().ok());

        Ok(TenantContext {
            tenant_id,
            actor_user_id,
        })
    }
}
