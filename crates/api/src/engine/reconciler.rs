//! The idempotent dedup-and-upsert reconciler.
//!
//! Processes one import batch as a strict in-order loop over rows. Each row
//! is projected into a typed patch, its reference names resolved, then
//! matched against existing assets by tag-or-serial; the row either creates
//! a new asset or COALESCE-merges into the match. Every row commits before
//! the next begins, so a later row can observe and update an asset created
//! earlier in the same batch (within-batch dedup relies on this).
//!
//! Failure isolation is the defining property: a row failure is recorded in
//! the batch ledger and the loop continues. Only job bookkeeping failures
//! abort the batch.
//!
//! Known limit: two concurrent batches (or a batch racing a manual edit)
//! targeting the same tag/serial are not serialized against each other and
//! can create duplicate assets. The soft-identity match is an application
//! heuristic, not a database constraint.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use fleetdesk_core::error::RowError;
use fleetdesk_core::ledger::{BatchLedger, ImportJobStatus, ImportStats};
use fleetdesk_core::reconcile::{project_row, AssetRowPatch};
use fleetdesk_core::types::DbId;
use fleetdesk_db::models::asset_event::{NewAssetEvent, EVENT_CREATED};
use fleetdesk_db::models::reference::ReferenceKind;
use fleetdesk_db::repositories::{
    AssetEventRepo, AssetRepo, ImportJobRepo, ReferenceRepo, ResolvedRefs,
};
use fleetdesk_db::DbPool;

use crate::error::AppError;
use crate::middleware::tenant::TenantContext;

/// Outcome of a whole import batch, returned to the caller.
#[derive(Debug, Serialize)]
pub struct ImportRunResult {
    pub job_id: DbId,
    pub status: ImportJobStatus,
    pub stats: ImportStats,
    /// At most the first 10 row errors; `stats.failed` is the true count.
    pub errors: Vec<String>,
    /// Model/vendor/location names that did not resolve and were dropped
    /// to null.
    pub unresolved_references: u32,
}

enum RowOutcome {
    Created,
    Updated,
}

/// Run one import batch to completion. No cancellation path: once started,
/// the batch runs over every row.
pub async fn run_import(
    pool: &DbPool,
    ctx: &TenantContext,
    source: &str,
    rows: &[Map<String, Value>],
    mapping: &HashMap<String, String>,
) -> Result<ImportRunResult, AppError> {
    let job = ImportJobRepo::create(
        pool,
        ctx.tenant_id,
        source,
        rows.len() as i32,
        ctx.actor_user_id,
    )
    .await?;

    tracing::info!(
        job_id = job.id,
        tenant_id = ctx.tenant_id,
        total_rows = rows.len(),
        source,
        "Starting asset import batch"
    );

    let mut ledger = BatchLedger::new();

    for (index, raw) in rows.iter().enumerate() {
        let row_number = index + 1;
        match reconcile_row(pool, ctx, row_number, raw, mapping, &mut ledger).await {
            Ok(RowOutcome::Created) => ledger.record_created(),
            Ok(RowOutcome::Updated) => ledger.record_updated(),
            Err(err) => {
                tracing::warn!(
                    job_id = job.id,
                    tenant_id = ctx.tenant_id,
                    row = row_number,
                    error = %err,
                    "Import row failed"
                );
                ledger.record_failure(&err);
            }
        }
    }

    let outcome = ledger.finalize(rows.len() as u32);
    let error_text = if outcome.errors.is_empty() {
        None
    } else {
        Some(outcome.errors.join("; "))
    };

    let job = ImportJobRepo::complete(
        pool,
        job.id,
        outcome.status,
        &outcome.stats,
        error_text.as_deref(),
    )
    .await?;

    tracing::info!(
        job_id = job.id,
        tenant_id = ctx.tenant_id,
        status = %outcome.status,
        created = outcome.stats.created,
        updated = outcome.stats.updated,
        failed = outcome.stats.failed,
        "Import batch complete"
    );

    Ok(ImportRunResult {
        job_id: job.id,
        status: outcome.status,
        stats: outcome.stats,
        errors: outcome.errors,
        unresolved_references: outcome.unresolved_references,
    })
}

/// Reconcile a single row: project, resolve, match, then create or merge.
async fn reconcile_row(
    pool: &DbPool,
    ctx: &TenantContext,
    row_number: usize,
    raw: &Map<String, Value>,
    mapping: &HashMap<String, String>,
    ledger: &mut BatchLedger,
) -> Result<RowOutcome, RowError> {
    let patch = project_row(row_number, raw, mapping)?;
    let refs = resolve_references(pool, ctx.tenant_id, row_number, &patch, ledger).await?;

    // Soft-identity match: first asset in the tenant sharing the row's tag
    // or serial. Rows with neither always create.
    if patch.has_identity() {
        let existing = AssetRepo::find_by_tag_or_serial(
            pool,
            ctx.tenant_id,
            patch.tag.as_deref(),
            patch.serial.as_deref(),
        )
        .await
        .map_err(|e| db_row_error(row_number, &e))?;

        if let Some(asset) = existing {
            AssetRepo::merge_import_fields(pool, ctx.tenant_id, asset.id, &patch, refs)
                .await
                .map_err(|e| db_row_error(row_number, &e))?;
            return Ok(RowOutcome::Updated);
        }
    }

    let asset = AssetRepo::insert_imported(pool, ctx.tenant_id, &patch, refs)
        .await
        .map_err(|e| db_row_error(row_number, &e))?;

    AssetEventRepo::insert(
        pool,
        &NewAssetEvent {
            asset_id: asset.id,
            tenant_id: ctx.tenant_id,
            event_type: EVENT_CREATED,
            from_status: None,
            to_status: Some(asset.status.clone()),
            actor_user_id: ctx.actor_user_id,
            payload: json!({ "source": "import" }),
        },
    )
    .await
    .map_err(|e| db_row_error(row_number, &e))?;

    Ok(RowOutcome::Created)
}

/// Resolve model/vendor/location names to ids.
///
/// An unresolvable name is not a row error: the reference is dropped to
/// null and counted so operators can see the data loss. The resolver never
/// creates entities.
async fn resolve_references(
    pool: &DbPool,
    tenant_id: DbId,
    row_number: usize,
    patch: &AssetRowPatch,
    ledger: &mut BatchLedger,
) -> Result<ResolvedRefs, RowError> {
    let mut refs = ResolvedRefs::default();

    if let Some(name) = patch.model_name.as_deref() {
        refs.model_id = ReferenceRepo::resolve(pool, tenant_id, ReferenceKind::Model, name)
            .await
            .map_err(|e| db_row_error(row_number, &e))?;
        if refs.model_id.is_none() {
            ledger.record_unresolved_reference();
        }
    }
    if let Some(name) = patch.vendor_name.as_deref() {
        refs.vendor_id = ReferenceRepo::resolve(pool, tenant_id, ReferenceKind::Vendor, name)
            .await
            .map_err(|e| db_row_error(row_number, &e))?;
        if refs.vendor_id.is_none() {
            ledger.record_unresolved_reference();
        }
    }
    if let Some(name) = patch.location_name.as_deref() {
        refs.location_id = ReferenceRepo::resolve(pool, tenant_id, ReferenceKind::Location, name)
            .await
            .map_err(|e| db_row_error(row_number, &e))?;
        if refs.location_id.is_none() {
            ledger.record_unresolved_reference();
        }
    }

    Ok(refs)
}

fn db_row_error(row_number: usize, err: &sqlx::Error) -> RowError {
    RowError::new(row_number, err.to_string())
}
