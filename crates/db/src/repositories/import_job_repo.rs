//! Repository for the `asset_import_jobs` batch ledger table.

use sqlx::PgPool;

use fleetdesk_core::ledger::{ImportJobStatus, ImportStats};
use fleetdesk_core::types::DbId;

use crate::models::import_job::AssetImportJob;

/// Column list for `asset_import_jobs`.
const JOB_COLUMNS: &str = "\
    id, tenant_id, source, status, total_rows, created_count, \
    updated_count, failed_count, error_text, created_by, \
    created_at, completed_at";

/// Jobs returned by the listing endpoint.
const LIST_LIMIT: i64 = 50;

pub struct ImportJobRepo;

impl ImportJobRepo {
    /// Create a job record at batch start, in `processing` status.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        source: &str,
        total_rows: i32,
        created_by: Option<DbId>,
    ) -> Result<AssetImportJob, sqlx::Error> {
        let sql = format!(
            "INSERT INTO asset_import_jobs (tenant_id, source, status, total_rows, created_by) \
             VALUES ($1, $2, 'processing', $3, $4) \
             RETURNING {JOB_COLUMNS}"
        );
        sqlx::query_as::<_, AssetImportJob>(&sql)
            .bind(tenant_id)
            .bind(source)
            .bind(total_rows)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Write the terminal status and stats once at batch end. The row is
    /// immutable afterwards; nothing else mutates it mid-batch.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        status: ImportJobStatus,
        stats: &ImportStats,
        error_text: Option<&str>,
    ) -> Result<AssetImportJob, sqlx::Error> {
        let sql = format!(
            "UPDATE asset_import_jobs SET \
                status = $2, \
                total_rows = $3, \
                created_count = $4, \
                updated_count = $5, \
                failed_count = $6, \
                error_text = $7, \
                completed_at = NOW() \
             WHERE id = $1 \
             RETURNING {JOB_COLUMNS}"
        );
        sqlx::query_as::<_, AssetImportJob>(&sql)
            .bind(id)
            .bind(status.as_str())
            .bind(stats.total as i32)
            .bind(stats.created as i32)
            .bind(stats.updated as i32)
            .bind(stats.failed as i32)
            .bind(error_text)
            .fetch_one(pool)
            .await
    }

    /// Find a job by ID within a tenant.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<AssetImportJob>, sqlx::Error> {
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM asset_import_jobs WHERE tenant_id = $1 AND id = $2"
        );
        sqlx::query_as::<_, AssetImportJob>(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's import jobs, most recent first, bounded.
    pub async fn list_by_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<AssetImportJob>, sqlx::Error> {
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM asset_import_jobs \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, AssetImportJob>(&sql)
            .bind(tenant_id)
            .bind(LIST_LIMIT)
            .fetch_all(pool)
            .await
    }
}
