//! Repository for the `asset_assignments` table.

use sqlx::PgPool;

use fleetdesk_core::types::DbId;

use crate::models::assignment::AssetAssignment;

/// Column list for `asset_assignments`.
const ASSIGNMENT_COLUMNS: &str = "\
    id, asset_id, tenant_id, assignee_user_id, start_date, end_date, \
    reason, created_at, updated_at";

pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Open a new assignment starting today (`end_date` null).
    pub async fn open(
        pool: &PgPool,
        tenant_id: DbId,
        asset_id: DbId,
        assignee_user_id: DbId,
        reason: Option<&str>,
    ) -> Result<AssetAssignment, sqlx::Error> {
        let sql = format!(
            "INSERT INTO asset_assignments (asset_id, tenant_id, assignee_user_id, reason) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ASSIGNMENT_COLUMNS}"
        );
        sqlx::query_as::<_, AssetAssignment>(&sql)
            .bind(asset_id)
            .bind(tenant_id)
            .bind(assignee_user_id)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    /// Close any open assignments for an asset by setting `end_date` to
    /// today. Returns the number of assignments closed.
    pub async fn close_open(
        pool: &PgPool,
        tenant_id: DbId,
        asset_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE asset_assignments \
             SET end_date = CURRENT_DATE, updated_at = NOW() \
             WHERE tenant_id = $1 AND asset_id = $2 AND end_date IS NULL",
        )
        .bind(tenant_id)
        .bind(asset_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// List an asset's assignments, newest first.
    pub async fn list_by_asset(
        pool: &PgPool,
        tenant_id: DbId,
        asset_id: DbId,
    ) -> Result<Vec<AssetAssignment>, sqlx::Error> {
        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM asset_assignments \
             WHERE tenant_id = $1 AND asset_id = $2 \
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, AssetAssignment>(&sql)
            .bind(tenant_id)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }
}
