//! Models for the `asset_import_jobs` batch ledger table.

use serde::Serialize;
use sqlx::FromRow;

use fleetdesk_core::types::{DbId, Timestamp};

/// A row from the `asset_import_jobs` table.
///
/// Written once at batch start (status `processing`) and once at batch end
/// (terminal status plus stats); immutable after completion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetImportJob {
    pub id: DbId,
    pub tenant_id: DbId,
    pub source: String,
    pub status: String,
    pub total_rows: i32,
    pub created_count: i32,
    pub updated_count: i32,
    pub failed_count: i32,
    pub error_text: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}
