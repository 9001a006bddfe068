//! Models for the `asset_assignments` table.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use fleetdesk_core::types::{DbId, Timestamp};

/// A row from the `asset_assignments` table. Open-ended while `end_date`
/// is null; closing an assignment sets it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetAssignment {
    pub id: DbId,
    pub asset_id: DbId,
    pub tenant_id: DbId,
    pub assignee_user_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
