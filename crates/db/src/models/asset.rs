//! Models for the `assets` table and its DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fleetdesk_core::types::{DbId, Timestamp};

/// A row from the `assets` table.
///
/// Identity within a tenant is soft: `tag` and `serial` are matching
/// attributes, not unique keys.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub tenant_id: DbId,
    pub tag: Option<String>,
    pub serial: Option<String>,
    pub model_id: Option<DbId>,
    pub vendor_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub status: String,
    pub owner_user_id: Option<DbId>,
    pub cost: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end: Option<NaiveDate>,
    pub po_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the manual asset create flow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAsset {
    pub tag: Option<String>,
    pub serial: Option<String>,
    pub model_id: Option<DbId>,
    pub vendor_id: Option<DbId>,
    pub location_id: Option<DbId>,
    /// Defaults to `in_stock` when absent; validated against the fixed set.
    pub status: Option<String>,
    pub owner_user_id: Option<DbId>,
    pub cost: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end: Option<NaiveDate>,
    pub po_number: Option<String>,
    pub notes: Option<String>,
}

/// An asset paired with its computed warranty day count, for the
/// warranty-expiring listing.
#[derive(Debug, Clone, Serialize)]
pub struct AssetWithWarranty {
    #[serde(flatten)]
    pub asset: Asset,
    /// `-1` means expired; `null` means no warranty date stored.
    pub days_remaining: Option<i64>,
}
