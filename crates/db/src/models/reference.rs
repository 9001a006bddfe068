//! Tenant-scoped reference entities: asset models, vendors, locations.
//!
//! Resolution is keyed by `(tenant_id, lower(name))`. The reconciler never
//! creates these implicitly; they come from the explicit create flows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fleetdesk_core::types::{DbId, Timestamp};

/// Which reference table a resolution or create targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Model,
    Vendor,
    Location,
}

impl ReferenceKind {
    /// The backing table name. Fixed set, safe to interpolate into SQL.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Model => "asset_models",
            Self::Vendor => "vendors",
            Self::Location => "locations",
        }
    }

    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Model => "AssetModel",
            Self::Vendor => "Vendor",
            Self::Location => "Location",
        }
    }
}

/// A row from one of the reference tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReferenceEntity {
    pub id: DbId,
    pub tenant_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the explicit reference-entity create flow.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReference {
    pub name: String,
}
