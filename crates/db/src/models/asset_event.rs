//! Models for the append-only `asset_events` audit log.

use serde::Serialize;
use sqlx::FromRow;

use fleetdesk_core::types::{DbId, Timestamp};

pub const EVENT_CREATED: &str = "created";
pub const EVENT_STATUS_CHANGED: &str = "status_changed";
pub const EVENT_ASSIGNED: &str = "assigned";
pub const EVENT_UNASSIGNED: &str = "unassigned";

/// A row from the `asset_events` table. Never updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetEvent {
    pub id: DbId,
    pub asset_id: DbId,
    pub tenant_id: DbId,
    pub event_type: String,
    pub from_status: Option<String>,
    pub to_status: Option<String>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending an event.
#[derive(Debug, Clone)]
pub struct NewAssetEvent {
    pub asset_id: DbId,
    pub tenant_id: DbId,
    pub event_type: &'static str,
    pub from_status: Option<String>,
    pub to_status: Option<String>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
}
