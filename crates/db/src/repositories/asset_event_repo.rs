//! Repository for the append-only `asset_events` audit log.

use sqlx::PgPool;

use fleetdesk_core::types::DbId;

use crate::models::asset_event::{AssetEvent, NewAssetEvent};

/// Column list for `asset_events`.
const EVENT_COLUMNS: &str = "\
    id, asset_id, tenant_id, event_type, from_status, to_status, \
    actor_user_id, payload, created_at";

pub struct AssetEventRepo;

impl AssetEventRepo {
    /// Append an event. Events are never updated or deleted.
    pub async fn insert(pool: &PgPool, event: &NewAssetEvent) -> Result<AssetEvent, sqlx::Error> {
        let sql = format!(
            "INSERT INTO asset_events (\
                asset_id, tenant_id, event_type, from_status, to_status, \
                actor_user_id, payload\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, AssetEvent>(&sql)
            .bind(event.asset_id)
            .bind(event.tenant_id)
            .bind(event.event_type)
            .bind(event.from_status.as_deref())
            .bind(event.to_status.as_deref())
            .bind(event.actor_user_id)
            .bind(&event.payload)
            .fetch_one(pool)
            .await
    }

    /// List an asset's events, newest first.
    pub async fn list_by_asset(
        pool: &PgPool,
        tenant_id: DbId,
        asset_id: DbId,
    ) -> Result<Vec<AssetEvent>, sqlx::Error> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM asset_events \
             WHERE tenant_id = $1 AND asset_id = $2 \
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, AssetEvent>(&sql)
            .bind(tenant_id)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }
}
