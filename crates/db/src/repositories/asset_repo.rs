//! Repository for the `assets` table.
//!
//! Carries the reconciler's storage primitives: the tag-or-serial soft
//! identity match, the imported-row insert, and the COALESCE field merge
//! that never clobbers stored values with absent ones.

use sqlx::PgPool;

use fleetdesk_core::lifecycle::DEFAULT_STATUS;
use fleetdesk_core::reconcile::AssetRowPatch;
use fleetdesk_core::types::DbId;

use crate::models::asset::{Asset, CreateAsset};

/// Column list for `assets` queries.
const ASSET_COLUMNS: &str = "\
    id, tenant_id, tag, serial, model_id, vendor_id, location_id, \
    status, owner_user_id, cost, purchase_date, warranty_end, \
    po_number, notes, created_at, updated_at";

/// Default page size for asset listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for asset listing.
const MAX_LIMIT: i64 = 100;

/// Resolved reference ids accompanying an import row.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedRefs {
    pub model_id: Option<DbId>,
    pub vendor_id: Option<DbId>,
    pub location_id: Option<DbId>,
}

pub struct AssetRepo;

impl AssetRepo {
    /// Find an asset by ID within a tenant.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let sql = format!("SELECT {ASSET_COLUMNS} FROM assets WHERE tenant_id = $1 AND id = $2");
        sqlx::query_as::<_, Asset>(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assets for a tenant, newest first, bounded by `limit`.
    pub async fn list(
        pool: &PgPool,
        tenant_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let sql = format!(
            "SELECT {ASSET_COLUMNS} FROM assets \
             WHERE tenant_id = $1 ORDER BY id DESC LIMIT $2"
        );
        sqlx::query_as::<_, Asset>(&sql)
            .bind(tenant_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Soft-identity match: find the first asset in the tenant whose tag or
    /// serial equals the given values.
    ///
    /// Only predicates for present values are included. With neither tag
    /// nor serial, no match is attempted and `None` is returned.
    pub async fn find_by_tag_or_serial(
        pool: &PgPool,
        tenant_id: DbId,
        tag: Option<&str>,
        serial: Option<&str>,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let mut predicates = Vec::new();
        let mut next_param = 2;
        if tag.is_some() {
            predicates.push(format!("tag = ${next_param}"));
            next_param += 1;
        }
        if serial.is_some() {
            predicates.push(format!("serial = ${next_param}"));
        }
        if predicates.is_empty() {
            return Ok(None);
        }

        let sql = format!(
            "SELECT {ASSET_COLUMNS} FROM assets \
             WHERE tenant_id = $1 AND ({}) \
             ORDER BY id LIMIT 1",
            predicates.join(" OR ")
        );

        let mut query = sqlx::query_as::<_, Asset>(&sql).bind(tenant_id);
        if let Some(tag) = tag {
            query = query.bind(tag);
        }
        if let Some(serial) = serial {
            query = query.bind(serial);
        }
        query.fetch_optional(pool).await
    }

    /// Insert a new asset from an import row.
    ///
    /// The status is taken verbatim from the row, defaulting to `in_stock`
    /// when absent. Date strings are cast by the database; a bad date
    /// surfaces as a row-level failure in the engine.
    pub async fn insert_imported(
        pool: &PgPool,
        tenant_id: DbId,
        patch: &AssetRowPatch,
        refs: ResolvedRefs,
    ) -> Result<Asset, sqlx::Error> {
        let status = patch.status.as_deref().unwrap_or(DEFAULT_STATUS.as_str());
        let sql = format!(
            "INSERT INTO assets (\
                tenant_id, tag, serial, model_id, vendor_id, location_id, \
                status, cost, purchase_date, warranty_end, po_number, notes\
             ) VALUES (\
                $1, $2, $3, $4, $5, $6, $7, $8, \
                ($9::text)::date, ($10::text)::date, $11, $12\
             ) RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&sql)
            .bind(tenant_id)
            .bind(patch.tag.as_deref())
            .bind(patch.serial.as_deref())
            .bind(refs.model_id)
            .bind(refs.vendor_id)
            .bind(refs.location_id)
            .bind(status)
            .bind(patch.cost)
            .bind(patch.purchase_date.as_deref())
            .bind(patch.warranty_end.as_deref())
            .bind(patch.po_number.as_deref())
            .bind(patch.notes.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Merge an import row into an existing asset.
    ///
    /// Every non-identity field uses `COALESCE(new, existing)`: a present
    /// value overwrites, an absent one preserves the stored value. Identity
    /// fields (tag, serial) are never touched. `updated_at` is always
    /// refreshed.
    pub async fn merge_import_fields(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        patch: &AssetRowPatch,
        refs: ResolvedRefs,
    ) -> Result<Asset, sqlx::Error> {
        let sql = format!(
            "UPDATE assets SET \
                model_id = COALESCE($3, model_id), \
                vendor_id = COALESCE($4, vendor_id), \
                location_id = COALESCE($5, location_id), \
                status = COALESCE($6, status), \
                cost = COALESCE($7, cost), \
                purchase_date = COALESCE(($8::text)::date, purchase_date), \
                warranty_end = COALESCE(($9::text)::date, warranty_end), \
                po_number = COALESCE($10, po_number), \
                notes = COALESCE($11, notes), \
                updated_at = NOW() \
             WHERE tenant_id = $1 AND id = $2 \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&sql)
            .bind(tenant_id)
            .bind(id)
            .bind(refs.model_id)
            .bind(refs.vendor_id)
            .bind(refs.location_id)
            .bind(patch.status.as_deref())
            .bind(patch.cost)
            .bind(patch.purchase_date.as_deref())
            .bind(patch.warranty_end.as_deref())
            .bind(patch.po_number.as_deref())
            .bind(patch.notes.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Create an asset via the manual create flow. The caller has already
    /// validated and defaulted `status`.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateAsset,
        status: &str,
    ) -> Result<Asset, sqlx::Error> {
        let sql = format!(
            "INSERT INTO assets (\
                tenant_id, tag, serial, model_id, vendor_id, location_id, \
                status, owner_user_id, cost, purchase_date, warranty_end, \
                po_number, notes\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&sql)
            .bind(tenant_id)
            .bind(input.tag.as_deref())
            .bind(input.serial.as_deref())
            .bind(input.model_id)
            .bind(input.vendor_id)
            .bind(input.location_id)
            .bind(status)
            .bind(input.owner_user_id)
            .bind(input.cost)
            .bind(input.purchase_date)
            .bind(input.warranty_end)
            .bind(input.po_number.as_deref())
            .bind(input.notes.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Persist a validated status change and refresh `updated_at`.
    pub async fn update_status(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        status: &str,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let sql = format!(
            "UPDATE assets SET status = $3, updated_at = NOW() \
             WHERE tenant_id = $1 AND id = $2 \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&sql)
            .bind(tenant_id)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the owning user.
    pub async fn set_owner(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        owner_user_id: Option<DbId>,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let sql = format!(
            "UPDATE assets SET owner_user_id = $3, updated_at = NOW() \
             WHERE tenant_id = $1 AND id = $2 \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&sql)
            .bind(tenant_id)
            .bind(id)
            .bind(owner_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Assets whose warranty expires within `within_days` days, ascending
    /// by `warranty_end`. Already-expired warranties are excluded.
    pub async fn list_warranty_expiring(
        pool: &PgPool,
        tenant_id: DbId,
        within_days: i32,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let sql = format!(
            "SELECT {ASSET_COLUMNS} FROM assets \
             WHERE tenant_id = $1 \
               AND warranty_end IS NOT NULL \
               AND warranty_end >= CURRENT_DATE \
               AND warranty_end <= CURRENT_DATE + $2 \
             ORDER BY warranty_end ASC"
        );
        sqlx::query_as::<_, Asset>(&sql)
            .bind(tenant_id)
            .bind(within_days)
            .fetch_all(pool)
            .await
    }
}
