//! Repository for tenant-scoped reference entities (models, vendors,
//! locations).
//!
//! Resolution is case-insensitive on name and never creates an entity:
//! the reconciler drops unresolved names to null by design.

use sqlx::PgPool;

use fleetdesk_core::types::DbId;

use crate::models::reference::{ReferenceEntity, ReferenceKind};

/// Column list shared by all three reference tables.
const REFERENCE_COLUMNS: &str = "id, tenant_id, name, created_at, updated_at";

pub struct ReferenceRepo;

impl ReferenceRepo {
    /// Resolve a free-text name to an entity id within a tenant.
    ///
    /// Matches `lower(name) = lower($name)` and returns the first match by
    /// id, or `None` when no entity exists.
    pub async fn resolve(
        pool: &PgPool,
        tenant_id: DbId,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let sql = format!(
            "SELECT id FROM {} \
             WHERE tenant_id = $1 AND lower(name) = lower($2) \
             ORDER BY id LIMIT 1",
            kind.table()
        );
        sqlx::query_scalar::<_, DbId>(&sql)
            .bind(tenant_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Explicit create flow for a reference entity.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<ReferenceEntity, sqlx::Error> {
        let sql = format!(
            "INSERT INTO {} (tenant_id, name) VALUES ($1, $2) \
             RETURNING {REFERENCE_COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, ReferenceEntity>(&sql)
            .bind(tenant_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// List a tenant's reference entities of one kind, by name.
    pub async fn list(
        pool: &PgPool,
        tenant_id: DbId,
        kind: ReferenceKind,
    ) -> Result<Vec<ReferenceEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT {REFERENCE_COLUMNS} FROM {} \
             WHERE tenant_id = $1 ORDER BY lower(name)",
            kind.table()
        );
        sqlx::query_as::<_, ReferenceEntity>(&sql)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }
}
