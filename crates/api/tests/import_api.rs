//! HTTP-level integration tests for the `/imports` endpoints.
//!
//! Covers the preview/execute pipeline end to end: mapping suggestion,
//! create-vs-update reconciliation, within-batch dedup, partial failure,
//! batch ledger status, and tenant isolation.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_as, get_anonymous, post_json, post_json_as};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: POST /api/v1/imports/preview parses and suggests a mapping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_preview_suggests_mapping(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/imports/preview",
        json!({
            "raw_text": "Asset Tag,Serial Number,Manufacturer,Cost\nA-100,SN-1,Lenovo,1200\nA-101,SN-2,Dell,900"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(
        data["headers"],
        json!(["asset tag", "serial number", "manufacturer", "cost"])
    );
    assert_eq!(data["total_rows"], 2);
    assert_eq!(data["preview_rows"][0]["asset tag"], "A-100");
    assert_eq!(data["suggested_mapping"]["asset tag"], "tag");
    assert_eq!(data["suggested_mapping"]["serial number"], "serial");
    assert_eq!(data["suggested_mapping"]["cost"], "cost");
}

// ---------------------------------------------------------------------------
// Test: preview rejects input without a data row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_preview_rejects_header_only_input(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/imports/preview",
        json!({ "raw_text": "tag,serial\n" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "MALFORMED_INPUT");
}

// ---------------------------------------------------------------------------
// Test: execute creates then merges within a single batch
// ---------------------------------------------------------------------------

/// Two rows sharing a tag: the first creates the asset, the second must
/// observe it and merge. The later row's cost wins, and exactly one asset
/// exists afterwards.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_execute_dedups_within_batch(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/imports",
        json!({
            "source": "csv",
            "rows": [
                {"tag": "A1", "serial": "S1", "cost": "100"},
                {"tag": "A1", "cost": "150"}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["status"], "completed");
    assert_eq!(data["stats"]["total"], 2);
    assert_eq!(data["stats"]["created"], 1);
    assert_eq!(data["stats"]["updated"], 1);
    assert_eq!(data["stats"]["failed"], 0);
    assert!(data["errors"].as_array().unwrap().is_empty());

    let app = build_test_app(pool);
    let list = body_json(get(app, "/api/v1/assets").await).await;
    let assets = list["data"].as_array().unwrap();
    assert_eq!(assets.len(), 1, "both rows must land on one asset");
    assert_eq!(assets[0]["tag"], "A1");
    assert_eq!(assets[0]["serial"], "S1", "merge must not clear the serial");
    assert_eq!(assets[0]["cost"], 150.0);
}

// ---------------------------------------------------------------------------
// Test: re-running the same batch updates instead of duplicating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_execute_is_idempotent_on_rerun(pool: PgPool) {
    let batch = json!({
        "source": "csv",
        "rows": [
            {"tag": "A1", "model": "", "cost": "100"},
            {"serial": "S9", "notes": "spare"}
        ]
    });

    let first = body_json(
        post_json(build_test_app(pool.clone()), "/api/v1/imports", batch.clone()).await,
    )
    .await;
    assert_eq!(first["data"]["stats"]["created"], 2);

    let second =
        body_json(post_json(build_test_app(pool.clone()), "/api/v1/imports", batch).await).await;
    assert_eq!(second["data"]["stats"]["created"], 0);
    assert_eq!(second["data"]["stats"]["updated"], 2);

    let list = body_json(get(build_test_app(pool), "/api/v1/assets").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Test: a field mapping renames source columns before reconciliation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_execute_applies_field_mapping(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/imports",
        json!({
            "source": "csv",
            "rows": [{"asset tag": "A7", "price": "250"}],
            "field_mapping": {"asset tag": "tag", "price": "cost"}
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(get(build_test_app(pool), "/api/v1/assets").await).await;
    let assets = list["data"].as_array().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["tag"], "A7");
    assert_eq!(assets[0]["cost"], 250.0);
}

// ---------------------------------------------------------------------------
// Test: a bad row fails alone; the batch is still completed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_execute_isolates_row_failures(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/imports",
        json!({
            "source": "csv",
            "rows": [
                {"tag": "A1", "cost": "not-a-number"},
                {"tag": "A2", "cost": "80"}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["status"], "completed");
    assert_eq!(data["stats"]["created"], 1);
    assert_eq!(data["stats"]["failed"], 1);

    let errors = data["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].as_str().unwrap().starts_with("Row 1:"),
        "error must carry the 1-based row number, got {}",
        errors[0]
    );

    let list = body_json(get(build_test_app(pool), "/api/v1/assets").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: every row failing marks the job failed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_execute_all_rows_failed_marks_job_failed(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/imports",
        json!({
            "source": "csv",
            "rows": [
                {"tag": "A1", "cost": "abc"},
                {"tag": "A2", "cost": "xyz"}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "failed");
    assert_eq!(body["data"]["stats"]["failed"], 2);

    // The terminal status is persisted on the job row too.
    let jobs = body_json(get(build_test_app(pool), "/api/v1/imports/jobs").await).await;
    let job = &jobs["data"].as_array().unwrap()[0];
    assert_eq!(job["status"], "failed");
    assert_eq!(job["failed_count"], 2);
}

// ---------------------------------------------------------------------------
// Test: unresolved reference names null out and are counted
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_execute_drops_unresolved_references(pool: PgPool) {
    // Only "Lenovo" exists as a vendor.
    let created = post_json(
        build_test_app(pool.clone()),
        "/api/v1/vendors",
        json!({ "name": "Lenovo" }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/imports",
        json!({
            "source": "csv",
            "rows": [
                {"tag": "A1", "vendor": "lenovo"},
                {"tag": "A2", "vendor": "NoSuchCorp"}
            ]
        }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["stats"]["created"], 2);
    assert_eq!(body["data"]["stats"]["failed"], 0);
    assert_eq!(body["data"]["unresolved_references"], 1);

    let list = body_json(get(build_test_app(pool), "/api/v1/assets").await).await;
    let assets = list["data"].as_array().unwrap();
    let a1 = assets.iter().find(|a| a["tag"] == "A1").unwrap();
    let a2 = assets.iter().find(|a| a["tag"] == "A2").unwrap();
    assert!(a1["vendor_id"].is_i64(), "case-insensitive resolve must hit");
    assert!(a2["vendor_id"].is_null(), "unknown vendor must null out");
}

// ---------------------------------------------------------------------------
// Test: top-level request validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_execute_rejects_empty_rows(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/imports",
        json!({ "source": "csv", "rows": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_execute_requires_source(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/imports",
        json!({ "rows": [{"tag": "A1"}] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "source is required");
}

// ---------------------------------------------------------------------------
// Test: requests without a tenant header are rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_tenant_header_is_unauthorized(pool: PgPool) {
    let response = get_anonymous(build_test_app(pool), "/api/v1/imports/jobs").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: tenants never see each other's assets or jobs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_tenant_isolation(pool: PgPool) {
    let response = post_json_as(
        build_test_app(pool.clone()),
        "/api/v1/imports",
        json!({ "source": "csv", "rows": [{"tag": "A1"}] }),
        1,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let other_assets = body_json(get_as(build_test_app(pool.clone()), "/api/v1/assets", 2).await).await;
    assert!(other_assets["data"].as_array().unwrap().is_empty());

    let other_jobs =
        body_json(get_as(build_test_app(pool), "/api/v1/imports/jobs", 2).await).await;
    assert!(other_jobs["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: job listing records stats and source
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_job_listing_reflects_batch(pool: PgPool) {
    post_json(
        build_test_app(pool.clone()),
        "/api/v1/imports",
        json!({
            "source": "hr-feed",
            "rows": [{"tag": "A1"}, {"tag": "A2"}]
        }),
    )
    .await;

    let jobs = body_json(get(build_test_app(pool), "/api/v1/imports/jobs").await).await;
    let data = jobs["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["source"], "hr-feed");
    assert_eq!(data[0]["status"], "completed");
    assert_eq!(data[0]["total_rows"], 2);
    assert_eq!(data[0]["created_count"], 2);
    assert_eq!(data[0]["updated_count"], 0);
    assert!(!data[0]["completed_at"].is_null());
}
