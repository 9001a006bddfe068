//! Route definitions for assets.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/assets",
            get(assets::list_assets).post(assets::create_asset),
        )
        .route("/assets/warranty-expiring", get(assets::warranty_expiring))
        .route("/assets/{id}", get(assets::get_asset))
        .route("/assets/{id}/status", post(assets::change_status))
        .route("/assets/{id}/assign", post(assets::assign_asset))
        .route("/assets/{id}/unassign", post(assets::unassign_asset))
        .route("/assets/{id}/events", get(assets::list_asset_events))
}
