//! Route definitions for the asset import pipeline.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::imports;
use crate::state::AppState;

/// Import routes mounted at `/imports`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/imports", post(imports::execute_import))
        .route("/imports/preview", post(imports::preview_import))
        .route("/imports/jobs", get(imports::list_import_jobs))
}
