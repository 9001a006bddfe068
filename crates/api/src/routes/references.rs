//! Route definitions for reference entities.

use axum::routing::get;
use axum::Router;

use crate::handlers::references;
use crate::state::AppState;

/// Reference-entity routes: `/models`, `/vendors`, `/locations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/models",
            get(references::list_models).post(references::create_model),
        )
        .route(
            "/vendors",
            get(references::list_vendors).post(references::create_vendor),
        )
        .route(
            "/locations",
            get(references::list_locations).post(references::create_location),
        )
}
