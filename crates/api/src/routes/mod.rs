pub mod assets;
pub mod health;
pub mod imports;
pub mod references;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /imports                    execute batch
/// /imports/preview            parse + suggest mapping
/// /imports/jobs               list batch ledgers
///
/// /assets                     list, create
/// /assets/warranty-expiring   warranty report
/// /assets/{id}                get
/// /assets/{id}/status         change status (audited)
/// /assets/{id}/assign         assign to user
/// /assets/{id}/unassign       clear assignment
/// /assets/{id}/events         audit trail
///
/// /models                     list, create
/// /vendors                    list, create
/// /locations                  list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(imports::router())
        .merge(assets::router())
        .merge(references::router())
}
