pub mod health;
pub mod overlays;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                 service and store health
///
/// /overlays               list, create
/// /overlays/{id}          get, update, delete
///
/// /settings               get (created lazily), update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(overlays::router())
        .merge(settings::router())
}
