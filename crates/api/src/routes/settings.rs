//! Route definitions for the settings document.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes.
///
/// ```text
/// GET /settings  -> get_settings
/// PUT /settings  -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(settings::get_settings).put(settings::update_settings),
    )
}
