//! Route definitions for overlay documents.

use axum::routing::get;
use axum::Router;

use crate::handlers::overlays;
use crate::state::AppState;

/// Overlay routes.
///
/// ```text
/// GET    /overlays          -> list_overlays
/// POST   /overlays          -> create_overlay
/// GET    /overlays/{id}     -> get_overlay
/// PUT    /overlays/{id}     -> update_overlay
/// DELETE /overlays/{id}     -> delete_overlay
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/overlays",
            get(overlays::list_overlays).post(overlays::create_overlay),
        )
        .route(
            "/overlays/{id}",
            get(overlays::get_overlay)
                .put(overlays::update_overlay)
                .delete(overlays::delete_overlay),
        )
}
