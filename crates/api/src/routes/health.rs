use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    /// Overall service status.
    pub status: &'static str,
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the document store is reachable.
    pub database: &'static str,
}

/// GET /api/health -- returns service and document store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = match state.store.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Document store health check failed");
            false
        }
    };

    Json(HealthResponse {
        success: store_healthy,
        status: if store_healthy { "ok" } else { "degraded" },
        message: "Overlay API is running",
        version: env!("CARGO_PKG_VERSION"),
        database: if store_healthy { "connected" } else { "unavailable" },
    })
}

/// Service index payload served at `/`.
#[derive(Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub overlays: &'static str,
    pub settings: &'static str,
}

/// GET / -- service name and endpoint index.
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "Livestream Overlay API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            health: "/api/health",
            overlays: "/api/overlays",
            settings: "/api/settings",
        },
    })
}

/// Health route, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Root-level index route.
pub fn index_router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
