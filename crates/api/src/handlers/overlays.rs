//! Handlers for overlay documents.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use overlay_core::error::CoreError;
use overlay_core::overlay::{self, OverlayPayload, OverlayView};
use overlay_core::types::DocumentId;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{self, JsonBody};
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: DocumentId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Overlay",
        id: id.to_string(),
    })
}

/// GET /api/overlays
///
/// List all overlays in insertion order.
pub async fn list_overlays(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let overlays: Vec<OverlayView> = state
        .overlays
        .find_all()
        .await?
        .iter()
        .map(OverlayView::from)
        .collect();
    let count = overlays.len();

    Ok(Json(ApiResponse::ok(overlays).with_count(count)))
}

/// POST /api/overlays
///
/// Create an overlay, filling every omitted field with its default.
pub async fn create_overlay(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<OverlayPayload>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(extract::no_data());
    }

    let document = overlay::normalize_for_create(&input)?;
    let stored = state.overlays.insert(document).await?;

    tracing::info!(
        overlay_id = %stored.id,
        kind = stored.document.kind.as_str(),
        "Overlay created",
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(OverlayView::from(&stored)).with_message("Overlay created successfully")),
    ))
}

/// GET /api/overlays/{id}
pub async fn get_overlay(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id: DocumentId = id.parse()?;
    let stored = state.overlays.find_by_id(id).await?;
    let view = overlay::serialize(stored.as_ref()).ok_or_else(|| not_found(id))?;

    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/overlays/{id}
///
/// Partially update an overlay. Nested `position`, `size` and `style`
/// objects are merged key by key. The id is checked before the body.
pub async fn update_overlay(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<JsonBody<OverlayPayload>, AppError>,
) -> AppResult<impl IntoResponse> {
    let id: DocumentId = id.parse()?;
    let JsonBody(input) = body?;
    if input.is_empty() {
        return Err(extract::no_data());
    }

    let mut stored = state
        .overlays
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    stored.document = overlay::merge_for_update(stored.document, &input)?;

    if !state.overlays.replace(id, &stored.document).await? {
        return Err(not_found(id));
    }

    tracing::info!(overlay_id = %id, "Overlay updated");

    Ok(Json(
        ApiResponse::ok(OverlayView::from(&stored)).with_message("Overlay updated successfully"),
    ))
}

/// DELETE /api/overlays/{id}
pub async fn delete_overlay(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id: DocumentId = id.parse()?;

    if !state.overlays.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(overlay_id = %id, "Overlay deleted");

    Ok(Json(
        ApiResponse::ok(json!({ "id": id.to_string() })).with_message("Overlay deleted successfully"),
    ))
}
