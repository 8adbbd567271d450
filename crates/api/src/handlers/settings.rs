//! Handlers for the singleton settings document.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use overlay_core::settings::{self, SettingsPayload};

use crate::error::{AppError, AppResult};
use crate::extract::{self, JsonBody};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/settings
///
/// Return the settings document, creating it with defaults on first read.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stored = match state.settings.find_first().await? {
        Some(stored) => stored,
        None => {
            let document = settings::normalize_for_create(None)?;
            let stored = state.settings.insert(document).await?;
            tracing::info!(settings_id = %stored.id, "Default settings created");
            stored
        }
    };

    Ok(Json(ApiResponse::ok(settings::serialize(Some(&stored)))))
}

/// PUT /api/settings
///
/// Apply the payload to the settings document, creating it if absent.
pub async fn update_settings(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SettingsPayload>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(extract::no_data());
    }

    let stored = match state.settings.find_first().await? {
        Some(mut stored) => {
            stored.document = settings::merge_for_update(stored.document, &input)?;
            if !state.settings.replace(stored.id, &stored.document).await? {
                return Err(AppError::InternalError(format!(
                    "Settings document {} vanished during update",
                    stored.id
                )));
            }
            stored
        }
        None => {
            let document = settings::normalize_for_create(Some(&input))?;
            state.settings.insert(document).await?
        }
    };

    tracing::info!(
        settings_id = %stored.id,
        volume = stored.document.volume,
        auto_play = stored.document.auto_play,
        overlays_enabled = stored.document.overlays_enabled,
        "Settings updated",
    );

    Ok(Json(
        ApiResponse::ok(settings::serialize(Some(&stored)))
            .with_message("Settings updated successfully"),
    ))
}
