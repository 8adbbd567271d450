//! Global stream settings: a single document per collection.
//!
//! The store holds at most one settings document; the first one found is
//! canonical and a fresh one is created lazily on first read. Volume is
//! clamped into `[0.0, 1.0]` on every write.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::error::CoreError;
use crate::types::{iso8601, now_not_before, Stored, Timestamp};

/// Collection name the settings document is stored under.
pub const COLLECTION: &str = "settings";

pub const DEFAULT_STREAM_URL: &str = "";
pub const DEFAULT_VOLUME: f64 = 0.8;
pub const DEFAULT_AUTO_PLAY: bool = false;
pub const DEFAULT_OVERLAYS_ENABLED: bool = true;

/// The settings document as persisted (without its id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub stream_url: String,
    pub volume: f64,
    pub auto_play: bool,
    pub overlays_enabled: bool,
    pub updated_at: Option<Timestamp>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stream_url: DEFAULT_STREAM_URL.to_string(),
            volume: DEFAULT_VOLUME,
            auto_play: DEFAULT_AUTO_PLAY,
            overlays_enabled: DEFAULT_OVERLAYS_ENABLED,
            updated_at: None,
        }
    }
}

/// Request payload for creating or updating the settings document.
///
/// `volume`, `autoPlay` and `overlaysEnabled` are kept as raw JSON values
/// and coerced when applied. An explicit `null` counts as present for those
/// three keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPayload {
    pub stream_url: Option<String>,
    #[serde(deserialize_with = "present")]
    pub volume: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub auto_play: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub overlays_enabled: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SettingsPayload {
    /// True when the payload mentions no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field of `target` this payload mentions.
    ///
    /// Coercion runs before any field is written so a bad `volume` leaves
    /// `target` as it was.
    fn apply(&self, target: &mut Settings) -> Result<(), CoreError> {
        let volume = self
            .volume
            .as_ref()
            .map(|v| coerce::to_f64(v, "volume").map(coerce::clamp_unit))
            .transpose()?;

        if let Some(stream_url) = &self.stream_url {
            target.stream_url.clone_from(stream_url);
        }
        if let Some(volume) = volume {
            target.volume = volume;
        }
        if let Some(auto_play) = &self.auto_play {
            target.auto_play = coerce::to_bool(auto_play);
        }
        if let Some(overlays_enabled) = &self.overlays_enabled {
            target.overlays_enabled = coerce::to_bool(overlays_enabled);
        }
        Ok(())
    }
}

/// Build a settings document from the defaults plus an optional payload.
pub fn normalize_for_create(input: Option<&SettingsPayload>) -> Result<Settings, CoreError> {
    let mut settings = Settings::default();
    if let Some(input) = input {
        input.apply(&mut settings)?;
    }
    settings.updated_at = Some(chrono::Utc::now());
    Ok(settings)
}

/// Apply a payload to an existing settings document and refresh `updated_at`.
pub fn merge_for_update(mut existing: Settings, input: &SettingsPayload) -> Result<Settings, CoreError> {
    input.apply(&mut existing)?;
    existing.updated_at = Some(now_not_before(existing.updated_at));
    Ok(existing)
}

/// External representation of the settings document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub id: Option<String>,
    pub stream_url: String,
    pub volume: f64,
    pub auto_play: bool,
    pub overlays_enabled: bool,
    pub updated_at: Option<String>,
}

impl From<&Stored<Settings>> for SettingsView {
    fn from(record: &Stored<Settings>) -> Self {
        let Stored { id, document } = record;
        SettingsView {
            id: Some(id.to_string()),
            stream_url: document.stream_url.clone(),
            volume: document.volume,
            auto_play: document.auto_play,
            overlays_enabled: document.overlays_enabled,
            updated_at: document.updated_at.as_ref().map(iso8601),
        }
    }
}

/// Render settings for the API.
///
/// With no record the defaults are returned, without id or timestamp.
pub fn serialize(record: Option<&Stored<Settings>>) -> SettingsView {
    match record {
        Some(record) => SettingsView::from(record),
        None => {
            let defaults = Settings::default();
            SettingsView {
                id: None,
                stream_url: defaults.stream_url,
                volume: defaults.volume,
                auto_play: defaults.auto_play,
                overlays_enabled: defaults.overlays_enabled,
                updated_at: None,
            }
        }
    }
}
