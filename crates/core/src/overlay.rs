//! Overlay documents: validation, defaults and partial-update merging.
//!
//! An overlay is a text or image element positioned over the video stream.
//! Writes arrive as an [`OverlayPayload`] where every field is optional;
//! [`normalize_for_create`] fills the gaps with defaults and
//! [`merge_for_update`] overwrites only what the payload mentions.
//!
//! Geometry, `fontSize` and `opacity` are kept as [`Number`] so a value
//! comes back in the form it was sent: `30` stays `30`, `0.5` stays `0.5`.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::CoreError;
use crate::types::{iso8601, now_not_before, Stored, Timestamp};

/// Collection name overlays are stored under.
pub const COLLECTION: &str = "overlays";

/// Plain text rendered with the overlay's style.
pub const TYPE_TEXT: &str = "text";

/// An image referenced by URL or data URI in `content`.
pub const TYPE_IMAGE: &str = "image";

/// All valid overlay types.
pub const VALID_OVERLAY_TYPES: &[&str] = &[TYPE_TEXT, TYPE_IMAGE];

pub const DEFAULT_X: i64 = 50;
pub const DEFAULT_Y: i64 = 50;
pub const DEFAULT_WIDTH: i64 = 200;
pub const DEFAULT_HEIGHT: i64 = 100;
pub const DEFAULT_FONT_SIZE: i64 = 24;
pub const DEFAULT_FONT_COLOR: &str = "#ffffff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "transparent";
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_WEIGHT: &str = "normal";
pub const DEFAULT_OPACITY: i64 = 1;
pub const DEFAULT_Z_INDEX: i64 = 1;

// ---------------------------------------------------------------------------
// Stored document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Text,
    Image,
}

impl OverlayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayKind::Text => TYPE_TEXT,
            OverlayKind::Image => TYPE_IMAGE,
        }
    }

    /// Validate an overlay type string against [`VALID_OVERLAY_TYPES`].
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            TYPE_TEXT => Ok(OverlayKind::Text),
            TYPE_IMAGE => Ok(OverlayKind::Image),
            _ => Err(CoreError::Validation(format!(
                "Invalid overlay type '{value}'. Must be one of: {}",
                VALID_OVERLAY_TYPES.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: Number,
    pub y: Number,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: DEFAULT_X.into(),
            y: DEFAULT_Y.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: Number,
    pub height: Number,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH.into(),
            height: DEFAULT_HEIGHT.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub font_size: Number,
    pub font_color: String,
    pub background_color: String,
    pub font_family: String,
    pub font_weight: String,
    pub opacity: Number,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE.into(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT.to_string(),
            opacity: DEFAULT_OPACITY.into(),
        }
    }
}

/// An overlay as persisted in the document store (without its id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub content: String,
    pub position: Position,
    pub size: Size,
    pub style: Style,
    pub visible: bool,
    pub z_index: i64,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PositionPatch {
    pub x: Option<Number>,
    pub y: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SizePatch {
    pub width: Option<Number>,
    pub height: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylePatch {
    pub font_size: Option<Number>,
    pub font_color: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub opacity: Option<Number>,
}

/// Request payload for creating or partially updating an overlay.
///
/// Every field is optional. `type` stays a raw string here so an unknown
/// value surfaces as a validation error naming the allowed set rather than
/// as a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayPayload {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
    pub position: Option<PositionPatch>,
    pub size: Option<SizePatch>,
    pub style: Option<StylePatch>,
    pub visible: Option<bool>,
    pub z_index: Option<i64>,
}

impl PositionPatch {
    fn apply(&self, target: &mut Position) {
        if let Some(x) = &self.x {
            target.x.clone_from(x);
        }
        if let Some(y) = &self.y {
            target.y.clone_from(y);
        }
    }
}

impl SizePatch {
    fn apply(&self, target: &mut Size) {
        if let Some(width) = &self.width {
            target.width.clone_from(width);
        }
        if let Some(height) = &self.height {
            target.height.clone_from(height);
        }
    }
}

impl StylePatch {
    fn apply(&self, target: &mut Style) {
        if let Some(font_size) = &self.font_size {
            target.font_size.clone_from(font_size);
        }
        if let Some(font_color) = &self.font_color {
            target.font_color.clone_from(font_color);
        }
        if let Some(background_color) = &self.background_color {
            target.background_color.clone_from(background_color);
        }
        if let Some(font_family) = &self.font_family {
            target.font_family.clone_from(font_family);
        }
        if let Some(font_weight) = &self.font_weight {
            target.font_weight.clone_from(font_weight);
        }
        if let Some(opacity) = &self.opacity {
            target.opacity.clone_from(opacity);
        }
    }
}

impl OverlayPayload {
    /// True when the payload mentions no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field of `target` that this payload mentions.
    ///
    /// Nested objects are merged key by key. `type` and timestamps are the
    /// caller's concern.
    fn apply(&self, target: &mut Overlay) {
        if let Some(content) = &self.content {
            target.content.clone_from(content);
        }
        if let Some(position) = &self.position {
            position.apply(&mut target.position);
        }
        if let Some(size) = &self.size {
            size.apply(&mut target.size);
        }
        if let Some(style) = &self.style {
            style.apply(&mut target.style);
        }
        if let Some(visible) = self.visible {
            target.visible = visible;
        }
        if let Some(z_index) = self.z_index {
            target.z_index = z_index;
        }
    }
}

// ---------------------------------------------------------------------------
// Manager operations
// ---------------------------------------------------------------------------

/// Build a fully-populated overlay from a create payload.
///
/// A missing `type` defaults to `text`; a present one must be valid.
pub fn normalize_for_create(input: &OverlayPayload) -> Result<Overlay, CoreError> {
    let kind = match input.kind.as_deref() {
        Some(kind) => OverlayKind::parse(kind)?,
        None => OverlayKind::Text,
    };

    let now = chrono::Utc::now();
    let mut overlay = Overlay {
        kind,
        content: String::new(),
        position: Position::default(),
        size: Size::default(),
        style: Style::default(),
        visible: true,
        z_index: DEFAULT_Z_INDEX,
        created_at: Some(now),
        updated_at: Some(now),
    };
    input.apply(&mut overlay);

    Ok(overlay)
}

/// Merge a partial update into a stored overlay.
///
/// The type is validated before anything is applied, so an invalid payload
/// yields an error and no partially-updated record. `updated_at` is always
/// refreshed; `created_at` is left alone.
pub fn merge_for_update(mut existing: Overlay, input: &OverlayPayload) -> Result<Overlay, CoreError> {
    let kind = input.kind.as_deref().map(OverlayKind::parse).transpose()?;

    if let Some(kind) = kind {
        existing.kind = kind;
    }
    input.apply(&mut existing);
    existing.updated_at = Some(now_not_before(existing.updated_at));

    Ok(existing)
}

/// External representation of an overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub content: String,
    pub position: Position,
    pub size: Size,
    pub style: Style,
    pub visible: bool,
    pub z_index: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<&Stored<Overlay>> for OverlayView {
    fn from(record: &Stored<Overlay>) -> Self {
        let Stored { id, document } = record;
        OverlayView {
            id: id.to_string(),
            kind: document.kind,
            content: document.content.clone(),
            position: document.position.clone(),
            size: document.size.clone(),
            style: document.style.clone(),
            visible: document.visible,
            z_index: document.z_index,
            created_at: document.created_at.as_ref().map(iso8601),
            updated_at: document.updated_at.as_ref().map(iso8601),
        }
    }
}

/// Render a stored overlay for the API. `None` in, `None` out.
pub fn serialize(record: Option<&Stored<Overlay>>) -> Option<OverlayView> {
    record.map(OverlayView::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentId;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> OverlayPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn create_applies_every_default() {
        let overlay = normalize_for_create(&payload(json!({"type": "text"}))).unwrap();

        assert_eq!(overlay.kind, OverlayKind::Text);
        assert_eq!(overlay.content, "");
        assert_eq!(serde_json::to_value(&overlay.position).unwrap(), json!({"x": 50, "y": 50}));
        assert_eq!(serde_json::to_value(&overlay.size).unwrap(), json!({"width": 200, "height": 100}));
        assert_eq!(overlay.style, Style::default());
        assert_eq!(overlay.style.font_color, "#ffffff");
        assert_eq!(overlay.style.background_color, "transparent");
        assert_eq!(overlay.style.font_family, "Arial");
        assert_eq!(overlay.style.font_weight, "normal");
        assert_eq!(overlay.style.opacity, Number::from(1));
        assert!(overlay.visible);
        assert_eq!(overlay.z_index, 1);
    }

    #[test]
    fn create_sets_equal_timestamps() {
        let overlay = normalize_for_create(&OverlayPayload::default()).unwrap();
        assert!(overlay.created_at.is_some());
        assert_eq!(overlay.created_at, overlay.updated_at);
    }

    #[test]
    fn create_without_type_defaults_to_text() {
        let overlay = normalize_for_create(&OverlayPayload::default()).unwrap();
        assert_eq!(overlay.kind, OverlayKind::Text);
    }

    #[test]
    fn create_fills_missing_nested_keys() {
        let overlay = normalize_for_create(&payload(json!({
            "type": "image",
            "content": "https://example.com/logo.png",
            "position": {"x": 10},
            "style": {"opacity": 0.5}
        })))
        .unwrap();

        assert_eq!(overlay.kind, OverlayKind::Image);
        assert_eq!(overlay.content, "https://example.com/logo.png");
        assert_eq!(serde_json::to_value(&overlay.position).unwrap(), json!({"x": 10, "y": 50}));
        assert_eq!(overlay.style.opacity.as_f64(), Some(0.5));
        assert_eq!(overlay.style.font_size, Number::from(24));
    }

    #[test]
    fn create_rejects_unknown_type() {
        for kind in ["video", "", "TEXT", "Image"] {
            let result = normalize_for_create(&payload(json!({"type": kind})));
            assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("text, image"));
        }
    }

    fn existing() -> Overlay {
        let mut overlay = normalize_for_create(&payload(json!({
            "content": "Hello",
            "style": {"fontColor": "#ff0000"}
        })))
        .unwrap();
        overlay.updated_at = overlay.created_at.map(|t| t - chrono::Duration::seconds(5));
        overlay.created_at = overlay.updated_at;
        overlay
    }

    #[test]
    fn update_merges_nested_style_keys() {
        let merged = merge_for_update(existing(), &payload(json!({"style": {"fontSize": 40}}))).unwrap();

        assert_eq!(merged.style.font_size, Number::from(40));
        assert_eq!(merged.style.font_color, "#ff0000");
        assert_eq!(merged.style.font_family, "Arial");
    }

    #[test]
    fn update_merges_position_keys() {
        let merged = merge_for_update(existing(), &payload(json!({"position": {"x": 10}}))).unwrap();
        assert_eq!(serde_json::to_value(&merged.position).unwrap(), json!({"x": 10, "y": 50}));
    }

    #[test]
    fn numbers_keep_the_form_they_were_sent_in() {
        let overlay = normalize_for_create(&payload(json!({
            "position": {"x": 30, "y": 12.5},
            "size": {"width": 320.0},
            "style": {"fontSize": 18, "opacity": 0.75}
        })))
        .unwrap();

        let json = serde_json::to_string(&overlay.position).unwrap();
        assert_eq!(json, r#"{"x":30,"y":12.5}"#);
        assert_eq!(serde_json::to_string(&overlay.size.width).unwrap(), "320.0");
        assert_eq!(serde_json::to_string(&overlay.style.font_size).unwrap(), "18");
        assert_eq!(serde_json::to_string(&overlay.style.opacity).unwrap(), "0.75");
    }

    #[test]
    fn payload_emptiness() {
        assert!(OverlayPayload::default().is_empty());
        assert!(payload(json!({})).is_empty());
        assert!(payload(json!({"content": null})).is_empty());
        assert!(!payload(json!({"visible": false})).is_empty());
        assert!(!payload(json!({"style": {}})).is_empty());
    }

    #[test]
    fn update_leaves_absent_fields_untouched() {
        let before = existing();
        let merged = merge_for_update(before.clone(), &payload(json!({"visible": false}))).unwrap();

        assert!(!merged.visible);
        assert_eq!(merged.content, before.content);
        assert_eq!(merged.kind, before.kind);
        assert_eq!(merged.size, before.size);
        assert_eq!(merged.z_index, before.z_index);
    }

    #[test]
    fn update_overwrites_scalars_and_type() {
        let merged = merge_for_update(
            existing(),
            &payload(json!({"type": "image", "content": "a.png", "zIndex": 7})),
        )
        .unwrap();

        assert_eq!(merged.kind, OverlayKind::Image);
        assert_eq!(merged.content, "a.png");
        assert_eq!(merged.z_index, 7);
    }

    #[test]
    fn update_rejects_invalid_type() {
        let result = merge_for_update(existing(), &payload(json!({"type": "gif", "content": "x"})));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_refreshes_updated_at_but_not_created_at() {
        let before = existing();
        let merged = merge_for_update(before.clone(), &OverlayPayload::default()).unwrap();

        assert_eq!(merged.created_at, before.created_at);
        assert!(merged.updated_at > before.updated_at);
    }

    #[test]
    fn serialize_none_is_none() {
        assert!(serialize(None).is_none());
    }

    #[test]
    fn serialize_renders_id_and_timestamps() {
        let document = normalize_for_create(&payload(json!({"content": "Hi", "zIndex": 3}))).unwrap();
        let stored = Stored {
            id: DocumentId::generate(),
            document,
        };

        let view = serialize(Some(&stored)).unwrap();
        assert_eq!(view.id, stored.id.to_string());
        assert_eq!(view.content, "Hi");
        assert_eq!(view.z_index, 3);

        let created = view.created_at.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&created).is_ok());
    }

    #[test]
    fn serialize_missing_timestamps_as_null() {
        let mut document = normalize_for_create(&OverlayPayload::default()).unwrap();
        document.created_at = None;
        document.updated_at = None;
        let stored = Stored {
            id: DocumentId::generate(),
            document,
        };

        let json = serde_json::to_value(serialize(Some(&stored))).unwrap();
        assert!(json["createdAt"].is_null());
        assert!(json["updatedAt"].is_null());
        assert_eq!(json["type"], "text");
        assert_eq!(json["style"]["fontColor"], "#ffffff");
    }
}
