use std::sync::Arc;

use overlay_core::overlay::{self, Overlay};
use overlay_core::settings::{self, Settings};
use overlay_db::{Collection, DocumentStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backing document store.
    pub store: Arc<dyn DocumentStore>,
    /// Overlay documents.
    pub overlays: Collection<Overlay>,
    /// The singleton settings document.
    pub settings: Collection<Settings>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: ServerConfig) -> Self {
        Self {
            overlays: Collection::new(Arc::clone(&store), overlay::COLLECTION),
            settings: Collection::new(Arc::clone(&store), settings::COLLECTION),
            store,
            config: Arc::new(config),
        }
    }
}
