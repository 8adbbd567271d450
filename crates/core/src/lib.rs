//! Domain layer for the livestream overlay service.
//!
//! Holds the overlay and settings managers: pure functions that turn typed
//! request payloads into fully-populated documents, merge partial updates
//! and render the external views. Nothing in here touches storage or I/O.

pub mod coerce;
pub mod error;
pub mod overlay;
pub mod settings;
pub mod types;
