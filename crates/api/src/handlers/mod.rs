//! Request handlers.
//!
//! Each submodule provides the async handler functions for one document
//! kind. Handlers run the managers from `overlay_core` between store reads
//! and writes, and map errors via [`AppError`](crate::error::AppError).

pub mod overlays;
pub mod settings;
