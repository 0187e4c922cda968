//! Server crate for the song recommendation engine.
//!
//! This crate owns the shared dataset snapshot and exposes the `recommend`
//! operation to the request-handling layer.

pub mod loader;
pub mod service;

pub use loader::{DatasetLoader, DirectoryLoader};
pub use service::RecommendationService;
