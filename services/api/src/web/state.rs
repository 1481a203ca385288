//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use course_catalog_core::ports::CourseStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CourseStore>,
}
