pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use self::state::AppState;
use std::sync::Arc;

pub use rest::{
    get_chapter_handler, get_course_handler, list_courses_handler, rate_chapter_handler,
    sorted_chapters_handler,
};

/// Builds the API router. Shared between the server binary and the
/// integration tests so both exercise the same routing table.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/courses", get(list_courses_handler))
        .route("/courses/sorted-chapters", get(sorted_chapters_handler))
        .route("/courses/{id}", get(get_course_handler))
        .route(
            "/courses/{id}/chapters/{chapter_id}",
            get(get_chapter_handler),
        )
        .route(
            "/courses/{id}/chapters/{chapter_id}/rate",
            post(rate_chapter_handler),
        )
        .with_state(app_state)
}
