//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use course_catalog_core::{catalog, rating, Chapter, Course, PortError, RankedCourse, SortMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_courses_handler,
        sorted_chapters_handler,
        get_course_handler,
        get_chapter_handler,
        rate_chapter_handler,
    ),
    components(
        schemas(CourseResponse, ChapterResponse, RankedCourseResponse, RateRequest)
    ),
    tags(
        (name = "Courses", description = "API endpoints for the course catalog.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// A chapter as it appears on the wire.
#[derive(Serialize, ToSchema)]
pub struct ChapterResponse {
    id: Uuid,
    name: String,
    text: String,
    ratings: f64,
}

impl From<Chapter> for ChapterResponse {
    fn from(chapter: Chapter) -> Self {
        Self {
            id: chapter.id,
            name: chapter.name,
            text: chapter.text,
            ratings: chapter.ratings,
        }
    }
}

/// A course as it appears on the wire.
#[derive(Serialize, ToSchema)]
pub struct CourseResponse {
    id: Uuid,
    name: String,
    date: i64,
    description: String,
    domain: Vec<String>,
    chapters: Vec<ChapterResponse>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            date: course.date,
            description: course.description,
            domain: course.domain,
            chapters: course.chapters.into_iter().map(Into::into).collect(),
        }
    }
}

/// A course plus its transient maximum chapter rating. `maxRating` is null
/// for a course with no chapters, which sorts after every rankable course.
#[derive(Serialize, ToSchema)]
pub struct RankedCourseResponse {
    #[serde(flatten)]
    course: CourseResponse,
    #[serde(rename = "maxRating")]
    max_rating: Option<f64>,
}

impl From<RankedCourse> for RankedCourseResponse {
    fn from(ranked: RankedCourse) -> Self {
        Self {
            course: ranked.course.into(),
            max_rating: ranked.max_rating,
        }
    }
}

/// Query parameters accepted by the course listing.
#[derive(Deserialize, IntoParams)]
pub struct ListCoursesQuery {
    /// One of `alphabetical`, `date`, `rating`. Anything else lists in
    /// storage order.
    sort: Option<String>,
    /// Only return courses whose domain list contains this value.
    domain: Option<String>,
}

/// The body of a rating submission.
#[derive(Deserialize, ToSchema)]
pub struct RateRequest {
    /// The new rating; replaces the chapter's current value.
    rating: f64,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Maps a port error to an HTTP outcome. Not-found goes to the caller as-is;
/// storage failures are logged and surfaced as a plain 500.
fn port_error_to_http(err: PortError) -> (StatusCode, String) {
    match err {
        PortError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        PortError::Unexpected(msg) => {
            error!("Storage failure: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
    }
}

/// List courses, optionally filtered by domain and sorted.
///
/// With `sort=rating` every course carries a transient `maxRating` field
/// computed from its current chapters.
#[utoipa::path(
    get,
    path = "/courses",
    params(ListCoursesQuery),
    responses(
        (status = 200, description = "A list of courses", body = [CourseResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn list_courses_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ListCoursesQuery>,
) -> Result<Response, (StatusCode, String)> {
    let domain = params.domain.as_deref();
    let sort = SortMode::parse(params.sort.as_deref());

    if sort == SortMode::Rating {
        let ranked = catalog::list_by_rating(app_state.store.as_ref(), domain)
            .await
            .map_err(port_error_to_http)?;
        let body: Vec<RankedCourseResponse> = ranked.into_iter().map(Into::into).collect();
        return Ok(Json(body).into_response());
    }

    let courses = catalog::list(app_state.store.as_ref(), domain, sort)
        .await
        .map_err(port_error_to_http)?;
    let body: Vec<CourseResponse> = courses.into_iter().map(Into::into).collect();
    Ok(Json(body).into_response())
}

/// List all courses with each course's chapters sorted by rating, descending.
///
/// A read-only view: the stored chapter order is never changed.
#[utoipa::path(
    get,
    path = "/courses/sorted-chapters",
    responses(
        (status = 200, description = "Courses with chapters sorted by rating", body = [CourseResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn sorted_chapters_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<CourseResponse>>, (StatusCode, String)> {
    let courses = catalog::list_with_sorted_chapters(app_state.store.as_ref())
        .await
        .map_err(port_error_to_http)?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get one course by id.
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "The ID of the course")),
    responses(
        (status = 200, description = "Course details", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_handler(
    State(app_state): State<Arc<AppState>>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseResponse>, (StatusCode, String)> {
    let course = catalog::course(app_state.store.as_ref(), course_id)
        .await
        .map_err(port_error_to_http)?;
    Ok(Json(course.into()))
}

/// Get one chapter of a course.
#[utoipa::path(
    get,
    path = "/courses/{id}/chapters/{chapter_id}",
    params(
        ("id" = Uuid, Path, description = "The ID of the course"),
        ("chapter_id" = Uuid, Path, description = "The ID of the chapter")
    ),
    responses(
        (status = 200, description = "Chapter details", body = ChapterResponse),
        (status = 404, description = "Course or chapter not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_chapter_handler(
    State(app_state): State<Arc<AppState>>,
    Path((course_id, chapter_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ChapterResponse>, (StatusCode, String)> {
    let chapter = catalog::chapter(app_state.store.as_ref(), course_id, chapter_id)
        .await
        .map_err(port_error_to_http)?;
    Ok(Json(chapter.into()))
}

/// Rate a chapter of a course.
///
/// Replaces the chapter's rating with the submitted value and returns the
/// full updated course. A missing course or chapter is a 404 and writes
/// nothing.
#[utoipa::path(
    post,
    path = "/courses/{id}/chapters/{chapter_id}/rate",
    params(
        ("id" = Uuid, Path, description = "The ID of the course"),
        ("chapter_id" = Uuid, Path, description = "The ID of the chapter")
    ),
    request_body = RateRequest,
    responses(
        (status = 200, description = "Chapter rated successfully", body = CourseResponse),
        (status = 404, description = "Course or chapter not found"),
        (status = 422, description = "Malformed rating payload"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn rate_chapter_handler(
    State(app_state): State<Arc<AppState>>,
    Path((course_id, chapter_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<RateRequest>,
) -> Result<Json<CourseResponse>, (StatusCode, String)> {
    let course = rating::rate(
        app_state.store.as_ref(),
        course_id,
        chapter_id,
        payload.rating,
    )
    .await
    .map_err(port_error_to_http)?;
    Ok(Json(course.into()))
}
