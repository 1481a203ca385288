//! crates/course_catalog_core/src/catalog.rs
//!
//! The Catalog Query Engine. Given the domain-filtered subset returned by the
//! storage collaborator, it computes derived ordering keys and applies the
//! requested sort policy. All sorts are stable: ties keep storage order.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::domain::{Chapter, Course, RankedCourse, SortMode};
use crate::ports::{CourseStore, PortError, PortResult};

/// Lists courses, optionally filtered by domain membership, ordered per the
/// sort mode. The filter itself is delegated to the store; the engine only
/// orders what comes back.
pub async fn list(
    store: &dyn CourseStore,
    domain: Option<&str>,
    sort: SortMode,
) -> PortResult<Vec<Course>> {
    if sort == SortMode::Rating {
        let ranked = list_by_rating(store, domain).await?;
        return Ok(ranked.into_iter().map(|r| r.course).collect());
    }

    let mut courses = store.find_courses(domain).await?;
    match sort {
        SortMode::None | SortMode::Rating => {}
        SortMode::Alphabetical => courses.sort_by(|a, b| a.name.cmp(&b.name)),
        // Canonical direction for the date ranking: most recent first.
        SortMode::Date => courses.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    Ok(courses)
}

/// Lists courses ordered by maximum chapter rating, descending. The key is
/// computed here from the current chapters, attached as a transient field,
/// and never written back. A course with no chapters has no key and sorts
/// after every rankable course.
pub async fn list_by_rating(
    store: &dyn CourseStore,
    domain: Option<&str>,
) -> PortResult<Vec<RankedCourse>> {
    let courses = store.find_courses(domain).await?;
    let mut ranked: Vec<RankedCourse> = courses
        .into_iter()
        .map(|course| RankedCourse {
            max_rating: course.max_rating(),
            course,
        })
        .collect();

    ranked.sort_by(|a, b| match (a.max_rating, b.max_rating) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    Ok(ranked)
}

/// An undefined (NaN) rating compares lower than any defined one.
fn rating_key(ratings: f64) -> f64 {
    if ratings.is_nan() {
        f64::NEG_INFINITY
    } else {
        ratings
    }
}

/// Returns a copy of the course with its chapters reordered by rating,
/// descending. The persisted chapter order is untouched; this only shapes
/// the returned representation. `total_cmp` keeps the comparator total, so
/// a NaN rating can never make it panic.
pub fn sorted_chapters(course: &Course) -> Course {
    let mut view = course.clone();
    view.chapters
        .sort_by(|a, b| rating_key(b.ratings).total_cmp(&rating_key(a.ratings)));
    view
}

/// The sorted-chapters view over the whole catalog.
pub async fn list_with_sorted_chapters(store: &dyn CourseStore) -> PortResult<Vec<Course>> {
    let courses = store.find_courses(None).await?;
    Ok(courses.iter().map(sorted_chapters).collect())
}

/// Straight course lookup, no derived fields attached.
pub async fn course(store: &dyn CourseStore, course_id: Uuid) -> PortResult<Course> {
    store.course_by_id(course_id).await
}

/// Looks up one chapter within a course. Misses on either id are `NotFound`.
pub async fn chapter(
    store: &dyn CourseStore,
    course_id: Uuid,
    chapter_id: Uuid,
) -> PortResult<Chapter> {
    let course = store.course_by_id(course_id).await?;
    course
        .chapters
        .into_iter()
        .find(|chapter| chapter.id == chapter_id)
        .ok_or_else(|| {
            PortError::NotFound(format!(
                "Chapter {} not found in course {}",
                chapter_id, course_id
            ))
        })
}
