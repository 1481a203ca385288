//! crates/course_catalog_core/src/rating.rs
//!
//! The Rating Mutator. Resolves a chapter within a course and replaces its
//! rating through the store's targeted update, so the write never spans the
//! whole course document and concurrent raters cannot lose each other's
//! updates.

use uuid::Uuid;

use crate::domain::Course;
use crate::ports::{CourseStore, PortError, PortResult};

/// Replaces the rating of one chapter and returns the full updated course.
///
/// Both ids are resolved before anything is written: a missing course or
/// chapter fails with `NotFound` and performs no write. The new value
/// overwrites the old one exactly, so repeating a call with the same value
/// is idempotent.
pub async fn rate(
    store: &dyn CourseStore,
    course_id: Uuid,
    chapter_id: Uuid,
    rating: f64,
) -> PortResult<Course> {
    let course = store.course_by_id(course_id).await?;
    if !course.chapters.iter().any(|c| c.id == chapter_id) {
        return Err(PortError::NotFound(format!(
            "Chapter {} not found in course {}",
            chapter_id, course_id
        )));
    }
    store.set_chapter_rating(course_id, chapter_id, rating).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::test_store::{chapter_with_rating, course_with, MemoryStore};

    #[tokio::test]
    async fn rate_replaces_the_value_and_returns_the_course() {
        let c1 = course_with(
            "C1",
            1,
            &[],
            vec![chapter_with_rating("a", 3.0), chapter_with_rating("b", 7.0)],
        );
        let course_id = c1.id;
        let chapter_id = c1.chapters[0].id;
        let store = MemoryStore::new(vec![c1]);

        let updated = rate(&store, course_id, chapter_id, -2.0).await.unwrap();
        assert_eq!(updated.chapters[0].ratings, -2.0);
        // The sibling chapter is untouched.
        assert_eq!(updated.chapters[1].ratings, 7.0);
    }

    #[tokio::test]
    async fn rate_then_get_chapter_round_trips() {
        let c1 = course_with("C1", 1, &[], vec![chapter_with_rating("a", 0.0)]);
        let course_id = c1.id;
        let chapter_id = c1.chapters[0].id;
        let store = MemoryStore::new(vec![c1]);

        rate(&store, course_id, chapter_id, 4.5).await.unwrap();
        let chapter = catalog::chapter(&store, course_id, chapter_id)
            .await
            .unwrap();
        assert_eq!(chapter.ratings, 4.5);
    }

    #[tokio::test]
    async fn rating_twice_with_the_same_value_is_idempotent() {
        let c1 = course_with("C1", 1, &[], vec![chapter_with_rating("a", 1.0)]);
        let course_id = c1.id;
        let chapter_id = c1.chapters[0].id;
        let store = MemoryStore::new(vec![c1]);

        rate(&store, course_id, chapter_id, 3.0).await.unwrap();
        let updated = rate(&store, course_id, chapter_id, 3.0).await.unwrap();
        assert_eq!(updated.chapters[0].ratings, 3.0);
    }

    #[tokio::test]
    async fn missing_course_fails_without_writing() {
        let c1 = course_with("C1", 1, &[], vec![chapter_with_rating("a", 1.0)]);
        let chapter_id = c1.chapters[0].id;
        let store = MemoryStore::new(vec![c1]);

        let err = rate(&store, Uuid::new_v4(), chapter_id, 5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::NotFound(_)));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn missing_chapter_fails_without_writing() {
        let c1 = course_with("C1", 1, &[], vec![chapter_with_rating("a", 1.0)]);
        let course_id = c1.id;
        let store = MemoryStore::new(vec![c1]);

        let err = rate(&store, course_id, Uuid::new_v4(), 5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::NotFound(_)));
        assert_eq!(store.write_count(), 0);
    }
}
