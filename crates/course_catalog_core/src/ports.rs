//! crates/course_catalog_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Course;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The storage collaborator holding course documents.
///
/// Courses and chapters are created only by bulk import, never through the
/// engine, so the contract is read access plus one targeted mutation.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Returns every course, or only those whose `domain` list contains
    /// `domain` when a filter is given. Order is storage order.
    async fn find_courses(&self, domain: Option<&str>) -> PortResult<Vec<Course>>;

    /// Fetches a single course, `NotFound` if the id does not resolve.
    async fn course_by_id(&self, course_id: Uuid) -> PortResult<Course>;

    /// Sets the rating of one chapter within one course as a single targeted
    /// update and returns the updated course. `NotFound` if either id does
    /// not resolve, in which case nothing was written.
    ///
    /// This replaces the value outright; it is not an accumulation. Keeping
    /// the write scoped to the one chapter field means two concurrent raters
    /// of different chapters in the same course cannot overwrite each other.
    async fn set_chapter_rating(
        &self,
        course_id: Uuid,
        chapter_id: Uuid,
        rating: f64,
    ) -> PortResult<Course>;
}
