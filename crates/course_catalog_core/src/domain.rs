//! crates/course_catalog_core/src/domain.rs
//!
//! Defines the pure, core data structures for the catalog.
//! These structs are independent of any database or serialization format.

use uuid::Uuid;

/// A top-level catalog entry with metadata and an ordered list of chapters.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    /// Seconds since the Unix epoch; the recency sort key.
    pub date: i64,
    pub description: String,
    /// Topic tags. Membership is what the domain filter matches against;
    /// a course may belong to several domains.
    pub domain: Vec<String>,
    /// Authored/display order. Always present, possibly empty.
    pub chapters: Vec<Chapter>,
}

/// A sub-unit of a course carrying a single mutable numeric rating.
///
/// Chapter ids are unique within their owning course but not across courses.
#[derive(Debug, Clone)]
pub struct Chapter {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    /// A single replaceable value, 0 when never rated. The plural name
    /// matches the persisted field.
    pub ratings: f64,
}

impl Course {
    /// The maximum chapter rating, or `None` when the course has no
    /// chapters and cannot be ranked.
    pub fn max_rating(&self) -> Option<f64> {
        self.chapters
            .iter()
            .map(|chapter| chapter.ratings)
            .reduce(f64::max)
    }
}

/// A course paired with its transient `max_rating` key for rating-mode
/// listings. Never written back to storage.
#[derive(Debug, Clone)]
pub struct RankedCourse {
    pub course: Course,
    pub max_rating: Option<f64>,
}

/// How a course listing is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Pass through storage order.
    #[default]
    None,
    /// By `name` ascending, code-point order.
    Alphabetical,
    /// By `date` descending, most recent first.
    Date,
    /// By maximum chapter rating descending; unrankable courses last.
    Rating,
}

impl SortMode {
    /// Parses a query-string value. Anything unrecognized means no sorting,
    /// never an error.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("alphabetical") => SortMode::Alphabetical,
            Some("date") => SortMode::Date,
            Some("rating") => SortMode::Rating,
            _ => SortMode::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_mode_falls_back_to_none() {
        assert_eq!(SortMode::parse(Some("popularity")), SortMode::None);
        assert_eq!(SortMode::parse(None), SortMode::None);
        assert_eq!(SortMode::parse(Some("rating")), SortMode::Rating);
    }

    #[test]
    fn max_rating_of_empty_course_is_none() {
        let course = Course {
            id: Uuid::new_v4(),
            name: "Empty".to_string(),
            date: 0,
            description: String::new(),
            domain: vec![],
            chapters: vec![],
        };
        assert_eq!(course.max_rating(), None);
    }
}
