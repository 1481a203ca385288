//! In-memory `CourseStore` double for the core unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Chapter, Course};
use crate::ports::{CourseStore, PortError, PortResult};

pub struct MemoryStore {
    courses: Mutex<Vec<Course>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: Mutex::new(courses),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn find_courses(&self, domain: Option<&str>) -> PortResult<Vec<Course>> {
        let courses = self.courses.lock().unwrap();
        Ok(courses
            .iter()
            .filter(|c| match domain {
                Some(wanted) => c.domain.iter().any(|d| d == wanted),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn course_by_id(&self, course_id: Uuid) -> PortResult<Course> {
        let courses = self.courses.lock().unwrap();
        courses
            .iter()
            .find(|c| c.id == course_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Course {} not found", course_id)))
    }

    async fn set_chapter_rating(
        &self,
        course_id: Uuid,
        chapter_id: Uuid,
        rating: f64,
    ) -> PortResult<Course> {
        let mut courses = self.courses.lock().unwrap();
        let course = courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or_else(|| PortError::NotFound(format!("Course {} not found", course_id)))?;
        let chapter = course
            .chapters
            .iter_mut()
            .find(|ch| ch.id == chapter_id)
            .ok_or_else(|| {
                PortError::NotFound(format!(
                    "Chapter {} not found in course {}",
                    chapter_id, course_id
                ))
            })?;
        chapter.ratings = rating;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(course.clone())
    }
}

pub fn course_with(name: &str, date: i64, domains: &[&str], chapters: Vec<Chapter>) -> Course {
    Course {
        id: Uuid::new_v4(),
        name: name.to_string(),
        date,
        description: format!("About {}", name),
        domain: domains.iter().map(|d| d.to_string()).collect(),
        chapters,
    }
}

pub fn chapter_with_rating(name: &str, ratings: f64) -> Chapter {
    Chapter {
        id: Uuid::new_v4(),
        name: name.to_string(),
        text: String::new(),
        ratings,
    }
}
