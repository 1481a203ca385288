//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `CourseStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use std::collections::HashMap;

use async_trait::async_trait;
use course_catalog_core::domain::{Chapter, Course};
use course_catalog_core::ports::{CourseStore, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `CourseStore` port.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a new `PgStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Inserts a whole course with its chapters in one transaction. Only the
    /// bulk-import path uses this; the engine itself never creates courses.
    pub async fn insert_course(&self, course: &Course) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO courses (id, name, date, description, domain) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(course.id)
        .bind(&course.name)
        .bind(course.date)
        .bind(&course.description)
        .bind(&course.domain)
        .execute(&mut *tx)
        .await?;

        for (position, chapter) in course.chapters.iter().enumerate() {
            sqlx::query(
                "INSERT INTO chapters (id, course_id, position, name, body, ratings) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(chapter.id)
            .bind(course.id)
            .bind(position as i32)
            .bind(&chapter.name)
            .bind(&chapter.text)
            .bind(chapter.ratings)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    /// Loads the chapters for a set of courses, keyed by course id, in
    /// authored order.
    async fn chapters_for(&self, course_ids: &[Uuid]) -> PortResult<HashMap<Uuid, Vec<Chapter>>> {
        let records = sqlx::query_as::<_, ChapterRecord>(
            "SELECT id, course_id, name, body, ratings FROM chapters \
             WHERE course_id = ANY($1) ORDER BY position ASC",
        )
        .bind(course_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let mut by_course: HashMap<Uuid, Vec<Chapter>> = HashMap::new();
        for record in records {
            let course_id = record.course_id;
            by_course.entry(course_id).or_default().push(record.to_domain());
        }
        Ok(by_course)
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct CourseRecord {
    id: Uuid,
    name: String,
    date: i64,
    description: String,
    domain: Vec<String>,
}
impl CourseRecord {
    fn to_domain(self, chapters: Vec<Chapter>) -> Course {
        Course {
            id: self.id,
            name: self.name,
            date: self.date,
            description: self.description,
            domain: self.domain,
            chapters,
        }
    }
}

#[derive(FromRow)]
struct ChapterRecord {
    id: Uuid,
    course_id: Uuid,
    name: String,
    body: String,
    ratings: f64,
}
impl ChapterRecord {
    fn to_domain(self) -> Chapter {
        Chapter {
            id: self.id,
            name: self.name,
            text: self.body,
            ratings: self.ratings,
        }
    }
}

//=========================================================================================
// `CourseStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CourseStore for PgStore {
    async fn find_courses(&self, domain: Option<&str>) -> PortResult<Vec<Course>> {
        // `seq` preserves import order; that is the "storage order" the
        // engine's stable sorts tie-break on.
        let records = match domain {
            Some(wanted) => {
                sqlx::query_as::<_, CourseRecord>(
                    "SELECT id, name, date, description, domain FROM courses \
                     WHERE $1 = ANY(domain) ORDER BY seq ASC",
                )
                .bind(wanted)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, CourseRecord>(
                    "SELECT id, name, date, description, domain FROM courses ORDER BY seq ASC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        let mut chapters = self.chapters_for(&ids).await?;
        Ok(records
            .into_iter()
            .map(|r| {
                let course_chapters = chapters.remove(&r.id).unwrap_or_default();
                r.to_domain(course_chapters)
            })
            .collect())
    }

    async fn course_by_id(&self, course_id: Uuid) -> PortResult<Course> {
        let record = sqlx::query_as::<_, CourseRecord>(
            "SELECT id, name, date, description, domain FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("Course {} not found", course_id))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        let mut chapters = self.chapters_for(&[course_id]).await?;
        Ok(record.to_domain(chapters.remove(&course_id).unwrap_or_default()))
    }

    async fn set_chapter_rating(
        &self,
        course_id: Uuid,
        chapter_id: Uuid,
        rating: f64,
    ) -> PortResult<Course> {
        // One targeted UPDATE, scoped to the chapter row. Concurrent raters
        // of other chapters in the same course never conflict with it.
        let result = sqlx::query(
            "UPDATE chapters SET ratings = $1 WHERE id = $2 AND course_id = $3",
        )
        .bind(rating)
        .bind(chapter_id)
        .bind(course_id)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Chapter {} not found in course {}",
                chapter_id, course_id
            )));
        }
        self.course_by_id(course_id).await
    }
}
