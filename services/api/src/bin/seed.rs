//! services/api/src/bin/seed.rs
//!
//! Bulk import: reads a `courses.json` file and inserts every course into the
//! database. This is the only path that creates courses and chapters; the API
//! itself only reads them and mutates ratings.
//!
//! Each chapter is given a random integer rating in [-5, 5] at import time, a
//! seeding convention for demo data rather than a stored invariant.

use api_lib::{adapters::db::PgStore, config::Config, error::ApiError};
use course_catalog_core::domain::{Chapter, Course};
use rand::Rng;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// The shape of one course in the seed file. Ids are assigned at import.
#[derive(Deserialize)]
struct CourseSeed {
    name: String,
    date: i64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    domain: Vec<String>,
    #[serde(default)]
    chapters: Vec<ChapterSeed>,
}

#[derive(Deserialize)]
struct ChapterSeed {
    name: String,
    #[serde(default)]
    text: String,
}

fn random_rating() -> f64 {
    rand::thread_rng().gen_range(-5..=5) as f64
}

impl CourseSeed {
    fn into_domain(self) -> Course {
        Course {
            id: Uuid::new_v4(),
            name: self.name,
            date: self.date,
            description: self.description,
            domain: self.domain,
            chapters: self
                .chapters
                .into_iter()
                .map(|chapter| Chapter {
                    id: Uuid::new_v4(),
                    name: chapter.name,
                    text: chapter.text,
                    ratings: random_rating(),
                })
                .collect(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./courses.json".to_string());
    info!("Reading seed data from {}", path);
    let raw = std::fs::read_to_string(&path)?;
    let seeds: Vec<CourseSeed> = serde_json::from_str(&raw)
        .map_err(|e| ApiError::Internal(format!("Failed to parse {}: {}", path, e)))?;

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let store = PgStore::new(db_pool);
    store.run_migrations().await?;

    let mut imported = 0usize;
    for seed in seeds {
        let course = seed.into_domain();
        store.insert_course(&course).await?;
        imported += 1;
    }
    info!("Courses inserted successfully with random ratings ({})", imported);

    Ok(())
}
