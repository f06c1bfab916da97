//! SQLite-backed catalog store.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};

use super::types::{TIME_LAYOUT, VideoMetadata};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS videos (
  id TEXT PRIMARY KEY,
  time TEXT NOT NULL
)";

#[derive(Clone)]
pub struct SqliteMetadataStore {
    pool: SqlitePool,
}

impl SqliteMetadataStore {
    /// Opens (creating on demand) the catalog database at `path`.
    pub async fn connect(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("failed to open catalog database {}", path.display()))?;

        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .context("failed to create videos table")?;

        Ok(Self { pool })
    }

    /// Records a new video. Fails if the id is already taken.
    pub async fn create(&self, id: &str, uploaded_at: DateTime<Utc>) -> Result<()> {
        sqlx::query("INSERT INTO videos (id, time) VALUES (?1, ?2)")
            .bind(id)
            .bind(uploaded_at.format(TIME_LAYOUT).to_string())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to insert video {}", id))?;
        Ok(())
    }

    pub async fn read(&self, id: &str) -> Result<Option<VideoMetadata>> {
        let row = sqlx::query("SELECT id, time FROM videos WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read video {}", id))?;

        row.map(parse_row).transpose()
    }

    /// All catalog entries, oldest upload first.
    pub async fn list(&self) -> Result<Vec<VideoMetadata>> {
        let rows = sqlx::query("SELECT id, time FROM videos ORDER BY time, id")
            .fetch_all(&self.pool)
            .await
            .context("failed to list videos")?;

        rows.into_iter().map(parse_row).collect()
    }
}

fn parse_row(row: SqliteRow) -> Result<VideoMetadata> {
    let id: String = row.try_get("id").context("missing id column")?;
    let time: String = row.try_get("time").context("missing time column")?;
    let uploaded_at = NaiveDateTime::parse_from_str(&time, TIME_LAYOUT)
        .with_context(|| format!("malformed upload time {:?} for video {}", time, id))?
        .and_utc();
    Ok(VideoMetadata { id, uploaded_at })
}
