//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;

const STUDY_ITEM_COLUMNS: &str = r#"
    s.id, s.username, s.due, s.interval, s.easing_factor,
    w.id AS word_id, w.tango, w.yomi, w.pitch, w.definition, w.pos, w.category
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Word Repository ===

    /// List categories with their word counts
    pub async fn list_categories(&self) -> Result<Vec<CategorySummary>> {
        let categories = sqlx::query_as::<_, CategorySummary>(
            r#"
            SELECT category AS name, COUNT(*) AS word_count
            FROM words
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Get all words in a category
    pub async fn get_words_by_category(&self, category: &str) -> Result<Vec<DbWord>> {
        let words = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT id, tango, yomi, pitch, definition, pos, category
            FROM words
            WHERE category = $1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    /// Insert a word, returning it with its assigned ID
    pub async fn insert_word(
        &self,
        tango: &str,
        yomi: &str,
        pitch: i32,
        definition: &str,
        pos: &str,
        category: &str,
    ) -> Result<DbWord> {
        let word = sqlx::query_as::<_, DbWord>(
            r#"
            INSERT INTO words (tango, yomi, pitch, definition, pos, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, tango, yomi, pitch, definition, pos, category
            "#,
        )
        .bind(tango)
        .bind(yomi)
        .bind(pitch)
        .bind(definition)
        .bind(pos)
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        Ok(word)
    }

    // === Study Item Repository ===

    /// Get a learner's study items in a category, optionally only those due
    pub async fn get_study_items(
        &self,
        username: &str,
        category: &str,
        due_only: bool,
    ) -> Result<Vec<DbStudyItem>> {
        let sql = format!(
            r#"
            SELECT {STUDY_ITEM_COLUMNS}
            FROM study_items s
            JOIN words w ON w.id = s.word_id
            WHERE s.username = $1 AND w.category = $2 AND (NOT $3 OR s.due <= NOW())
            ORDER BY s.due, s.id
            "#
        );

        let items = sqlx::query_as::<_, DbStudyItem>(&sql)
            .bind(username)
            .bind(category)
            .bind(due_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Register study items for words the learner has not seen yet.
    ///
    /// Returns only the newly created items; pairs that already exist are left untouched.
    pub async fn create_study_items(
        &self,
        username: &str,
        word_ids: &[i64],
        due: DateTime<Utc>,
        easing_factor: f64,
    ) -> Result<Vec<DbStudyItem>> {
        let mut tx = self.pool.begin().await?;

        let created: Vec<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO study_items (username, word_id, due, interval, easing_factor)
            SELECT $1, w.id, $2, 1, $3
            FROM words w
            WHERE w.id = ANY($4)
            ON CONFLICT (username, word_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(due)
        .bind(easing_factor)
        .bind(word_ids)
        .fetch_all(&mut *tx)
        .await?;

        let sql = format!(
            r#"
            SELECT {STUDY_ITEM_COLUMNS}
            FROM study_items s
            JOIN words w ON w.id = s.word_id
            WHERE s.id = ANY($1)
            ORDER BY s.id
            "#
        );

        let items = sqlx::query_as::<_, DbStudyItem>(&sql)
            .bind(&created)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    /// Persist a new due date and interval. Returns false if the learner has no such item.
    pub async fn update_study_item(
        &self,
        username: &str,
        item_id: i64,
        due: DateTime<Utc>,
        interval: f64,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE study_items
            SET due = $1, interval = $2, updated_at = NOW()
            WHERE id = $3 AND username = $4
            "#,
        )
        .bind(due)
        .bind(interval)
        .bind(item_id)
        .bind(username)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a single study item owned by a learner
    pub async fn get_study_item(&self, username: &str, item_id: i64) -> Result<Option<DbStudyItem>> {
        let sql = format!(
            r#"
            SELECT {STUDY_ITEM_COLUMNS}
            FROM study_items s
            JOIN words w ON w.id = s.word_id
            WHERE s.id = $1 AND s.username = $2
            "#
        );

        let item = sqlx::query_as::<_, DbStudyItem>(&sql)
            .bind(item_id)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }
}
