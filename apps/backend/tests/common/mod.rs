//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating test data
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

pub mod fixtures;

use std::sync::Arc;

use axum::Router;

use kaki_backend::config::Config;
use kaki_backend::db::Database;
use kaki_backend::models::DbWord;
use kaki_backend::AppState;

/// Test context containing database connection and test router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let config = Config::new(database_url, "127.0.0.1".to_string(), 0, 5, 2.5)
            .expect("Failed to build test config");

        let db = Database::connect(&config.database_url, config.max_connections)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);

        let state = AppState {
            db: db.clone(),
            config: Arc::new(config),
        };

        let app = kaki_backend::router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Insert words into a fresh category and return them.
    pub async fn create_test_words(&self, category: &str, words: &[(&str, &str, i32)]) -> Vec<DbWord> {
        let mut created = Vec::new();
        for (tango, yomi, pitch) in words {
            let word = self
                .db
                .insert_word(tango, yomi, *pitch, "test definition", "noun", category)
                .await
                .expect("Failed to insert test word");
            created.push(word);
        }
        created
    }

    /// Clean up test data for a learner and category.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup(&self, username: &str, category: &str) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM study_items WHERE username = $1")
            .bind(username)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM words WHERE category = $1")
            .bind(category)
            .execute(self.db.pool())
            .await;
    }
}
