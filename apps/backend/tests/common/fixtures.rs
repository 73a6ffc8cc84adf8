//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

/// Three greetings with their pitch classes.
pub const GREETINGS: [(&str, &str, i32); 3] = [
    ("お早う", "おはよう", 0),
    ("有難う", "ありがとう", 2),
    ("今日は", "こんにちは", 0),
];

/// Create a study item registration request body.
pub fn create_items_request(word_ids: &[i64], due: DateTime<Utc>) -> serde_json::Value {
    json!({ "word_ids": word_ids, "due": due })
}

/// Create a study item update request body.
pub fn update_item_request(due: DateTime<Utc>, interval: f64) -> serde_json::Value {
    json!({ "due": due, "interval": interval })
}

/// Generate a unique test category to avoid collisions.
pub fn unique_category(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}

/// Generate a unique test username.
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
