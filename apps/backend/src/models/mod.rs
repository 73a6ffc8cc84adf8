//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Re-export shared types from kaki-core
pub use kaki_core::types::{StudyItem, StudyItemId, Word, WordId};

// === Database Entity Types ===

/// Word stored in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbWord {
    pub id: i64,
    pub tango: String,
    pub yomi: String,
    pub pitch: i32,
    pub definition: String,
    pub pos: String,
    pub category: String,
}

impl DbWord {
    /// Convert to API word type
    pub fn to_api_word(&self) -> Word {
        Word {
            id: self.id,
            tango: self.tango.clone(),
            yomi: self.yomi.clone(),
            pitch: self.pitch.max(0) as u32,
            definition: self.definition.clone(),
            pos: self.pos.clone(),
            category: self.category.clone(),
        }
    }
}

/// Study item joined with its word
#[derive(Debug, Clone, FromRow)]
pub struct DbStudyItem {
    pub id: i64,
    pub username: String,
    pub due: DateTime<Utc>,
    pub interval: f64,
    pub easing_factor: f64,
    pub word_id: i64,
    pub tango: String,
    pub yomi: String,
    pub pitch: i32,
    pub definition: String,
    pub pos: String,
    pub category: String,
}

impl DbStudyItem {
    /// Convert to API study item type
    pub fn to_api_item(&self) -> StudyItem {
        StudyItem {
            id: self.id,
            word: Word {
                id: self.word_id,
                tango: self.tango.clone(),
                yomi: self.yomi.clone(),
                pitch: self.pitch.max(0) as u32,
                definition: self.definition.clone(),
                pos: self.pos.clone(),
                category: self.category.clone(),
            },
            due: self.due,
            interval: self.interval,
            easing_factor: self.easing_factor,
        }
    }
}

/// Category label with its size
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategorySummary {
    pub name: String,
    pub word_count: i64,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Deserialize)]
pub struct WordsQuery {
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
pub struct StudyItemsQuery {
    pub category: String,
    /// Only items whose due date has passed
    #[serde(default = "default_due_only")]
    pub due: bool,
}

fn default_due_only() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyItemListResponse {
    pub study_items: Vec<StudyItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStudyItemsRequest {
    pub word_ids: Vec<WordId>,
    pub due: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStudyItemsResponse {
    pub ok: bool,
    pub items: Vec<StudyItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStudyItemRequest {
    pub due: DateTime<Utc>,
    pub interval: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStudyItemResponse {
    pub ok: bool,
}
