//! Vocabulary endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/categories
pub async fn categories(State(state): State<AppState>) -> Result<Json<CategoryListResponse>> {
    let categories = state.db.list_categories().await?;
    Ok(Json(CategoryListResponse { categories }))
}

/// GET /api/words?category=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<WordsQuery>,
) -> Result<Json<WordListResponse>> {
    let category = query.category.trim();
    if category.is_empty() {
        return Err(ApiError::BadRequest("category must not be empty".to_string()));
    }

    let words = state.db.get_words_by_category(category).await?;
    Ok(Json(WordListResponse {
        words: words.iter().map(DbWord::to_api_word).collect(),
    }))
}
