//! Study item endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/learners/:username/study-items?category=&due=
pub async fn list(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<StudyItemsQuery>,
) -> Result<Json<StudyItemListResponse>> {
    let username = validate_username(&username)?;

    let items = state
        .db
        .get_study_items(username, query.category.trim(), query.due)
        .await?;

    Ok(Json(StudyItemListResponse {
        study_items: items.iter().map(DbStudyItem::to_api_item).collect(),
    }))
}

/// POST /api/learners/:username/study-items
pub async fn create(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<CreateStudyItemsRequest>,
) -> Result<Json<CreateStudyItemsResponse>> {
    let username = validate_username(&username)?;

    let items = state
        .db
        .create_study_items(
            username,
            &payload.word_ids,
            payload.due,
            state.config.default_easing_factor,
        )
        .await?;

    tracing::info!(
        "Registered {} study items for {} ({} requested)",
        items.len(),
        username,
        payload.word_ids.len()
    );

    Ok(Json(CreateStudyItemsResponse {
        ok: true,
        items: items.iter().map(DbStudyItem::to_api_item).collect(),
    }))
}

/// PUT /api/learners/:username/study-items/:id
pub async fn update(
    State(state): State<AppState>,
    Path((username, item_id)): Path<(String, i64)>,
    Json(payload): Json<UpdateStudyItemRequest>,
) -> Result<Json<UpdateStudyItemResponse>> {
    let username = validate_username(&username)?;

    if !payload.interval.is_finite() || payload.interval < 1.0 {
        return Err(ApiError::BadRequest(format!(
            "interval must be at least 1, got {}",
            payload.interval
        )));
    }

    let updated = state
        .db
        .update_study_item(username, item_id, payload.due, payload.interval)
        .await?;

    if !updated {
        return Err(ApiError::NotFound(format!("Study item {item_id}")));
    }

    Ok(Json(UpdateStudyItemResponse { ok: true }))
}

fn validate_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".to_string()));
    }
    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_username_rejected() {
        assert!(matches!(validate_username("  "), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_username_trimmed() {
        assert_eq!(validate_username(" hanako ").unwrap(), "hanako");
    }
}
