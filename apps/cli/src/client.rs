//! HTTP client for the kaki backend.

use chrono::{DateTime, Utc};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use kaki_core::types::{StudyItemId, WordId};
use kaki_core::{LearnerId, SourceError, SourceOperation, StudyItem, StudySource, Word};

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Keep the backend's own message; describe transport failures in full.
    pub fn into_source_error(self, operation: SourceOperation) -> SourceError {
        match self {
            Self::Backend { message, .. } => SourceError::new(operation, message),
            other => SourceError::new(operation, other.to_string()),
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub name: String,
    pub word_count: i64,
}

#[derive(Debug, Deserialize)]
struct CategoryListResponse {
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct WordListResponse {
    words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
struct StudyItemListResponse {
    study_items: Vec<StudyItem>,
}

#[derive(Debug, Serialize)]
struct CreateStudyItemsRequest<'a> {
    word_ids: &'a [WordId],
    due: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CreateStudyItemsResponse {
    items: Vec<StudyItem>,
}

#[derive(Debug, Serialize)]
struct UpdateStudyItemRequest {
    due: DateTime<Utc>,
    interval: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Talks to the backend's vocabulary and study item routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Categories offered by the backend, with their sizes.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let url = format!("{}/api/categories", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let response: CategoryListResponse = read_json(resp).await?;
        Ok(response.categories)
    }

    async fn get_words(&self, category: &str) -> Result<Vec<Word>, ClientError> {
        let url = format!("{}/api/words", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("category", category)])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let response: WordListResponse = read_json(resp).await?;
        Ok(response.words)
    }

    async fn get_due_items(
        &self,
        learner: &LearnerId,
        category: &str,
    ) -> Result<Vec<StudyItem>, ClientError> {
        let url = self.study_items_url(learner, None)?;
        let resp = self
            .client
            .get(url)
            .query(&[("category", category), ("due", "true")])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let response: StudyItemListResponse = read_json(resp).await?;
        Ok(response.study_items)
    }

    async fn post_items(
        &self,
        learner: &LearnerId,
        word_ids: &[WordId],
        due: DateTime<Utc>,
    ) -> Result<Vec<StudyItem>, ClientError> {
        let url = self.study_items_url(learner, None)?;
        let resp = self
            .client
            .post(url)
            .json(&CreateStudyItemsRequest { word_ids, due })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let response: CreateStudyItemsResponse = read_json(resp).await?;
        Ok(response.items)
    }

    async fn put_item(
        &self,
        learner: &LearnerId,
        item_id: StudyItemId,
        due: DateTime<Utc>,
        interval: f64,
    ) -> Result<(), ClientError> {
        let url = self.study_items_url(learner, Some(item_id))?;
        let resp = self
            .client
            .put(url)
            .json(&UpdateStudyItemRequest { due, interval })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let _: serde_json::Value = read_json(resp).await?;
        Ok(())
    }

    /// `{base}/api/learners/{learner}/study-items[/{item_id}]` with the
    /// learner percent-encoded as a single path segment.
    fn study_items_url(
        &self,
        learner: &LearnerId,
        item_id: Option<StudyItemId>,
    ) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Parse(format!("{}: {e}", self.base_url)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ClientError::Parse(format!("{} cannot be a base URL", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .extend(["api", "learners", learner.as_str(), "study-items"]);
            if let Some(item_id) = item_id {
                segments.push(&item_id.to_string());
            }
        }
        Ok(url)
    }
}

impl StudySource for ApiClient {
    async fn fetch_due_study_items(
        &self,
        learner: &LearnerId,
        category: &str,
    ) -> kaki_core::error::Result<Vec<StudyItem>> {
        self.get_due_items(learner, category)
            .await
            .map_err(|e| e.into_source_error(SourceOperation::FetchDueItems))
    }

    async fn fetch_category_words(&self, category: &str) -> kaki_core::error::Result<Vec<Word>> {
        self.get_words(category)
            .await
            .map_err(|e| e.into_source_error(SourceOperation::FetchCategoryWords))
    }

    async fn create_study_items(
        &self,
        learner: &LearnerId,
        word_ids: &[WordId],
        due: DateTime<Utc>,
    ) -> kaki_core::error::Result<Vec<StudyItem>> {
        self.post_items(learner, word_ids, due)
            .await
            .map_err(|e| e.into_source_error(SourceOperation::CreateStudyItems))
    }

    async fn update_study_item(
        &self,
        learner: &LearnerId,
        item_id: StudyItemId,
        due: DateTime<Utc>,
        interval: f64,
    ) -> kaki_core::error::Result<()> {
        self.put_item(learner, item_id, due, interval)
            .await
            .map_err(|e| e.into_source_error(SourceOperation::UpdateStudyItem))
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(ClientError::Backend {
            status: status.as_u16(),
            message: backend_message(&body),
        });
    }

    parse_body(&body)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))
}

/// The `message` of a backend error body, or the raw body when it is not one.
fn backend_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => error.message,
        Err(_) => body.trim().to_string(),
    }
}
