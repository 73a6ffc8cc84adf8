//! Data-layer interface the engine consumes.

use chrono::{DateTime, Utc};
use std::future::Future;

use crate::error::Result;
use crate::types::{LearnerId, StudyItem, StudyItemId, Word, WordId};

/// Storage for words and study items, usually a remote API.
///
/// Every call may fail; the engine surfaces the error and never retries.
pub trait StudySource {
    /// Items of `category` due for `learner`.
    fn fetch_due_study_items(
        &self,
        learner: &LearnerId,
        category: &str,
    ) -> impl Future<Output = Result<Vec<StudyItem>>> + Send;

    /// Every word in `category`.
    fn fetch_category_words(&self, category: &str) -> impl Future<Output = Result<Vec<Word>>> + Send;

    /// Register study items for `learner`, returning the created items.
    fn create_study_items(
        &self,
        learner: &LearnerId,
        word_ids: &[WordId],
        due: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<StudyItem>>> + Send;

    /// Persist a scheduling result.
    fn update_study_item(
        &self,
        learner: &LearnerId,
        item_id: StudyItemId,
        due: DateTime<Utc>,
        interval: f64,
    ) -> impl Future<Output = Result<()>> + Send;
}
