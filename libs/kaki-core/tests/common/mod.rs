//! In-memory data source for driving sessions in tests.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

use kaki_core::error::Result;
use kaki_core::types::{StudyItemId, WordId};
use kaki_core::{LearnerId, SourceError, SourceOperation, StudyItem, StudySource, Word};

/// A recorded `update_study_item` call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCall {
    pub learner: LearnerId,
    pub item_id: StudyItemId,
    pub due: DateTime<Utc>,
    pub interval: f64,
}

#[derive(Default)]
struct Store {
    words: Vec<Word>,
    items: Vec<(LearnerId, StudyItem)>,
    updates: Vec<UpdateCall>,
    calls: Vec<SourceOperation>,
    failing: Option<(SourceOperation, String)>,
}

/// Words and study items held in memory.
#[derive(Default)]
pub struct MemorySource {
    store: Mutex<Store>,
}

impl MemorySource {
    pub fn with_words(words: Vec<Word>) -> Self {
        let source = Self::default();
        source.store.lock().unwrap().words = words;
        source
    }

    pub fn add_item(&self, learner: &LearnerId, item: StudyItem) {
        self.store.lock().unwrap().items.push((learner.clone(), item));
    }

    /// Make every call of `operation` fail with `message`.
    pub fn fail(&self, operation: SourceOperation, message: &str) {
        self.store.lock().unwrap().failing = Some((operation, message.to_string()));
    }

    pub fn updates(&self) -> Vec<UpdateCall> {
        self.store.lock().unwrap().updates.clone()
    }

    pub fn calls(&self) -> Vec<SourceOperation> {
        self.store.lock().unwrap().calls.clone()
    }

    pub fn items_for(&self, learner: &LearnerId) -> Vec<StudyItem> {
        self.store
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|(owner, _)| owner == learner)
            .map(|(_, item)| item.clone())
            .collect()
    }

    fn record(&self, operation: SourceOperation) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(operation);
        match &store.failing {
            Some((failing, message)) if *failing == operation => {
                Err(SourceError::new(operation, message.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl StudySource for MemorySource {
    async fn fetch_due_study_items(&self, learner: &LearnerId, category: &str) -> Result<Vec<StudyItem>> {
        self.record(SourceOperation::FetchDueItems)?;
        let now = Utc::now();
        Ok(self
            .items_for(learner)
            .into_iter()
            .filter(|item| item.word.category == category && item.is_due(now))
            .collect())
    }

    async fn fetch_category_words(&self, category: &str) -> Result<Vec<Word>> {
        self.record(SourceOperation::FetchCategoryWords)?;
        let store = self.store.lock().unwrap();
        Ok(store
            .words
            .iter()
            .filter(|word| word.category == category)
            .cloned()
            .collect())
    }

    async fn create_study_items(
        &self,
        learner: &LearnerId,
        word_ids: &[WordId],
        due: DateTime<Utc>,
    ) -> Result<Vec<StudyItem>> {
        self.record(SourceOperation::CreateStudyItems)?;
        let mut store = self.store.lock().unwrap();
        let words: Vec<Word> = store
            .words
            .iter()
            .filter(|word| word_ids.contains(&word.id))
            .cloned()
            .collect();

        let mut created = Vec::new();
        for word in words {
            let item = StudyItem {
                id: 100 + word.id,
                word,
                due,
                interval: 1.0,
                easing_factor: 2.5,
            };
            store.items.push((learner.clone(), item.clone()));
            created.push(item);
        }
        Ok(created)
    }

    async fn update_study_item(
        &self,
        learner: &LearnerId,
        item_id: StudyItemId,
        due: DateTime<Utc>,
        interval: f64,
    ) -> Result<()> {
        self.record(SourceOperation::UpdateStudyItem)?;
        let mut store = self.store.lock().unwrap();
        store.updates.push(UpdateCall {
            learner: learner.clone(),
            item_id,
            due,
            interval,
        });
        for (owner, item) in store.items.iter_mut() {
            if owner == learner && item.id == item_id {
                item.due = due;
                item.interval = interval;
            }
        }
        Ok(())
    }
}

pub fn word(id: i64, tango: &str, yomi: &str, pitch: u32, category: &str) -> Word {
    Word {
        id,
        tango: tango.to_string(),
        yomi: yomi.to_string(),
        pitch,
        definition: format!("definition of {tango}"),
        pos: "expression".to_string(),
        category: category.to_string(),
    }
}

/// Three greetings, as in the seeded vocabulary.
pub fn greetings() -> Vec<Word> {
    vec![
        word(1, "お早う", "おはよう", 0, "greetings"),
        word(2, "有難う", "ありがとう", 2, "greetings"),
        word(3, "今日は", "こんにちは", 0, "greetings"),
    ]
}
