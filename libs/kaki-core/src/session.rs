//! Quiz session state machine.
//!
//! A [`Session`] never performs I/O. Host triggers (`start`, `select_answer`,
//! `continue_to_next`) and data-layer completions (`resolve`) are fed in as
//! discrete events, and the session answers with the [`Dispatch`]es the host
//! must carry out. Each dispatch holds a [`Ticket`]; the response has to be
//! handed back with the same ticket.
//!
//! Phases: `SelectingSource -> AwaitingWord -> QuestionActive ->
//! QuestionAnswered -> (AwaitingWord | Complete)`. A data-layer failure
//! halts the session where it stands and keeps the error for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

use crate::distractor::generate;
use crate::error::{SourceError, SourceOperation};
use crate::scheduler::{advance, SchedulingResult};
use crate::shuffle::{shuffle, StudyRng};
use crate::types::{Answer, AnswerOption, LearnerId, QueueEntry, StudyItem, StudyItemId, Word, WordId};

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    SelectingSource,
    AwaitingWord,
    QuestionActive,
    QuestionAnswered,
    Complete,
}

/// Call the host must make against the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    FetchDueItems {
        learner: LearnerId,
        category: String,
    },
    FetchCategoryWords {
        category: String,
    },
    CreateStudyItems {
        learner: LearnerId,
        word_ids: Vec<WordId>,
        due: DateTime<Utc>,
    },
    UpdateStudyItem {
        learner: LearnerId,
        item_id: StudyItemId,
        due: DateTime<Utc>,
        interval: f64,
    },
}

impl Request {
    pub fn operation(&self) -> SourceOperation {
        match self {
            Self::FetchDueItems { .. } => SourceOperation::FetchDueItems,
            Self::FetchCategoryWords { .. } => SourceOperation::FetchCategoryWords,
            Self::CreateStudyItems { .. } => SourceOperation::CreateStudyItems,
            Self::UpdateStudyItem { .. } => SourceOperation::UpdateStudyItem,
        }
    }
}

/// Successful data-layer result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Response {
    DueItems(Vec<StudyItem>),
    CategoryWords(Vec<Word>),
    ItemsCreated(Vec<StudyItem>),
    ItemUpdated,
}

impl Response {
    pub fn operation(&self) -> SourceOperation {
        match self {
            Self::DueItems(_) => SourceOperation::FetchDueItems,
            Self::CategoryWords(_) => SourceOperation::FetchCategoryWords,
            Self::ItemsCreated(_) => SourceOperation::CreateStudyItems,
            Self::ItemUpdated => SourceOperation::UpdateStudyItem,
        }
    }
}

/// Identifies an outstanding request: the session that issued it and its purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub session: Uuid,
    pub operation: SourceOperation,
}

/// A request paired with the ticket its response must carry.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub request: Request,
}

/// Outcome of an answer selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Out of range, no active question, or an answer is already recorded.
    Ignored,
    Accepted {
        answer: Answer,
        /// Schedule update to persist, for signed-in learners.
        dispatch: Option<Dispatch>,
    },
}

/// Words waiting to be presented.
///
/// Entries are taken from the back. A missed word goes back in at the
/// front, so it returns only after everything already waiting.
#[derive(Debug, Clone, Default)]
pub struct StudyQueue {
    entries: VecDeque<QueueEntry>,
}

impl StudyQueue {
    pub fn new(entries: Vec<QueueEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Take the next entry to present.
    pub fn dequeue(&mut self) -> Option<QueueEntry> {
        self.entries.pop_back()
    }

    /// Put a missed entry back at the front.
    pub fn requeue(&mut self, entry: QueueEntry) {
        self.entries.push_front(entry);
    }

    pub fn front(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate front to back.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }
}

/// One quiz session for a learner (or anonymous visitor) and category.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    learner: Option<LearnerId>,
    category: String,
    phase: Phase,
    queue: StudyQueue,
    current: Option<QueueEntry>,
    options: Vec<AnswerOption>,
    answer: Option<Answer>,
    /// Schedule for the current item, applied once the update is persisted.
    pending_schedule: Option<SchedulingResult>,
    in_flight: HashSet<SourceOperation>,
    continue_requested: bool,
    error: Option<SourceError>,
    rng: StudyRng,
}

impl Session {
    pub fn new(learner: Option<LearnerId>, category: impl Into<String>, rng: StudyRng) -> Self {
        Self {
            id: Uuid::new_v4(),
            learner,
            category: category.into(),
            phase: Phase::SelectingSource,
            queue: StudyQueue::default(),
            current: None,
            options: Vec::new(),
            answer: None,
            pending_schedule: None,
            in_flight: HashSet::new(),
            continue_requested: false,
            error: None,
            rng,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn learner(&self) -> Option<&LearnerId> {
        self.learner.as_ref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&QueueEntry> {
        self.current.as_ref()
    }

    pub fn word(&self) -> Option<&Word> {
        self.current.as_ref().map(QueueEntry::word)
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn answer(&self) -> Option<Answer> {
        self.answer
    }

    pub fn queue(&self) -> &StudyQueue {
        &self.queue
    }

    pub fn error(&self) -> Option<&SourceError> {
        self.error.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn is_in_flight(&self, operation: SourceOperation) -> bool {
        self.in_flight.contains(&operation)
    }

    /// Request the session's source data.
    ///
    /// Signed-in learners start from their due items, everyone else from the
    /// category word list. Calling this again while that fetch is outstanding
    /// dispatches nothing.
    pub fn start(&mut self) -> Vec<Dispatch> {
        if self.phase != Phase::SelectingSource || self.is_halted() {
            return Vec::new();
        }

        let request = match &self.learner {
            Some(learner) => Request::FetchDueItems {
                learner: learner.clone(),
                category: self.category.clone(),
            },
            None => Request::FetchCategoryWords {
                category: self.category.clone(),
            },
        };

        self.dispatch(request).into_iter().collect()
    }

    /// Feed back the outcome of a dispatched request.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<Response, SourceError>,
        now: DateTime<Utc>,
    ) -> Vec<Dispatch> {
        if ticket.session != self.id {
            tracing::debug!(session = %self.id, stale = %ticket.session, "ignoring response for another session");
            return Vec::new();
        }
        if let Ok(response) = &result {
            if response.operation() != ticket.operation {
                tracing::debug!(session = %self.id, ?ticket, "ignoring response that does not match its ticket");
                return Vec::new();
            }
        }
        if !self.in_flight.remove(&ticket.operation) {
            tracing::debug!(session = %self.id, ?ticket, "ignoring response with no outstanding request");
            return Vec::new();
        }
        if self.is_halted() {
            return Vec::new();
        }

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(session = %self.id, operation = ?error.operation, "session halted: {}", error);
                self.continue_requested = false;
                self.pending_schedule = None;
                self.error = Some(error);
                return Vec::new();
            }
        };

        match response {
            Response::DueItems(items) => self.on_due_items(items),
            Response::CategoryWords(words) => self.on_category_words(words, now),
            Response::ItemsCreated(items) => {
                self.load(items.into_iter().map(QueueEntry::Item).collect());
                Vec::new()
            }
            Response::ItemUpdated => {
                self.commit_schedule();
                if self.continue_requested {
                    self.continue_requested = false;
                    self.finish_question();
                }
                Vec::new()
            }
        }
    }

    /// Record the learner's choice for the active question.
    ///
    /// Only the first valid selection counts. For signed-in learners the
    /// item is rescheduled and the update is returned for persisting; the
    /// item itself keeps its old schedule until that update succeeds.
    pub fn select_answer(&mut self, index: usize, now: DateTime<Utc>) -> Selection {
        if self.is_halted() || self.phase != Phase::QuestionActive || index >= self.options.len() {
            tracing::debug!(session = %self.id, index, phase = ?self.phase, "selection ignored");
            return Selection::Ignored;
        }

        let answer = Answer {
            clicked: index,
            correct: self.options[index].correct,
        };
        self.answer = Some(answer);
        self.phase = Phase::QuestionAnswered;

        let update = match (&self.learner, &self.current) {
            (Some(learner), Some(QueueEntry::Item(item))) => {
                let result = advance(item, answer.correct, now);
                self.pending_schedule = Some(result);
                Some(Request::UpdateStudyItem {
                    learner: learner.clone(),
                    item_id: item.id,
                    due: result.due,
                    interval: result.interval,
                })
            }
            _ => None,
        };

        tracing::debug!(session = %self.id, index, correct = answer.correct, "answer recorded");

        Selection::Accepted {
            answer,
            dispatch: update.and_then(|request| self.dispatch(request)),
        }
    }

    /// Move on after an answer.
    ///
    /// Returns false when there is no answered question. While the schedule
    /// update is still outstanding the move is deferred until it resolves.
    pub fn continue_to_next(&mut self) -> bool {
        if self.is_halted() || self.phase != Phase::QuestionAnswered {
            return false;
        }
        if self.is_in_flight(SourceOperation::UpdateStudyItem) {
            tracing::debug!(session = %self.id, "continue deferred until update resolves");
            self.continue_requested = true;
            return false;
        }

        self.finish_question();
        true
    }

    fn on_due_items(&mut self, items: Vec<StudyItem>) -> Vec<Dispatch> {
        if items.is_empty() {
            tracing::debug!(session = %self.id, "no due items, fetching category words");
            let request = Request::FetchCategoryWords {
                category: self.category.clone(),
            };
            return self.dispatch(request).into_iter().collect();
        }

        self.load(items.into_iter().map(QueueEntry::Item).collect());
        Vec::new()
    }

    fn on_category_words(&mut self, words: Vec<Word>, now: DateTime<Utc>) -> Vec<Dispatch> {
        match &self.learner {
            Some(learner) if !words.is_empty() => {
                let request = Request::CreateStudyItems {
                    learner: learner.clone(),
                    word_ids: words.iter().map(|w| w.id).collect(),
                    due: now,
                };
                self.dispatch(request).into_iter().collect()
            }
            _ => {
                self.load(words.into_iter().map(QueueEntry::Word).collect());
                Vec::new()
            }
        }
    }

    fn load(&mut self, entries: Vec<QueueEntry>) {
        let (entries, invalid): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|entry| entry.study_item().map_or(true, StudyItem::is_valid));
        for entry in &invalid {
            if let Some(item) = entry.study_item() {
                tracing::warn!(
                    session = %self.id,
                    item = item.id,
                    interval = item.interval,
                    easing_factor = item.easing_factor,
                    "skipping study item with invalid schedule"
                );
            }
        }

        tracing::debug!(session = %self.id, count = entries.len(), "queue loaded");
        self.queue = StudyQueue::new(shuffle(&entries, &mut self.rng));
        self.next_word();
    }

    fn commit_schedule(&mut self) {
        if let (Some(result), Some(QueueEntry::Item(item))) =
            (self.pending_schedule.take(), self.current.as_mut())
        {
            item.interval = result.interval;
            item.due = result.due;
        }
    }

    fn finish_question(&mut self) {
        if let (Some(entry), Some(answer)) = (self.current.take(), self.answer.take()) {
            if !answer.correct {
                self.queue.requeue(entry);
            }
        }
        self.next_word();
    }

    fn next_word(&mut self) {
        self.phase = Phase::AwaitingWord;
        self.answer = None;
        self.pending_schedule = None;

        match self.queue.dequeue() {
            Some(entry) => {
                self.options = generate(Some(entry.word()), &mut self.rng);
                self.current = Some(entry);
                self.phase = Phase::QuestionActive;
            }
            None => {
                tracing::debug!(session = %self.id, "session complete");
                self.current = None;
                self.options = Vec::new();
                self.phase = Phase::Complete;
            }
        }
    }

    fn dispatch(&mut self, request: Request) -> Option<Dispatch> {
        let operation = request.operation();
        if !self.in_flight.insert(operation) {
            tracing::debug!(session = %self.id, ?operation, "request already in flight");
            return None;
        }

        Some(Dispatch {
            ticket: Ticket {
                session: self.id,
                operation,
            },
            request,
        })
    }
}
