//! Async host loop that runs a session against a [`StudySource`].

use chrono::Utc;
use std::collections::VecDeque;

use crate::error::SourceError;
use crate::session::{Dispatch, Request, Response, Selection, Session};
use crate::shuffle::study_rng;
use crate::source::StudySource;
use crate::types::LearnerId;

/// Owns the active session and performs its requests.
///
/// Starting a new session discards the previous one.
pub struct StudyDriver<S> {
    source: S,
    session: Option<Session>,
    seed: Option<u64>,
    sessions_started: u64,
}

impl<S: StudySource> StudyDriver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            session: None,
            seed: None,
            sessions_started: 0,
        }
    }

    /// Deterministic shuffles, for tests and reproducible runs.
    pub fn with_seed(source: S, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(source)
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current session for rendering.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Start a session for `learner` (or anonymously) in `category`.
    pub async fn start_session(
        &mut self,
        learner: Option<LearnerId>,
        category: &str,
    ) -> Result<(), SourceError> {
        let rng = study_rng(self.seed.map(|seed| seed.wrapping_add(self.sessions_started)));
        self.sessions_started += 1;

        tracing::info!(category, learner = ?learner, "starting study session");

        let mut session = Session::new(learner, category, rng);
        let pending = session.start();
        self.session = Some(session);
        self.run(pending).await
    }

    /// Select an option of the active question, persisting the schedule update.
    pub async fn select_answer(&mut self, index: usize) -> Result<Selection, SourceError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Selection::Ignored);
        };

        let selection = session.select_answer(index, Utc::now());
        if let Selection::Accepted {
            dispatch: Some(dispatch),
            ..
        } = &selection
        {
            self.run(vec![dispatch.clone()]).await?;
        }

        Ok(selection)
    }

    /// Advance past an answered question. Returns whether the session moved on.
    pub fn continue_to_next(&mut self) -> bool {
        self.session
            .as_mut()
            .map(Session::continue_to_next)
            .unwrap_or(false)
    }

    async fn run(&mut self, pending: Vec<Dispatch>) -> Result<(), SourceError> {
        let mut pending: VecDeque<Dispatch> = pending.into();

        while let Some(Dispatch { ticket, request }) = pending.pop_front() {
            let result = self.perform(request).await;

            let Some(session) = self.session.as_mut() else {
                break;
            };
            pending.extend(session.resolve(ticket, result, Utc::now()));

            if let Some(error) = session.error() {
                return Err(error.clone());
            }
        }

        Ok(())
    }

    async fn perform(&self, request: Request) -> Result<Response, SourceError> {
        match request {
            Request::FetchDueItems { learner, category } => self
                .source
                .fetch_due_study_items(&learner, &category)
                .await
                .map(Response::DueItems),
            Request::FetchCategoryWords { category } => self
                .source
                .fetch_category_words(&category)
                .await
                .map(Response::CategoryWords),
            Request::CreateStudyItems {
                learner,
                word_ids,
                due,
            } => self
                .source
                .create_study_items(&learner, &word_ids, due)
                .await
                .map(Response::ItemsCreated),
            Request::UpdateStudyItem {
                learner,
                item_id,
                due,
                interval,
            } => self
                .source
                .update_study_item(&learner, item_id, due, interval)
                .await
                .map(|()| Response::ItemUpdated),
        }
    }
}
