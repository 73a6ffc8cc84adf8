//! End-to-end sessions driven against an in-memory source.

mod common;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use common::{greetings, MemorySource};
use kaki_core::{LearnerId, Phase, Selection, SourceOperation, StudyDriver, StudyItem, StudySource};

fn correct_index<S: StudySource>(driver: &StudyDriver<S>) -> usize {
    let session = driver.session().unwrap();
    session.options().iter().position(|o| o.correct).unwrap()
}

fn wrong_index<S: StudySource>(driver: &StudyDriver<S>) -> usize {
    let session = driver.session().unwrap();
    session.options().iter().position(|o| !o.correct).unwrap()
}

#[tokio::test]
async fn anonymous_session_runs_to_completion() {
    let mut driver = StudyDriver::with_seed(MemorySource::with_words(greetings()), 42);
    driver.start_session(None, "greetings").await.unwrap();

    let mut seen = Vec::new();
    for remaining in [2, 1, 0] {
        let session = driver.session().unwrap();
        assert_eq!(session.phase(), Phase::QuestionActive);
        assert_eq!(session.queue().len(), remaining);
        let options = session.options();
        assert!((2..=4).contains(&options.len()));
        assert_eq!(options.iter().filter(|o| o.correct).count(), 1);
        let word = session.word().unwrap().clone();
        assert!(!seen.contains(&word.id));
        seen.push(word.id);

        let index = correct_index(&driver);
        let selection = driver.select_answer(index).await.unwrap();
        assert!(matches!(selection, Selection::Accepted { dispatch: None, .. }));
        assert!(driver.continue_to_next());
    }

    let session = driver.session().unwrap();
    assert!(session.is_complete());
    assert!(session.word().is_none());
    assert_eq!(driver.source().calls(), vec![SourceOperation::FetchCategoryWords]);
    assert!(driver.source().updates().is_empty());
}

#[tokio::test]
async fn missed_word_is_shown_again_before_the_end() {
    let mut driver = StudyDriver::with_seed(MemorySource::with_words(greetings()), 7);
    driver.start_session(None, "greetings").await.unwrap();

    let missed = driver.session().unwrap().word().unwrap().id;
    let index = wrong_index(&driver);
    driver.select_answer(index).await.unwrap();
    driver.continue_to_next();

    let mut shown = Vec::new();
    while let Some(word) = driver.session().unwrap().word().cloned() {
        shown.push(word.id);
        let index = correct_index(&driver);
        driver.select_answer(index).await.unwrap();
        driver.continue_to_next();
    }

    assert_eq!(shown.len(), 3);
    assert_eq!(shown.last(), Some(&missed));
    assert!(driver.session().unwrap().is_complete());
}

#[tokio::test]
async fn first_visit_registers_study_items() {
    let learner = LearnerId::new("taro");
    let mut driver = StudyDriver::with_seed(MemorySource::with_words(greetings()), 1);
    driver
        .start_session(Some(learner.clone()), "greetings")
        .await
        .unwrap();

    assert_eq!(
        driver.source().calls(),
        vec![
            SourceOperation::FetchDueItems,
            SourceOperation::FetchCategoryWords,
            SourceOperation::CreateStudyItems,
        ]
    );
    assert_eq!(driver.source().items_for(&learner).len(), 3);

    let session = driver.session().unwrap();
    assert_eq!(session.phase(), Phase::QuestionActive);
    assert!(session.current().unwrap().study_item().is_some());
}

#[tokio::test]
async fn correct_answer_persists_schedule() {
    let learner = LearnerId::new("hanako");
    let source = MemorySource::with_words(greetings());
    let word = greetings().remove(1);
    source.add_item(
        &learner,
        StudyItem {
            id: 55,
            word,
            due: Utc::now() - Duration::hours(1),
            interval: 1.0,
            easing_factor: 1.5,
        },
    );

    let mut driver = StudyDriver::with_seed(source, 3);
    driver
        .start_session(Some(learner.clone()), "greetings")
        .await
        .unwrap();

    let before = Utc::now();
    let index = correct_index(&driver);
    driver.select_answer(index).await.unwrap();
    let after = Utc::now();

    let updates = driver.source().updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].learner, learner);
    assert_eq!(updates[0].item_id, 55);
    assert_eq!(updates[0].interval, 1.5);
    assert!(updates[0].due >= before + Duration::days(1));
    assert!(updates[0].due <= after + Duration::days(1));

    assert!(driver.continue_to_next());
    assert!(driver.session().unwrap().is_complete());
}

#[tokio::test]
async fn incorrect_answer_resets_and_repeats_item() {
    let learner = LearnerId::new("hanako");
    let source = MemorySource::with_words(greetings());
    source.add_item(
        &learner,
        StudyItem {
            id: 56,
            word: greetings().remove(0),
            due: Utc::now() - Duration::days(2),
            interval: 6.0,
            easing_factor: 2.5,
        },
    );

    let mut driver = StudyDriver::with_seed(source, 4);
    driver
        .start_session(Some(learner.clone()), "greetings")
        .await
        .unwrap();

    let index = wrong_index(&driver);
    driver.select_answer(index).await.unwrap();
    let update = driver.source().updates().remove(0);
    assert_eq!(update.interval, 1.0);
    assert!(update.due <= Utc::now());

    assert!(driver.continue_to_next());
    let current = driver.session().unwrap().current().unwrap().study_item().unwrap().clone();
    assert_eq!(current.id, 56);
    assert_eq!(current.interval, 1.0);
}

#[tokio::test]
async fn source_failure_surfaces_verbatim_and_halts() {
    let source = MemorySource::with_words(greetings());
    source.fail(SourceOperation::FetchCategoryWords, "words service unavailable");

    let mut driver = StudyDriver::new(source);
    let error = driver.start_session(None, "greetings").await.unwrap_err();
    assert_eq!(error.to_string(), "words service unavailable");

    let session = driver.session().unwrap();
    assert!(session.is_halted());
    assert_eq!(session.phase(), Phase::SelectingSource);
    assert_eq!(driver.select_answer(0).await.unwrap(), Selection::Ignored);
}

#[tokio::test]
async fn failed_update_halts_session() {
    let learner = LearnerId::new("hanako");
    let source = MemorySource::with_words(greetings());
    source.add_item(
        &learner,
        StudyItem {
            id: 57,
            word: greetings().remove(2),
            due: Utc::now(),
            interval: 1.0,
            easing_factor: 2.0,
        },
    );
    source.fail(SourceOperation::UpdateStudyItem, "item 57 not found");

    let mut driver = StudyDriver::with_seed(source, 5);
    driver.start_session(Some(learner), "greetings").await.unwrap();

    let error = driver.select_answer(0).await.unwrap_err();
    assert_eq!(error.to_string(), "item 57 not found");
    assert!(!driver.continue_to_next());
    assert_eq!(driver.session().unwrap().phase(), Phase::QuestionAnswered);
}

#[tokio::test]
async fn new_category_after_empty_one() {
    let source = MemorySource::with_words(greetings());
    let mut driver = StudyDriver::with_seed(source, 6);
    driver.start_session(None, "unknown").await.unwrap();
    assert!(driver.session().unwrap().is_complete());

    driver.start_session(None, "greetings").await.unwrap();
    assert_eq!(driver.session().unwrap().phase(), Phase::QuestionActive);
}
