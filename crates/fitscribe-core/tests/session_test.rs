//! Prompt-to-plan flow through [`Session`] with the mock generator.

use tokio_util::sync::CancellationToken;

use fitscribe_core::plan::{
    Catalog, EditOutcome, GenerationError, LatencyConfig, MockGenerator, MoveDirection,
    SynthesisError,
};
use fitscribe_core::{Session, SessionError, View};
use fitscribe_test_utils::SequenceRandom;

fn session() -> Session {
    Session::new(Box::new(MockGenerator::new(
        Catalog::builtin().unwrap(),
        LatencyConfig::none(),
        Box::new(SequenceRandom::default()),
    )))
}

#[tokio::test]
async fn generate_edit_and_start_over() {
    let mut session = session();
    let cancel = CancellationToken::new();
    assert_eq!(session.view(), View::Prompt);

    let program = session
        .submit_prompt("  2-week cardio plan  ", &cancel)
        .await
        .unwrap();
    assert_eq!(program.name, "Cardio Conditioning Challenge");
    assert_eq!(session.view(), View::Plan);
    assert!(session.warnings().is_empty());

    let before = session.metadata().unwrap();
    assert_eq!(before.total_weeks, 2);
    assert_eq!(before.total_workout_days, 10);

    let outcome = session
        .editor_mut()
        .move_exercise(0, 0, 1, MoveDirection::Up)
        .unwrap();
    assert_eq!(outcome, EditOutcome::Applied);
    assert!(session.plan().unwrap().updated_at.is_some());

    session.new_plan();
    assert_eq!(session.view(), View::Prompt);
    assert!(session.plan().is_none());
    assert_eq!(
        session.editor_mut().delete_exercise(0, 0, 0).unwrap(),
        EditOutcome::NoPlan
    );
}

#[tokio::test]
async fn failed_generation_is_retryable_with_same_prompt() {
    let mut session = session();
    let cancel = CancellationToken::new();

    let err = session
        .submit_prompt("a 60 week marathon block", &cancel)
        .await
        .unwrap_err();
    let SessionError::Generation(GenerationError::Failed { prompt, source }) = &err else {
        panic!("expected generation failure, got {err:?}");
    };
    assert_eq!(prompt, "a 60 week marathon block");
    assert!(matches!(source, SynthesisError::TooManyWeeks { requested: 60, .. }));
    assert_eq!(session.view(), View::Prompt);
    assert_eq!(session.failed_prompt(), Some("a 60 week marathon block"));

    // Same prompt, same outcome.
    assert!(session.retry(&cancel).await.is_err());
    assert_eq!(session.failed_prompt(), Some("a 60 week marathon block"));
}

#[tokio::test]
async fn cancelled_generation_keeps_prompt() {
    let mut session = session();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = session.submit_prompt("strength", &cancel).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Generation(GenerationError::Cancelled { .. })
    ));
    assert_eq!(session.failed_prompt(), Some("strength"));

    let program = session.retry(&CancellationToken::new()).await.unwrap();
    assert_eq!(program.name, "Strength Mastery Program");
}
