//! Integration tests for the mock generator and the validator/metadata
//! pipeline it feeds.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use fitscribe_core::EXAMPLE_PROMPTS;
use fitscribe_core::plan::{
    Catalog, Difficulty, FocusTag, GenerationError, LatencyConfig, MockGenerator, PlanGenerator,
    SeededRandom, summarize, validate_plan,
};
use fitscribe_test_utils::SequenceRandom;

fn generator(rng: SequenceRandom) -> MockGenerator {
    MockGenerator::new(
        Catalog::builtin().expect("builtin catalog"),
        LatencyConfig::none(),
        Box::new(rng),
    )
}

#[tokio::test]
async fn strength_and_conditioning_prompt() {
    let program = generator(SequenceRandom::default())
        .generate(EXAMPLE_PROMPTS[0], &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(program.name, "Strength Mastery Program");
    assert!(program.description.contains("intermediate-level"));
    assert_eq!(program.weeks.len(), 6);

    for week in &program.weeks {
        assert_eq!(week.days.len(), 6);
        let rest: Vec<u32> = week
            .days
            .iter()
            .filter(|d| d.is_rest_day())
            .map(|d| d.day_number)
            .collect();
        assert_eq!(rest, vec![3]);
        let titles: Vec<&str> = week.days.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Upper Body Power",
                "Lower Body Strength",
                "Rest Day",
                "Pull Focus",
                "Full Body",
                "Core & Conditioning",
            ]
        );
    }

    assert!(validate_plan(&program).is_empty());
}

#[tokio::test]
async fn generated_plan_metadata() {
    let program = generator(SequenceRandom::default())
        .generate(EXAMPLE_PROMPTS[0], &CancellationToken::new())
        .await
        .unwrap();
    let meta = summarize(&program);
    assert_eq!(meta.total_weeks, 6);
    assert_eq!(meta.total_workout_days, 30);
    assert_eq!(meta.total_exercises, 120);
    assert_eq!(meta.difficulty, Difficulty::Beginner);
    assert_eq!(
        meta.focus,
        vec![
            FocusTag::UpperBody,
            FocusTag::CompoundMovements,
            FocusTag::LowerBody,
            FocusTag::Strength,
            FocusTag::Core,
        ]
    );
}

#[tokio::test]
async fn beginner_home_prompt_uses_general_pool() {
    let program = generator(SequenceRandom::new([6; 64]))
        .generate(EXAMPLE_PROMPTS[1], &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(program.name, "Foundation Builder");
    assert_eq!(program.weeks.len(), 4);
    let day1 = &program.weeks[0].days[0];
    assert_eq!(day1.exercises.len(), 6);
    assert_eq!(day1.exercises[0].exercise_name, "Push-ups");
    assert_eq!(day1.exercises[5].exercise_name, "Push-ups");
    assert_eq!(day1.exercises[0].reps, "12-15");
    assert_eq!(summarize(&program).difficulty, Difficulty::Intermediate);
}

#[tokio::test]
async fn every_example_prompt_produces_a_valid_plan() {
    let generator = MockGenerator::new(
        Catalog::builtin().unwrap(),
        LatencyConfig::none(),
        Box::new(SeededRandom::from_seed(42)),
    );
    for prompt in EXAMPLE_PROMPTS {
        let program = generator
            .generate(prompt, &CancellationToken::new())
            .await
            .unwrap();
        assert!(validate_plan(&program).is_empty(), "{prompt}");
        for day in program.days().filter(|d| !d.is_rest_day()) {
            assert!((4..=6).contains(&day.exercises.len()));
        }
    }
}

#[tokio::test]
async fn cancellation_during_delay() {
    let generator = MockGenerator::new(
        Catalog::builtin().unwrap(),
        LatencyConfig::new(Duration::from_secs(30), Duration::ZERO),
        Box::new(SequenceRandom::default()),
    );
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });
    let err = generator.generate("cardio", &cancel).await.unwrap_err();
    assert!(matches!(err, GenerationError::Cancelled { .. }));
}

#[tokio::test]
async fn latency_is_simulated() {
    let generator = MockGenerator::new(
        Catalog::builtin().unwrap(),
        LatencyConfig::new(Duration::from_millis(40), Duration::from_millis(20)),
        Box::new(SequenceRandom::new([10])),
    );
    let start = std::time::Instant::now();
    generator
        .generate("home workout", &CancellationToken::new())
        .await
        .unwrap();
    assert!(start.elapsed() >= Duration::from_millis(50));
}
