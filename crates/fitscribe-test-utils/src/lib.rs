//! Shared test utilities for fitscribe integration tests.
//!
//! Fixture builders for programs of a known shape, a scripted
//! [`RandomSource`], and a helper that writes a plan document into a
//! temporary directory.

use std::collections::VecDeque;
use std::path::PathBuf;

use fitscribe_core::plan::{
    Day, Exercise, PlanFormat, Program, RandomSource, Week, circuit_label, save_program,
};
use tempfile::TempDir;

/// Exercise with the given name and otherwise valid fields.
pub fn exercise(name: &str) -> Exercise {
    Exercise::new("A", name, 3, "10")
}

/// Training day with `count` exercises named `"{prefix} {i}"`.
pub fn day(number: u32, title: &str, prefix: &str, count: usize) -> Day {
    let exercises = (0..count)
        .map(|i| Exercise::new(circuit_label(i), format!("{prefix} {i}"), 3, "10"))
        .collect();
    Day::new(number, title, exercises)
}

/// Program with `weeks` weeks of `days_per_week` days, each with
/// `exercises_per_day` exercises. Every day is titled "Training".
pub fn uniform_program(weeks: u32, days_per_week: u32, exercises_per_day: usize) -> Program {
    let mut program = Program::new("Test Program", "A program for tests");
    for w in 1..=weeks {
        let days = (1..=days_per_week)
            .map(|d| day(d, "Training", "Exercise", exercises_per_day))
            .collect();
        program.weeks.push(Week::new(w, days));
    }
    program
}

/// One week, one day, exercises named `e0`, `e1`, ... `e{n-1}`.
pub fn single_day_program(n: usize) -> Program {
    let mut program = Program::new("Single Day", "One day only");
    let exercises = (0..n)
        .map(|i| Exercise::new(circuit_label(i), format!("e{i}"), 3, "10"))
        .collect();
    program
        .weeks
        .push(Week::new(1, vec![Day::new(1, "Upper Body", exercises)]));
    program
}

/// Exercise names of week 0, day 0.
pub fn first_day_names(program: &Program) -> Vec<String> {
    program.weeks[0].days[0]
        .exercises
        .iter()
        .map(|e| e.exercise_name.clone())
        .collect()
}

/// [`RandomSource`] that replays a fixed script, clamped to the requested
/// range. Falls back to the low bound once the script runs out.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    values: VecDeque<usize>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn pick(&mut self, low: usize, high: usize) -> usize {
        self.values
            .pop_front()
            .map(|v| v.clamp(low, high.max(low)))
            .unwrap_or(low)
    }
}

/// Write `program` to `plan.<ext>` in a fresh temporary directory.
///
/// The directory is removed when the returned [`TempDir`] is dropped.
pub fn write_plan_file(program: &Program, format: PlanFormat) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(format!("plan.{}", format.extension()));
    save_program(program, &path, format).expect("failed to write plan file");
    (dir, path)
}
