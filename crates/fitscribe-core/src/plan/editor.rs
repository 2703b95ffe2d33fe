//! Exercise editing over an in-memory [`Program`].
//!
//! Exercises are addressed by zero-based positional indices
//! `(week, day, exercise)`. These are not stable identifiers: they shift
//! after a delete or reorder, so callers must re-resolve them after every
//! operation.
//!
//! The free functions operate on a `&mut Program` and reject out-of-range
//! indices without touching the plan. [`PlanEditor`] wraps them around an
//! optional program, turning calls on an absent program into silent no-ops
//! and logging each applied mutation.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use super::model::{Exercise, ExercisePatch, Program};

/// Errors from an edit addressed at a position that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("week index {week} is out of range ({len} weeks)")]
    WeekOutOfRange { week: usize, len: usize },

    #[error("day index {day} is out of range ({len} days in week index {week})")]
    DayOutOfRange { week: usize, day: usize, len: usize },

    #[error("exercise index {exercise} is out of range ({len} exercises)")]
    ExerciseOutOfRange { exercise: usize, len: usize },

    #[error("target index {to} is out of range (at most {max})")]
    TargetOutOfRange { to: usize, max: usize },
}

/// Direction for [`move_exercise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

fn day_exercises(
    plan: &mut Program,
    week: usize,
    day: usize,
) -> Result<&mut Vec<Exercise>, EditError> {
    let weeks_len = plan.weeks.len();
    let w = plan.weeks.get_mut(week).ok_or(EditError::WeekOutOfRange {
        week,
        len: weeks_len,
    })?;
    let days_len = w.days.len();
    let d = w.days.get_mut(day).ok_or(EditError::DayOutOfRange {
        week,
        day,
        len: days_len,
    })?;
    Ok(&mut d.exercises)
}

fn check_exercise(exercises: &[Exercise], exercise: usize) -> Result<(), EditError> {
    if exercise >= exercises.len() {
        return Err(EditError::ExerciseOutOfRange {
            exercise,
            len: exercises.len(),
        });
    }
    Ok(())
}

/// Merge `patch` into the exercise at the given position.
pub fn update_exercise(
    plan: &mut Program,
    week: usize,
    day: usize,
    exercise: usize,
    patch: &ExercisePatch,
) -> Result<(), EditError> {
    let exercises = day_exercises(plan, week, day)?;
    check_exercise(exercises, exercise)?;
    patch.apply_to(&mut exercises[exercise]);
    Ok(())
}

/// Remove and return the exercise at the given position. Later exercises
/// shift left by one.
pub fn delete_exercise(
    plan: &mut Program,
    week: usize,
    day: usize,
    exercise: usize,
) -> Result<Exercise, EditError> {
    let exercises = day_exercises(plan, week, day)?;
    check_exercise(exercises, exercise)?;
    Ok(exercises.remove(exercise))
}

/// Move the exercise at `from` so it ends up at `to` in the same day.
///
/// `to` is an index into the list after removal, so `to == len - 1`
/// appends at the end.
pub fn reorder_exercise(
    plan: &mut Program,
    week: usize,
    day: usize,
    from: usize,
    to: usize,
) -> Result<(), EditError> {
    let exercises = day_exercises(plan, week, day)?;
    check_exercise(exercises, from)?;
    let max = exercises.len() - 1;
    if to > max {
        return Err(EditError::TargetOutOfRange { to, max });
    }
    let moved = exercises.remove(from);
    exercises.insert(to, moved);
    Ok(())
}

/// Append `exercise` to the end of the day.
pub fn add_exercise(
    plan: &mut Program,
    week: usize,
    day: usize,
    exercise: Exercise,
) -> Result<(), EditError> {
    day_exercises(plan, week, day)?.push(exercise);
    Ok(())
}

/// Swap the exercise with its neighbour. Returns `false` when it is already
/// at the boundary in that direction.
pub fn move_exercise(
    plan: &mut Program,
    week: usize,
    day: usize,
    exercise: usize,
    direction: MoveDirection,
) -> Result<bool, EditError> {
    let exercises = day_exercises(plan, week, day)?;
    check_exercise(exercises, exercise)?;
    let target = match direction {
        MoveDirection::Up => exercise.checked_sub(1),
        MoveDirection::Down => Some(exercise + 1).filter(|&i| i < exercises.len()),
    };
    match target {
        Some(t) => {
            exercises.swap(exercise, t);
            Ok(true)
        }
        None => Ok(false),
    }
}

// ---------------------------------------------------------------------------
// PlanEditor
// ---------------------------------------------------------------------------

/// Result of a [`PlanEditor`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The plan was mutated.
    Applied,
    /// The edit was valid but changed nothing.
    Unchanged,
    /// There is no plan to edit; nothing happened.
    NoPlan,
}

/// Holds the program being edited, if any.
#[derive(Debug, Clone, Default)]
pub struct PlanEditor {
    plan: Option<Program>,
}

impl PlanEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(plan: Program) -> Self {
        Self { plan: Some(plan) }
    }

    pub fn plan(&self) -> Option<&Program> {
        self.plan.as_ref()
    }

    /// Replace the held program.
    pub fn load(&mut self, plan: Program) {
        self.plan = Some(plan);
    }

    /// Drop the held program, returning it.
    pub fn discard(&mut self) -> Option<Program> {
        self.plan.take()
    }

    pub fn update_exercise(
        &mut self,
        week: usize,
        day: usize,
        exercise: usize,
        patch: &ExercisePatch,
    ) -> Result<EditOutcome, EditError> {
        self.apply("Exercise updated successfully", |plan| {
            update_exercise(plan, week, day, exercise, patch).map(|()| true)
        })
    }

    pub fn delete_exercise(
        &mut self,
        week: usize,
        day: usize,
        exercise: usize,
    ) -> Result<EditOutcome, EditError> {
        self.apply("Exercise deleted successfully", |plan| {
            delete_exercise(plan, week, day, exercise).map(|_| true)
        })
    }

    pub fn reorder_exercise(
        &mut self,
        week: usize,
        day: usize,
        from: usize,
        to: usize,
    ) -> Result<EditOutcome, EditError> {
        self.apply("Exercise reordered successfully", |plan| {
            reorder_exercise(plan, week, day, from, to).map(|()| true)
        })
    }

    pub fn add_exercise(
        &mut self,
        week: usize,
        day: usize,
        exercise: Exercise,
    ) -> Result<EditOutcome, EditError> {
        self.apply("Exercise added successfully", |plan| {
            add_exercise(plan, week, day, exercise).map(|()| true)
        })
    }

    pub fn move_exercise(
        &mut self,
        week: usize,
        day: usize,
        exercise: usize,
        direction: MoveDirection,
    ) -> Result<EditOutcome, EditError> {
        let message = match direction {
            MoveDirection::Up => "Exercise moved up",
            MoveDirection::Down => "Exercise moved down",
        };
        self.apply(message, |plan| {
            move_exercise(plan, week, day, exercise, direction)
        })
    }

    fn apply(
        &mut self,
        message: &str,
        edit: impl FnOnce(&mut Program) -> Result<bool, EditError>,
    ) -> Result<EditOutcome, EditError> {
        let Some(plan) = self.plan.as_mut() else {
            return Ok(EditOutcome::NoPlan);
        };
        if !edit(plan)? {
            return Ok(EditOutcome::Unchanged);
        }
        plan.updated_at = Some(Utc::now());
        info!("{message}");
        Ok(EditOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::model::{Day, Week};

    fn names(plan: &Program) -> Vec<&str> {
        plan.weeks[0].days[0]
            .exercises
            .iter()
            .map(|e| e.exercise_name.as_str())
            .collect()
    }

    fn three_exercise_plan() -> Program {
        let mut plan = Program::new("P", "D");
        plan.weeks.push(Week::new(
            1,
            vec![
                Day::new(
                    1,
                    "Upper Body",
                    vec![
                        Exercise::new("A", "e0", 3, "10"),
                        Exercise::new("B", "e1", 3, "10"),
                        Exercise::new("C", "e2", 3, "10"),
                    ],
                ),
                Day::new(2, "Lower Body", vec![Exercise::new("A", "other", 3, "10")]),
            ],
        ));
        plan
    }

    #[test]
    fn reorder_first_to_last() {
        let mut plan = three_exercise_plan();
        reorder_exercise(&mut plan, 0, 0, 0, 2).unwrap();
        assert_eq!(names(&plan), vec!["e1", "e2", "e0"]);
    }

    #[test]
    fn reorder_last_to_first() {
        let mut plan = three_exercise_plan();
        reorder_exercise(&mut plan, 0, 0, 2, 0).unwrap();
        assert_eq!(names(&plan), vec!["e2", "e0", "e1"]);
    }

    #[test]
    fn reorder_rejects_target_past_end() {
        let mut plan = three_exercise_plan();
        let err = reorder_exercise(&mut plan, 0, 0, 0, 3).unwrap_err();
        assert_eq!(err, EditError::TargetOutOfRange { to: 3, max: 2 });
        assert_eq!(names(&plan), vec!["e0", "e1", "e2"]);
    }

    #[test]
    fn delete_shifts_left() {
        let mut plan = three_exercise_plan();
        let removed = delete_exercise(&mut plan, 0, 0, 1).unwrap();
        assert_eq!(removed.exercise_name, "e1");
        assert_eq!(names(&plan), vec!["e0", "e2"]);
    }

    #[test]
    fn out_of_range_leaves_siblings_untouched() {
        let mut plan = three_exercise_plan();
        let before = plan.clone();
        assert!(matches!(
            delete_exercise(&mut plan, 5, 0, 0),
            Err(EditError::WeekOutOfRange { week: 5, len: 1 })
        ));
        assert!(matches!(
            update_exercise(&mut plan, 0, 9, 0, &ExercisePatch::default()),
            Err(EditError::DayOutOfRange { .. })
        ));
        assert!(matches!(
            delete_exercise(&mut plan, 0, 0, 3),
            Err(EditError::ExerciseOutOfRange { exercise: 3, len: 3 })
        ));
        assert_eq!(plan, before);
    }

    #[test]
    fn update_merges_fields() {
        let mut plan = three_exercise_plan();
        let patch = ExercisePatch {
            exercise_name: Some("Dips".to_owned()),
            ..ExercisePatch::default()
        };
        update_exercise(&mut plan, 0, 0, 1, &patch).unwrap();
        let e = &plan.weeks[0].days[0].exercises[1];
        assert_eq!(e.exercise_name, "Dips");
        assert_eq!(e.circuit, "B");
        assert_eq!(e.sets, 3);
    }

    #[test]
    fn add_appends_to_rest_day() {
        let mut plan = three_exercise_plan();
        plan.weeks[0].days.push(Day::rest(3));
        add_exercise(&mut plan, 0, 2, Exercise::new("A", "Walk", 1, "20min")).unwrap();
        assert_eq!(plan.weeks[0].days[2].exercises.len(), 1);
        assert!(!plan.weeks[0].days[2].is_rest_day());
    }

    #[test]
    fn move_swaps_with_neighbour() {
        let mut plan = three_exercise_plan();
        assert!(move_exercise(&mut plan, 0, 0, 1, MoveDirection::Up).unwrap());
        assert_eq!(names(&plan), vec!["e1", "e0", "e2"]);
        assert!(!move_exercise(&mut plan, 0, 0, 0, MoveDirection::Up).unwrap());
        assert!(!move_exercise(&mut plan, 0, 0, 2, MoveDirection::Down).unwrap());
        assert!(move_exercise(&mut plan, 0, 0, 0, MoveDirection::Down).unwrap());
        assert_eq!(names(&plan), vec!["e0", "e1", "e2"]);
    }

    #[test]
    fn editor_without_plan_is_silent_noop() {
        let mut editor = PlanEditor::new();
        assert_eq!(
            editor.delete_exercise(0, 0, 0).unwrap(),
            EditOutcome::NoPlan
        );
        assert_eq!(
            editor
                .add_exercise(3, 3, Exercise::new("A", "x", 1, "1"))
                .unwrap(),
            EditOutcome::NoPlan
        );
        assert!(editor.plan().is_none());
    }

    #[test]
    fn editor_stamps_updated_at_only_when_applied() {
        let mut editor = PlanEditor::with_plan(three_exercise_plan());
        assert_eq!(
            editor
                .move_exercise(0, 0, 0, MoveDirection::Up)
                .unwrap(),
            EditOutcome::Unchanged
        );
        assert!(editor.plan().unwrap().updated_at.is_none());

        assert_eq!(
            editor.reorder_exercise(0, 0, 0, 2).unwrap(),
            EditOutcome::Applied
        );
        assert!(editor.plan().unwrap().updated_at.is_some());
        assert_eq!(names(editor.plan().unwrap()), vec!["e1", "e2", "e0"]);
    }

    #[test]
    fn editor_discard_clears_plan() {
        let mut editor = PlanEditor::with_plan(three_exercise_plan());
        assert!(editor.discard().is_some());
        assert!(editor.plan().is_none());
        assert!(editor.discard().is_none());
    }
}
