//! Structural validation of a [`Program`].
//!
//! Walks the whole tree and accumulates every defect as a human-readable
//! message. The result is advisory: a program with warnings is still
//! usable. Message wording is stable and indices are 1-based.

use super::model::Program;

/// Validate `plan`, returning one message per defect (empty means valid).
///
/// Checks, in order: program name, program description, at least one week,
/// then per week at least one day, per day a title, and per exercise a
/// name, at least one set and a reps value.
pub fn validate_plan(plan: &Program) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(&plan.name) {
        errors.push("Program name is required".to_owned());
    }

    if is_blank(&plan.description) {
        errors.push("Program description is required".to_owned());
    }

    if plan.weeks.is_empty() {
        errors.push("At least one week is required".to_owned());
    }

    for (w, week) in plan.weeks.iter().enumerate() {
        let w = w + 1;
        if week.days.is_empty() {
            errors.push(format!("Week {w} must have at least one day"));
        }

        for (d, day) in week.days.iter().enumerate() {
            let d = d + 1;
            if is_blank(&day.title) {
                errors.push(format!("Week {w}, Day {d} must have a title"));
            }

            for (e, exercise) in day.exercises.iter().enumerate() {
                let e = e + 1;
                if is_blank(&exercise.exercise_name) {
                    errors.push(format!("Week {w}, Day {d}, Exercise {e} must have a name"));
                }
                if exercise.sets < 1 {
                    errors.push(format!(
                        "Week {w}, Day {d}, Exercise {e} must have at least 1 set"
                    ));
                }
                if is_blank(&exercise.reps) {
                    errors.push(format!(
                        "Week {w}, Day {d}, Exercise {e} must have reps specified"
                    ));
                }
            }
        }
    }

    errors
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
