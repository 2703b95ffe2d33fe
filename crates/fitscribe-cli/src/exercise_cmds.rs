//! CLI handlers for `fitscribe exercise` subcommands.
//!
//! Positions on the command line are 1-based, matching validator messages.
//! They are converted to the zero-based indices the editor uses, and the
//! plan file is rewritten in its own format after every applied edit.

use std::path::Path;

use anyhow::{Context, Result, bail};

use fitscribe_core::plan::{
    EditError, EditOutcome, Exercise, ExercisePatch, MoveDirection, PlanEditor, PlanFormat,
    circuit_label, load_program, save_program,
};

use crate::{Direction, ExerciseCommands, Position};

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch an `ExerciseCommands` variant to the appropriate handler.
pub fn run_exercise_command(command: ExerciseCommands) -> Result<()> {
    match command {
        ExerciseCommands::Update {
            file,
            at,
            exercise,
            circuit,
            name,
            sets,
            reps,
            rest,
            notes,
        } => {
            let patch = ExercisePatch {
                circuit,
                exercise_name: name,
                sets,
                reps,
                rest,
                notes,
            };
            if patch.is_empty() {
                bail!("nothing to update; pass at least one of --circuit, --name, --sets, --reps, --rest, --notes");
            }
            let e = zero_based("exercise", exercise)?;
            edit_file(&file, at, |editor, w, d| editor.update_exercise(w, d, e, &patch))
        }
        ExerciseCommands::Delete { file, at, exercise } => {
            let e = zero_based("exercise", exercise)?;
            edit_file(&file, at, |editor, w, d| editor.delete_exercise(w, d, e))
        }
        ExerciseCommands::Reorder { file, at, from, to } => {
            let from = zero_based("from", from)?;
            let to = zero_based("to", to)?;
            edit_file(&file, at, |editor, w, d| {
                editor.reorder_exercise(w, d, from, to)
            })
        }
        ExerciseCommands::Add {
            file,
            at,
            name,
            sets,
            reps,
            circuit,
            rest,
            notes,
        } => edit_file(&file, at, |editor, w, d| {
            let circuit = circuit.unwrap_or_else(|| {
                let len = editor
                    .plan()
                    .and_then(|p| p.weeks.get(w))
                    .and_then(|week| week.days.get(d))
                    .map_or(0, |day| day.exercises.len());
                circuit_label(len)
            });
            let mut exercise = Exercise::new(circuit, name, sets, reps);
            exercise.rest = rest;
            exercise.notes = notes.unwrap_or_default();
            editor.add_exercise(w, d, exercise)
        }),
        ExerciseCommands::Move {
            file,
            at,
            exercise,
            direction,
        } => {
            let e = zero_based("exercise", exercise)?;
            let direction = match direction {
                Direction::Up => MoveDirection::Up,
                Direction::Down => MoveDirection::Down,
            };
            edit_file(&file, at, |editor, w, d| {
                editor.move_exercise(w, d, e, direction)
            })
        }
    }
}

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

/// Convert a 1-based CLI position to a zero-based index.
pub fn zero_based(what: &str, position: usize) -> Result<usize> {
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("--{what} is 1-based; 0 is not a valid position"),
    }
}

/// Load `file`, apply one edit at the given week and day, and save it back.
fn edit_file(
    file: &Path,
    at: Position,
    edit: impl FnOnce(&mut PlanEditor, usize, usize) -> Result<EditOutcome, EditError>,
) -> Result<()> {
    let week = zero_based("week", at.week)?;
    let day = zero_based("day", at.day)?;

    let program = load_program(file)
        .with_context(|| format!("failed to load plan file: {}", file.display()))?;
    let format = PlanFormat::from_path(file).unwrap_or_default();
    let mut editor = PlanEditor::with_plan(program);

    let outcome = edit(&mut editor, week, day).with_context(|| {
        format!(
            "cannot edit week {} day {} of {}",
            at.week,
            at.day,
            file.display()
        )
    })?;

    match outcome {
        EditOutcome::Applied => {
            let Some(program) = editor.plan() else {
                bail!("plan disappeared during edit");
            };
            save_program(program, file, format)
                .with_context(|| format!("failed to save plan file: {}", file.display()))?;
            println!("Updated {}.", file.display());
        }
        EditOutcome::Unchanged => {
            println!("Nothing to change; exercise is already at the edge of the day.");
        }
        EditOutcome::NoPlan => bail!("no plan loaded"),
    }
    Ok(())
}
