//! Plain-text rendering of programs for the terminal.

use std::fmt::Write as _;

use fitscribe_core::plan::{PlanMetadata, Program, format_duration};

/// Overview block: name, description, duration, counts, difficulty, focus.
pub fn overview(program: &Program, meta: &PlanMetadata) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", program.name);
    let _ = writeln!(out, "{}", program.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Duration:      {}", format_duration(meta.total_weeks));
    let _ = writeln!(out, "  Workout days:  {}", meta.total_workout_days);
    let _ = writeln!(out, "  Exercises:     {}", meta.total_exercises);
    let _ = writeln!(out, "  Difficulty:    {}", meta.difficulty);
    if !meta.focus.is_empty() {
        let focus: Vec<String> = meta.focus.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "  Focus:         {}", focus.join(", "));
    }
    if let Some(id) = program.id {
        let _ = writeln!(out, "  ID:            {id}");
    }
    out
}

/// Every week and day as a table of exercises.
pub fn program_table(program: &Program) -> String {
    let mut out = String::new();
    for week in &program.weeks {
        let _ = writeln!(out, "Week {}", week.week_number);
        let _ = writeln!(out, "{}", "=".repeat(78));
        for day in &week.days {
            let _ = writeln!(out, "Day {}: {}", day.day_number, day.title);
            if day.is_rest_day() {
                let _ = writeln!(out, "  Rest and recovery");
                let _ = writeln!(out);
                continue;
            }
            let _ = writeln!(
                out,
                "  {:<3} {:<4} {:<28} {:>4} {:<12} {:<8} NOTES",
                "#", "CIRC", "EXERCISE", "SETS", "REPS", "REST"
            );
            let _ = writeln!(out, "  {}", "-".repeat(76));
            for (i, e) in day.exercises.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {:<3} {:<4} {:<28} {:>4} {:<12} {:<8} {}",
                    i + 1,
                    e.circuit,
                    truncate(&e.exercise_name, 28),
                    e.sets,
                    truncate(&e.reps, 12),
                    e.rest.as_deref().unwrap_or("-"),
                    e.notes
                );
            }
            let _ = writeln!(out);
        }
    }
    out
}

/// Validation messages, or a confirmation when there are none.
pub fn warnings(messages: &[String]) -> String {
    if messages.is_empty() {
        return "Plan is valid.\n".to_owned();
    }
    let mut out = format!("{} validation warning(s):\n", messages.len());
    for m in messages {
        let _ = writeln!(out, "  - {m}");
    }
    out
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
