//! TUI application state.

use std::path::PathBuf;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use fitscribe_core::plan::{
    Day, EditOutcome, MoveDirection, PlanFormat, PlanMetadata, Program, save_program,
};
use fitscribe_core::{EXAMPLE_PROMPTS, MAX_PROMPT_CHARS, Session, View};

/// Application state for the TUI.
pub struct App {
    pub session: Session,
    /// Where `s` saves the plan, if anywhere.
    pub file: Option<PathBuf>,
    pub format: PlanFormat,
    /// Prompt being typed on the prompt view.
    pub input: String,
    /// Index into [`EXAMPLE_PROMPTS`] for the next Tab press.
    pub next_example: usize,
    pub selected_week: usize,
    pub selected_day: usize,
    pub selected_exercise: usize,
    /// Unsaved edits exist.
    pub dirty: bool,
    pub show_help: bool,
    pub should_quit: bool,
    /// Set after a quit attempt with unsaved edits.
    pub confirm_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(session: Session, file: Option<PathBuf>, format: PlanFormat) -> Self {
        Self {
            session,
            file,
            format,
            input: String::new(),
            next_example: 0,
            selected_week: 0,
            selected_day: 0,
            selected_exercise: 0,
            dirty: false,
            show_help: false,
            should_quit: false,
            confirm_quit: false,
            status_message: None,
        }
    }

    pub fn view(&self) -> View {
        self.session.view()
    }

    pub fn plan(&self) -> Option<&Program> {
        self.session.plan()
    }

    pub fn metadata(&self) -> Option<PlanMetadata> {
        self.session.metadata()
    }

    pub fn current_day(&self) -> Option<&Day> {
        self.plan()?
            .weeks
            .get(self.selected_week)?
            .days
            .get(self.selected_day)
    }

    // -- Prompt input --

    pub fn push_char(&mut self, c: char) {
        if self.input.chars().count() < MAX_PROMPT_CHARS {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Replace the input with the next example prompt.
    pub fn cycle_example(&mut self) {
        self.input = EXAMPLE_PROMPTS[self.next_example % EXAMPLE_PROMPTS.len()].to_owned();
        self.next_example = (self.next_example + 1) % EXAMPLE_PROMPTS.len();
    }

    /// Generate a plan from the current input.
    pub async fn submit(&mut self) {
        let input = self.input.clone();
        let result = self
            .session
            .submit_prompt(&input, &CancellationToken::new())
            .await
            .map(|_| ());
        self.after_generation(result.map_err(Into::into));
    }

    /// Retry the last failed prompt.
    pub async fn retry(&mut self) {
        let result = self
            .session
            .retry(&CancellationToken::new())
            .await
            .map(|_| ());
        self.after_generation(result.map_err(Into::into));
    }

    fn after_generation(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                self.reset_cursor();
                self.dirty = true;
                let warnings = self.session.warnings().len();
                self.status_message = Some(if warnings == 0 {
                    "Workout plan generated successfully".to_owned()
                } else {
                    format!("Workout plan generated with {warnings} warning(s)")
                });
            }
            Err(e) => {
                let hint = if self.session.failed_prompt().is_some() {
                    " (Ctrl-R to retry)"
                } else {
                    ""
                };
                self.status_message = Some(format!("{e}{hint}"));
            }
        }
    }

    // -- Plan navigation --

    fn reset_cursor(&mut self) {
        self.selected_week = 0;
        self.selected_day = 0;
        self.selected_exercise = 0;
    }

    fn week_count(&self) -> usize {
        self.plan().map_or(0, |p| p.weeks.len())
    }

    fn day_count(&self) -> usize {
        self.plan()
            .and_then(|p| p.weeks.get(self.selected_week))
            .map_or(0, |w| w.days.len())
    }

    fn exercise_count(&self) -> usize {
        self.current_day().map_or(0, |d| d.exercises.len())
    }

    pub fn next_week(&mut self) {
        if self.selected_week + 1 < self.week_count() {
            self.selected_week += 1;
            self.clamp_cursor();
        }
    }

    pub fn prev_week(&mut self) {
        if self.selected_week > 0 {
            self.selected_week -= 1;
            self.clamp_cursor();
        }
    }

    pub fn next_day(&mut self) {
        if self.selected_day + 1 < self.day_count() {
            self.selected_day += 1;
            self.selected_exercise = 0;
        }
    }

    pub fn prev_day(&mut self) {
        if self.selected_day > 0 {
            self.selected_day -= 1;
            self.selected_exercise = 0;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_exercise + 1 < self.exercise_count() {
            self.selected_exercise += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_exercise > 0 {
            self.selected_exercise -= 1;
        }
    }

    fn clamp_cursor(&mut self) {
        self.selected_day = self.selected_day.min(self.day_count().saturating_sub(1));
        self.selected_exercise = self
            .selected_exercise
            .min(self.exercise_count().saturating_sub(1));
    }

    // -- Edits --

    /// Swap the selected exercise with its neighbour; the cursor follows it.
    pub fn move_selected(&mut self, direction: MoveDirection) {
        let (w, d, e) = (self.selected_week, self.selected_day, self.selected_exercise);
        if self.exercise_count() == 0 {
            return;
        }
        match self.session.editor_mut().move_exercise(w, d, e, direction) {
            Ok(EditOutcome::Applied) => {
                self.selected_exercise = match direction {
                    MoveDirection::Up => e - 1,
                    MoveDirection::Down => e + 1,
                };
                self.dirty = true;
                self.status_message = Some(match direction {
                    MoveDirection::Up => "Exercise moved up".to_owned(),
                    MoveDirection::Down => "Exercise moved down".to_owned(),
                });
            }
            Ok(_) => {}
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    pub fn delete_selected(&mut self) {
        let (w, d, e) = (self.selected_week, self.selected_day, self.selected_exercise);
        if self.exercise_count() == 0 {
            return;
        }
        match self.session.editor_mut().delete_exercise(w, d, e) {
            Ok(EditOutcome::Applied) => {
                self.dirty = true;
                self.clamp_cursor();
                self.status_message = Some("Exercise deleted successfully".to_owned());
            }
            Ok(_) => {}
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    /// Write the plan back to [`App::file`].
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.file.clone() else {
            self.status_message =
                Some("No file to save to; run `fitscribe view FILE`".to_owned());
            return Ok(());
        };
        let Some(plan) = self.session.plan() else {
            return Ok(());
        };
        save_program(plan, &path, self.format)?;
        self.dirty = false;
        self.status_message = Some(format!("Saved to {}", path.display()));
        Ok(())
    }

    /// Discard the plan and go back to the prompt.
    pub fn new_plan(&mut self) {
        self.session.new_plan();
        self.reset_cursor();
        self.dirty = false;
        self.confirm_quit = false;
    }

    /// Quit, asking once for confirmation when there are unsaved edits.
    pub fn request_quit(&mut self) {
        if self.dirty && !self.confirm_quit && self.file.is_some() {
            self.confirm_quit = true;
            self.status_message =
                Some("Unsaved changes: press s to save or q again to quit".to_owned());
        } else {
            self.should_quit = true;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
