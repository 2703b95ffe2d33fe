//! Prompt-to-plan session.
//!
//! A [`Session`] drives the two-view flow: the user submits a prompt, the
//! generator produces a program, the program is validated and then held for
//! editing until the user goes back to write a new prompt.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::plan::editor::PlanEditor;
use crate::plan::generate::{GenerationError, PlanGenerator};
use crate::plan::metadata::{self, PlanMetadata};
use crate::plan::model::Program;
use crate::plan::validate::validate_plan;

/// Longest accepted prompt, in characters, after trimming.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Prompts offered to users who do not know where to start.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "A 6-week full-body strength and conditioning program for an intermediate lifter",
    "4-week beginner-friendly home workout routine with no equipment",
    "Advanced 8-week powerlifting program focusing on squat, bench, and deadlift",
    "High-intensity cardio and strength circuit for weight loss over 5 weeks",
];

/// Which view the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Prompt,
    Plan,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("prompt is {len} characters, at most {max} are allowed")]
    PromptTooLong { len: usize, max: usize },

    #[error("there is no failed prompt to retry")]
    NothingToRetry,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub struct Session {
    generator: Box<dyn PlanGenerator>,
    editor: PlanEditor,
    view: View,
    failed_prompt: Option<String>,
    warnings: Vec<String>,
}

impl Session {
    pub fn new(generator: Box<dyn PlanGenerator>) -> Self {
        Self {
            generator,
            editor: PlanEditor::new(),
            view: View::Prompt,
            failed_prompt: None,
            warnings: Vec::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn plan(&self) -> Option<&Program> {
        self.editor.plan()
    }

    pub fn editor(&self) -> &PlanEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PlanEditor {
        &mut self.editor
    }

    /// Validation messages for the current plan, as of generation.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Statistics of the current plan.
    pub fn metadata(&self) -> Option<PlanMetadata> {
        self.plan().map(metadata::summarize)
    }

    /// The prompt of the last failed generation, if any.
    pub fn failed_prompt(&self) -> Option<&str> {
        self.failed_prompt.as_deref()
    }

    /// Generate a plan from `text` and switch to the plan view.
    ///
    /// The text is trimmed first. On generation failure the session stays
    /// on the prompt view and keeps the prompt for [`Session::retry`].
    pub async fn submit_prompt(
        &mut self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<&Program, SessionError> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        let len = prompt.chars().count();
        if len > MAX_PROMPT_CHARS {
            return Err(SessionError::PromptTooLong {
                len,
                max: MAX_PROMPT_CHARS,
            });
        }

        info!(generator = self.generator.name(), "generating workout plan");
        let program = match self.generator.generate(prompt, cancel).await {
            Ok(program) => program,
            Err(e) => {
                self.failed_prompt = Some(e.prompt().to_owned());
                return Err(e.into());
            }
        };

        let warnings = validate_plan(&program);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "generated plan has validation warnings");
            for w in &warnings {
                warn!("{w}");
            }
        }

        self.failed_prompt = None;
        self.warnings = warnings;
        self.editor.load(program);
        self.view = View::Plan;
        info!("Workout plan generated successfully");

        self.editor.plan().ok_or(SessionError::NothingToRetry)
    }

    /// Show an existing program, e.g. one read from a file.
    pub fn open(&mut self, program: Program) {
        self.warnings = validate_plan(&program);
        for w in &self.warnings {
            warn!("{w}");
        }
        self.editor.load(program);
        self.view = View::Plan;
    }

    /// Resubmit the prompt of the last failed generation.
    pub async fn retry(&mut self, cancel: &CancellationToken) -> Result<&Program, SessionError> {
        let prompt = self
            .failed_prompt
            .clone()
            .ok_or(SessionError::NothingToRetry)?;
        self.submit_prompt(&prompt, cancel).await
    }

    /// Discard the current plan and return to the prompt view.
    pub fn back(&mut self) {
        self.editor.discard();
        self.warnings.clear();
        self.view = View::Prompt;
    }

    /// Start over with a fresh prompt. Same as [`Session::back`].
    pub fn new_plan(&mut self) {
        self.back();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::plan::generate::SynthesisError;
    use crate::plan::model::{Day, Exercise, Week};

    /// Fails the first `failures` calls, then returns a one-week plan.
    struct FlakyGenerator {
        failures: usize,
        calls: AtomicUsize,
    }

    impl FlakyGenerator {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PlanGenerator for FlakyGenerator {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn generate(
            &self,
            prompt: &str,
            _cancel: &CancellationToken,
        ) -> Result<Program, GenerationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(GenerationError::Failed {
                    prompt: prompt.to_owned(),
                    source: SynthesisError::RandomSourceUnavailable,
                });
            }
            let mut program = Program::new(prompt, "");
            program.weeks.push(Week::new(
                1,
                vec![Day::new(1, "Upper Body", vec![Exercise::new("A", "Push-ups", 3, "10")])],
            ));
            Ok(program)
        }
    }

    #[tokio::test]
    async fn empty_and_oversized_prompts_are_rejected() {
        let mut session = Session::new(Box::new(FlakyGenerator::new(0)));
        let cancel = CancellationToken::new();
        assert!(matches!(
            session.submit_prompt("   \n", &cancel).await,
            Err(SessionError::EmptyPrompt)
        ));
        let long = "x".repeat(MAX_PROMPT_CHARS + 1);
        assert!(matches!(
            session.submit_prompt(&long, &cancel).await,
            Err(SessionError::PromptTooLong { len: 1001, max: 1000 })
        ));
        let exact = format!("  {}  ", "x".repeat(MAX_PROMPT_CHARS));
        assert!(session.submit_prompt(&exact, &cancel).await.is_ok());
    }

    #[tokio::test]
    async fn success_moves_to_plan_view_with_warnings() {
        let mut session = Session::new(Box::new(FlakyGenerator::new(0)));
        let program = session
            .submit_prompt("  upper body  ", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(program.name, "upper body");
        assert_eq!(session.view(), View::Plan);
        assert_eq!(session.warnings(), ["Program description is required"]);
        assert_eq!(session.metadata().unwrap().total_exercises, 1);
    }

    #[tokio::test]
    async fn failure_keeps_prompt_for_retry() {
        let mut session = Session::new(Box::new(FlakyGenerator::new(1)));
        let cancel = CancellationToken::new();
        let err = session.submit_prompt("cardio", &cancel).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to generate workout plan. Please try again."
        );
        assert_eq!(session.view(), View::Prompt);
        assert_eq!(session.failed_prompt(), Some("cardio"));

        let program = session.retry(&cancel).await.unwrap();
        assert_eq!(program.name, "cardio");
        assert!(session.failed_prompt().is_none());
    }

    #[tokio::test]
    async fn retry_without_failure_is_an_error() {
        let mut session = Session::new(Box::new(FlakyGenerator::new(0)));
        assert!(matches!(
            session.retry(&CancellationToken::new()).await,
            Err(SessionError::NothingToRetry)
        ));
    }

    #[test]
    fn open_shows_existing_plan() {
        let mut session = Session::new(Box::new(FlakyGenerator::new(0)));
        session.open(Program::new("Imported", "From disk"));
        assert_eq!(session.view(), View::Plan);
        assert_eq!(session.warnings(), ["At least one week is required"]);
        assert_eq!(session.plan().unwrap().name, "Imported");
    }

    #[tokio::test]
    async fn back_discards_plan() {
        let mut session = Session::new(Box::new(FlakyGenerator::new(0)));
        session
            .submit_prompt("core", &CancellationToken::new())
            .await
            .unwrap();
        session.back();
        assert_eq!(session.view(), View::Prompt);
        assert!(session.plan().is_none());
        assert!(session.metadata().is_none());
        assert!(session.warnings().is_empty());
    }
}
