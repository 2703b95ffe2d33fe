//! Core library for fitscribe: workout program generation, validation,
//! statistics and editing.

pub mod plan;
pub mod session;

pub use session::{EXAMPLE_PROMPTS, MAX_PROMPT_CHARS, Session, SessionError, View};
