//! Workout plans: model, catalog, generation, validation, metadata, editing.

pub mod catalog;
pub mod document;
pub mod editor;
pub mod generate;
pub mod metadata;
pub mod model;
pub mod rules;
pub mod validate;

pub use catalog::{Catalog, CatalogError, PoolKind};
pub use document::{
    DocumentError, PlanFormat, PlanFormatParseError, load_program, parse_program, render_program,
    save_program,
};
pub use editor::{EditError, EditOutcome, MoveDirection, PlanEditor};
pub use generate::{
    GENERATION_FAILED_MESSAGE, GenerationError, LatencyConfig, MockGenerator, PlanGenerator,
    RandomSource, SeededRandom, SynthesisError, synthesize,
};
pub use metadata::{Difficulty, FocusTag, PlanMetadata, format_duration, summarize};
pub use model::{Day, Exercise, ExercisePatch, Program, Week, circuit_label};
pub use validate::validate_plan;
