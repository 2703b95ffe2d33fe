//! Mock plan generation.
//!
//! Stands in for an external AI collaborator: given a free-text prompt it
//! synthesizes a [`Program`] from keyword rules and the exercise catalog,
//! after a simulated network delay. No real I/O happens.
//!
//! All randomness flows through a [`RandomSource`] so tests can replay a
//! fixed sequence. The structural logic lives in [`synthesize`], which is
//! synchronous and has no side effects.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::catalog::{Catalog, CatalogError, PoolKind};
use super::model::{Day, Exercise, Program, Week, circuit_label};
use super::rules::{self, DEFAULT_WEEK_COUNT, PromptFocus};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound on the week count a prompt may request.
pub const MAX_WEEK_COUNT: u32 = 52;

/// Inclusive bounds on exercises per training day.
pub const MIN_EXERCISES_PER_DAY: usize = 4;
pub const MAX_EXERCISES_PER_DAY: usize = 6;

/// Day positions forced to rest. With four days per week only day 3 occurs.
pub const REST_DAY_POSITIONS: [u32; 2] = [3, 7];

/// User-facing message for every generation failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate workout plan. Please try again.";

// ---------------------------------------------------------------------------
// Random source
// ---------------------------------------------------------------------------

/// Source of the generator's non-determinism.
pub trait RandomSource: Send {
    /// Return a value in `low..=high`.
    fn pick(&mut self, low: usize, high: usize) -> usize;
}

/// [`RandomSource`] backed by the standard RNG.
#[derive(Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Reproducible sequence from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Internal failures while synthesizing a program.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("week count {0:?} is not a valid number")]
    InvalidWeekCount(String),

    #[error("requested {requested} weeks, at most {max} are supported")]
    TooManyWeeks { requested: u32, max: u32 },

    #[error("the {0} exercise pool is empty")]
    EmptyPool(PoolKind),

    #[error("the {0} day-title table is empty")]
    MissingDayTitles(PoolKind),

    #[error("random source is unavailable")]
    RandomSourceUnavailable,
}

/// Error surfaced to callers of [`PlanGenerator::generate`].
///
/// Every variant keeps the triggering prompt so a retry can reuse it.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to generate workout plan. Please try again.")]
    Failed {
        prompt: String,
        #[source]
        source: SynthesisError,
    },

    #[error("workout plan generation was cancelled")]
    Cancelled { prompt: String },
}

impl GenerationError {
    /// The prompt that triggered the failed generation.
    pub fn prompt(&self) -> &str {
        match self {
            Self::Failed { prompt, .. } | Self::Cancelled { prompt } => prompt,
        }
    }

    /// Whether resubmitting the same prompt may succeed.
    pub fn is_retryable(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Latency
// ---------------------------------------------------------------------------

/// Simulated network latency: `base + uniform[0, jitter]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub base: Duration,
    pub jitter: Duration,
}

impl LatencyConfig {
    pub const DEFAULT_BASE_MS: u64 = 3000;
    pub const DEFAULT_JITTER_MS: u64 = 2000;

    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draw one delay from `rng`.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> Duration {
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        if jitter_ms == 0 {
            return self.base;
        }
        let extra = rng.pick(0, usize::try_from(jitter_ms).unwrap_or(usize::MAX));
        self.base + Duration::from_millis(extra as u64)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(Self::DEFAULT_BASE_MS),
            Duration::from_millis(Self::DEFAULT_JITTER_MS),
        )
    }
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Week count requested by a prompt, defaulting to [`DEFAULT_WEEK_COUNT`].
pub fn week_count(prompt: &str) -> Result<u32, SynthesisError> {
    let Some(digits) = rules::find_week_count(prompt) else {
        return Ok(DEFAULT_WEEK_COUNT);
    };
    let requested: u32 = digits
        .parse()
        .map_err(|_| SynthesisError::InvalidWeekCount(digits.to_owned()))?;
    if requested > MAX_WEEK_COUNT {
        return Err(SynthesisError::TooManyWeeks {
            requested,
            max: MAX_WEEK_COUNT,
        });
    }
    Ok(requested)
}

/// Sets per exercise: 3 in weeks 1-2, 4 from week 3.
pub fn sets_for_week(week: u32) -> u32 {
    if week <= 2 { 3 } else { 4 }
}

/// Rep scheme. Strength programs drop target reps by one per week; the
/// values go non-positive past week 10 and are kept as written.
pub fn reps_for_week(week: u32, strength: bool) -> String {
    if strength {
        let w = i64::from(week);
        format!("{}, {}, {}", 12 - w, 10 - w, 8 - w)
    } else {
        "12-15".to_owned()
    }
}

/// Build a program from a prompt without any delay or identity stamping.
pub fn synthesize(
    prompt: &str,
    catalog: &Catalog,
    rng: &mut dyn RandomSource,
) -> Result<Program, SynthesisError> {
    let focus = PromptFocus::classify(prompt);
    let weeks = week_count(prompt)?;
    let level = rules::experience_level(prompt);
    let kind = focus.pool_kind();

    debug!(
        weeks,
        strength = focus.strength,
        cardio = focus.cardio,
        pool = %kind,
        level = %level,
        "classified prompt"
    );

    let mut program = Program::new(
        rules::program_name(prompt),
        rules::program_description(level),
    );

    for week in 1..=weeks {
        let mut days = Vec::with_capacity(focus.days_per_week() as usize);
        for day in 1..=focus.days_per_week() {
            if REST_DAY_POSITIONS.contains(&day) {
                days.push(Day::rest(day));
                continue;
            }
            let title = catalog
                .day_title(kind, day)
                .ok_or(SynthesisError::MissingDayTitles(kind))?;
            let exercises = synthesize_exercises(catalog, kind, focus, week, day, rng)?;
            days.push(Day::new(day, title, exercises));
        }
        program.weeks.push(Week::new(week, days));
    }

    Ok(program)
}

fn synthesize_exercises(
    catalog: &Catalog,
    kind: PoolKind,
    focus: PromptFocus,
    week: u32,
    day: u32,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Exercise>, SynthesisError> {
    let set = catalog
        .exercise_set(kind, day)
        .filter(|s| !s.exercises.is_empty())
        .ok_or(SynthesisError::EmptyPool(kind))?;

    let count = rng.pick(MIN_EXERCISES_PER_DAY, MAX_EXERCISES_PER_DAY);
    let sets = sets_for_week(week);
    let reps = reps_for_week(week, focus.strength);

    let exercises = (0..count)
        .map(|slot| {
            let template = &set.exercises[slot % set.exercises.len()];
            Exercise {
                circuit: circuit_label(slot),
                exercise_name: template.name.clone(),
                sets,
                reps: reps.clone(),
                rest: template.rest.clone(),
                notes: format!("Week {week}: {}", template.notes),
            }
        })
        .collect();
    Ok(exercises)
}

// ---------------------------------------------------------------------------
// Generator seam
// ---------------------------------------------------------------------------

/// Something that turns a prompt into a [`Program`].
///
/// Only one generation is in flight per caller. Implementations must honour
/// `cancel` at their suspension point.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Human-readable generator name (e.g. "mock").
    fn name(&self) -> &str;

    /// Generate a program for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<Program, GenerationError>;
}

// Compile-time assertion: PlanGenerator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn PlanGenerator) {}
};

/// The keyword-sniffing mock generator.
pub struct MockGenerator {
    catalog: Catalog,
    latency: LatencyConfig,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl MockGenerator {
    pub fn new(catalog: Catalog, latency: LatencyConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            catalog,
            latency,
            rng: Mutex::new(rng),
        }
    }

    /// Built-in catalog with an entropy-seeded random source.
    pub fn builtin(latency: LatencyConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(
            Catalog::builtin()?,
            latency,
            Box::new(SeededRandom::from_entropy()),
        ))
    }

    pub fn latency(&self) -> LatencyConfig {
        self.latency
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RandomSource) -> T) -> Result<T, SynthesisError> {
        let mut guard = self
            .rng
            .lock()
            .map_err(|_| SynthesisError::RandomSourceUnavailable)?;
        Ok(f(&mut **guard))
    }
}

#[async_trait]
impl PlanGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<Program, GenerationError> {
        let failed = |source: SynthesisError| {
            error!(error = %source, "workout plan generation failed");
            GenerationError::Failed {
                prompt: prompt.to_owned(),
                source,
            }
        };
        let cancelled = || {
            info!("workout plan generation cancelled");
            GenerationError::Cancelled {
                prompt: prompt.to_owned(),
            }
        };

        let delay = self.with_rng(|rng| self.latency.sample(rng)).map_err(failed)?;
        debug!(delay_ms = delay.as_millis() as u64, "simulating generation latency");

        if cancel.is_cancelled() {
            return Err(cancelled());
        }
        if !delay.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => return Err(cancelled()),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let mut program = self
            .with_rng(|rng| synthesize(prompt, &self.catalog, rng))
            .and_then(|r| r)
            .map_err(failed)?;
        program.id = Some(Uuid::new_v4());
        program.created_at = Some(Utc::now());

        info!(
            program = %program.name,
            weeks = program.weeks.len(),
            "workout plan generated"
        );
        Ok(program)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
