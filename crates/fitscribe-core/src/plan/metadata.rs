//! Derived statistics for a [`Program`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::Program;

/// Average exercises per workout day above which a plan is Advanced.
pub const ADVANCED_LOAD: f64 = 6.0;
/// Average exercises per workout day above which a plan is Intermediate.
pub const INTERMEDIATE_LOAD: f64 = 4.0;

/// Difficulty tier derived from average load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Strict greater-than: ties fall to the less intense tier.
    pub fn from_average_load(load: f64) -> Self {
        if load > ADVANCED_LOAD {
            Self::Advanced
        } else if load > INTERMEDIATE_LOAD {
            Self::Intermediate
        } else {
            Self::Beginner
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

/// A derived emphasis label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusTag {
    #[serde(rename = "Upper Body")]
    UpperBody,
    #[serde(rename = "Lower Body")]
    LowerBody,
    Cardio,
    Strength,
    Core,
    #[serde(rename = "Compound Movements")]
    CompoundMovements,
}

impl fmt::Display for FocusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UpperBody => "Upper Body",
            Self::LowerBody => "Lower Body",
            Self::Cardio => "Cardio",
            Self::Strength => "Strength",
            Self::Core => "Core",
            Self::CompoundMovements => "Compound Movements",
        };
        f.write_str(s)
    }
}

/// Keywords matched against lower-cased day titles.
const TITLE_FOCUS: &[(&[&str], FocusTag)] = &[
    (&["upper"], FocusTag::UpperBody),
    (&["lower"], FocusTag::LowerBody),
    (&["cardio"], FocusTag::Cardio),
    (&["strength"], FocusTag::Strength),
    (&["core"], FocusTag::Core),
];

/// Keywords matched against lower-cased exercise names.
const EXERCISE_FOCUS: &[(&[&str], FocusTag)] = &[
    (&["squat", "deadlift"], FocusTag::CompoundMovements),
    (&["cardio", "hiit"], FocusTag::Cardio),
    (&["core", "plank"], FocusTag::Core),
];

/// Aggregate statistics of a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub total_weeks: usize,
    /// Days with at least one exercise.
    pub total_workout_days: usize,
    pub total_exercises: usize,
    pub difficulty: Difficulty,
    /// Unique tags in first-encountered order.
    pub focus: Vec<FocusTag>,
}

impl PlanMetadata {
    /// `total_exercises / max(total_workout_days, 1)`.
    pub fn average_load(&self) -> f64 {
        self.total_exercises as f64 / self.total_workout_days.max(1) as f64
    }
}

/// Compute the statistics of `plan`. Pure.
pub fn summarize(plan: &Program) -> PlanMetadata {
    let total_weeks = plan.weeks.len();
    let total_workout_days = plan.days().filter(|d| !d.is_rest_day()).count();
    let total_exercises = plan.days().map(|d| d.exercises.len()).sum();

    let load = total_exercises as f64 / total_workout_days.max(1) as f64;

    PlanMetadata {
        total_weeks,
        total_workout_days,
        total_exercises,
        difficulty: Difficulty::from_average_load(load),
        focus: focus_areas(plan),
    }
}

/// Scan day titles and exercise names for focus keywords.
pub fn focus_areas(plan: &Program) -> Vec<FocusTag> {
    let mut focus: Vec<FocusTag> = Vec::new();
    let mut add = |tag: FocusTag| {
        if !focus.contains(&tag) {
            focus.push(tag);
        }
    };

    for day in plan.days() {
        let title = day.title.to_lowercase();
        for (keywords, tag) in TITLE_FOCUS {
            if keywords.iter().any(|k| title.contains(k)) {
                add(*tag);
            }
        }

        for exercise in &day.exercises {
            let name = exercise.exercise_name.to_lowercase();
            for (keywords, tag) in EXERCISE_FOCUS {
                if keywords.iter().any(|k| name.contains(k)) {
                    add(*tag);
                }
            }
        }
    }

    focus
}

/// Human-readable program length.
pub fn format_duration(weeks: usize) -> String {
    match weeks {
        1 => "1 week".to_owned(),
        4 => "1 month".to_owned(),
        8 => "2 months".to_owned(),
        n => format!("{n} weeks"),
    }
}
