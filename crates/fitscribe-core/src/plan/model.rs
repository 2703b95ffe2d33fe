//! Workout program data model.
//!
//! A [`Program`] is the sole root of a strict containment tree:
//! `Program -> Week -> Day -> Exercise`. Children have no existence outside
//! their parent and order within every sequence is meaningful.
//!
//! Field names on the wire follow the document shape produced by the
//! generator (`programName`, `exerciseName`, ...). Required strings and
//! collections default when absent, so a missing field reads as blank and
//! is reported by [`crate::plan::validate_plan`] rather than rejected here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level workout program.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// Assigned when a program is generated. Absent in hand-written documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Human-readable program name.
    #[serde(rename = "programName", default)]
    pub name: String,
    /// One-paragraph program description.
    #[serde(rename = "programDescription", default)]
    pub description: String,
    /// Weeks in training order.
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Bumped by every applied editor mutation.
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One training week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Week {
    /// Conventionally consecutive from 1. Not enforced.
    #[serde(rename = "week", default)]
    pub week_number: u32,
    #[serde(default)]
    pub days: Vec<Day>,
}

/// One day within a week. An empty exercise list is a rest day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Day {
    #[serde(rename = "day", default)]
    pub day_number: u32,
    #[serde(default)]
    pub title: String,
    /// Exercises in execution order.
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A single prescribed exercise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    /// Circuit label, conventionally `A`, `B`, `C`, ... by position.
    #[serde(default)]
    pub circuit: String,
    #[serde(rename = "exerciseName", default)]
    pub exercise_name: String,
    /// Zero when absent; the validator reports anything below 1.
    #[serde(default)]
    pub sets: u32,
    /// Free text, e.g. `"12, 10, 8"` or `"12-15"`.
    #[serde(default)]
    pub reps: String,
    /// Free-text rest duration, e.g. `"90s"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Program {
    /// Create an empty program with a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Iterate over every day of every week, in order.
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }
}

impl Week {
    pub fn new(week_number: u32, days: Vec<Day>) -> Self {
        Self { week_number, days }
    }
}

impl Day {
    pub fn new(day_number: u32, title: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            day_number,
            title: title.into(),
            exercises,
        }
    }

    /// A rest day with the conventional title.
    pub fn rest(day_number: u32) -> Self {
        Self::new(day_number, "Rest Day", Vec::new())
    }

    /// Whether this day has no exercises.
    pub fn is_rest_day(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl Exercise {
    /// Create an exercise with the required fields; `rest` and `notes` start empty.
    pub fn new(
        circuit: impl Into<String>,
        exercise_name: impl Into<String>,
        sets: u32,
        reps: impl Into<String>,
    ) -> Self {
        Self {
            circuit: circuit.into(),
            exercise_name: exercise_name.into(),
            sets,
            reps: reps.into(),
            rest: None,
            notes: String::new(),
        }
    }

    /// Set the rest duration.
    pub fn rest(mut self, rest: impl Into<String>) -> Self {
        self.rest = Some(rest.into());
        self
    }

    /// Set the notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A partial exercise: only the fields that are `Some` are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExercisePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<String>,
    #[serde(rename = "exerciseName", default, skip_serializing_if = "Option::is_none")]
    pub exercise_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExercisePatch {
    /// True when the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        self.circuit.is_none()
            && self.exercise_name.is_none()
            && self.sets.is_none()
            && self.reps.is_none()
            && self.rest.is_none()
            && self.notes.is_none()
    }

    /// Merge the present fields into `exercise`, leaving the rest unchanged.
    pub fn apply_to(&self, exercise: &mut Exercise) {
        if let Some(circuit) = &self.circuit {
            exercise.circuit = circuit.clone();
        }
        if let Some(name) = &self.exercise_name {
            exercise.exercise_name = name.clone();
        }
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(reps) = &self.reps {
            exercise.reps = reps.clone();
        }
        if let Some(rest) = &self.rest {
            exercise.rest = Some(rest.clone());
        }
        if let Some(notes) = &self.notes {
            exercise.notes = notes.clone();
        }
    }
}

/// Circuit label for a zero-based slot: `A`..`Z`, then `AA`, `AB`, ...
pub fn circuit_label(position: usize) -> String {
    let mut n = position;
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circuit_labels_follow_position() {
        assert_eq!(circuit_label(0), "A");
        assert_eq!(circuit_label(2), "C");
        assert_eq!(circuit_label(25), "Z");
        assert_eq!(circuit_label(26), "AA");
        assert_eq!(circuit_label(27), "AB");
        assert_eq!(circuit_label(51), "AZ");
        assert_eq!(circuit_label(52), "BA");
    }

    #[test]
    fn deserialize_document_shape() {
        let json = r#"{
            "programName": "Foundation Builder",
            "programDescription": "Basics",
            "weeks": [
                {
                    "week": 1,
                    "days": [
                        {
                            "day": 1,
                            "title": "Upper Body",
                            "exercises": [
                                {
                                    "circuit": "A",
                                    "exerciseName": "Push-ups",
                                    "sets": 3,
                                    "reps": "12-15",
                                    "rest": "60s",
                                    "notes": "Week 1: Maintain straight line"
                                }
                            ]
                        },
                        { "day": 3, "title": "Rest Day", "exercises": [] }
                    ]
                }
            ]
        }"#;
        let program: Program = serde_json::from_str(json).expect("should parse");
        assert_eq!(program.name, "Foundation Builder");
        assert_eq!(program.weeks[0].week_number, 1);
        let day = &program.weeks[0].days[0];
        assert_eq!(day.exercises[0].exercise_name, "Push-ups");
        assert_eq!(day.exercises[0].rest.as_deref(), Some("60s"));
        assert!(program.weeks[0].days[1].is_rest_day());
        assert!(program.id.is_none());
    }

    #[test]
    fn absent_fields_read_as_blank() {
        let json = r#"{ "weeks": [ { "days": [ { "exercises": [ {} ] } ] } ] }"#;
        let program: Program = serde_json::from_str(json).expect("should parse");
        assert!(program.name.is_empty());
        assert!(program.description.is_empty());
        let exercise = &program.weeks[0].days[0].exercises[0];
        assert_eq!(exercise.sets, 0);
        assert!(exercise.reps.is_empty());
        assert!(exercise.rest.is_none());
    }

    #[test]
    fn serialize_skips_absent_optionals() {
        let program = Program::new("Plan", "Desc");
        let value = serde_json::to_value(&program).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("createdAt").is_none());
        assert_eq!(value["programName"], "Plan");
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut exercise = Exercise::new("A", "Back Squats", 3, "12, 10, 8")
            .rest("3min")
            .notes("Below parallel depth");
        let patch = ExercisePatch {
            sets: Some(5),
            reps: Some("5".to_owned()),
            ..ExercisePatch::default()
        };
        patch.apply_to(&mut exercise);
        assert_eq!(exercise.sets, 5);
        assert_eq!(exercise.reps, "5");
        assert_eq!(exercise.exercise_name, "Back Squats");
        assert_eq!(exercise.rest.as_deref(), Some("3min"));
        assert_eq!(exercise.notes, "Below parallel depth");
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ExercisePatch::default().is_empty());
        let patch = ExercisePatch {
            notes: Some(String::new()),
            ..ExercisePatch::default()
        };
        assert!(!patch.is_empty());
    }
}
