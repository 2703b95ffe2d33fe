//! Prompt classification by ordered keyword rules.
//!
//! Every decision the generator makes from the prompt text is an explicit
//! table of [`KeywordRule`]s evaluated first-match-wins over the lower-cased
//! prompt, followed by a fallback. The tables are public so their priority
//! order can be inspected and tested directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::PoolKind;

/// A rule that yields `result` when the prompt contains any of `keywords`.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T> {
    /// Lower-case substrings; any one of them triggers the rule.
    pub keywords: &'static [&'static str],
    pub result: T,
}

impl<T: Copy> KeywordRule<T> {
    /// Whether the (already lower-cased) text triggers this rule.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Evaluate `rules` in order against `text` and return the first hit,
/// or `fallback` if none match. `text` is lower-cased here.
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str, fallback: T) -> T {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|r| r.matches(&lowered))
        .map(|r| r.result)
        .unwrap_or(fallback)
}

// ---------------------------------------------------------------------------
// Program name
// ---------------------------------------------------------------------------

/// Program names in priority order: strength > cardio > full body >
/// beginner > advanced.
pub const PROGRAM_NAME_RULES: &[KeywordRule<&str>] = &[
    KeywordRule {
        keywords: &["strength"],
        result: "Strength Mastery Program",
    },
    KeywordRule {
        keywords: &["cardio"],
        result: "Cardio Conditioning Challenge",
    },
    KeywordRule {
        keywords: &["full body", "full-body"],
        result: "Total Body Transformation",
    },
    KeywordRule {
        keywords: &["beginner"],
        result: "Foundation Builder",
    },
    KeywordRule {
        keywords: &["advanced"],
        result: "Elite Performance Protocol",
    },
];

pub const DEFAULT_PROGRAM_NAME: &str = "Custom Fitness Program";

/// Pick the program name for a prompt.
pub fn program_name(prompt: &str) -> &'static str {
    first_match(PROGRAM_NAME_RULES, prompt, DEFAULT_PROGRAM_NAME)
}

// ---------------------------------------------------------------------------
// Experience level and description
// ---------------------------------------------------------------------------

/// Experience level inferred from the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        f.write_str(s)
    }
}

/// Beginner wins over advanced; anything else is intermediate.
pub const LEVEL_RULES: &[KeywordRule<ExperienceLevel>] = &[
    KeywordRule {
        keywords: &["beginner"],
        result: ExperienceLevel::Beginner,
    },
    KeywordRule {
        keywords: &["advanced"],
        result: ExperienceLevel::Advanced,
    },
];

/// Infer the experience level of a prompt.
pub fn experience_level(prompt: &str) -> ExperienceLevel {
    first_match(LEVEL_RULES, prompt, ExperienceLevel::Intermediate)
}

/// Render the program description for a level.
pub fn program_description(level: ExperienceLevel) -> String {
    format!(
        "A comprehensive {level}-level fitness program designed to help you achieve your \
         specific goals through scientifically-backed training principles and progressive overload."
    )
}

// ---------------------------------------------------------------------------
// Focus flags
// ---------------------------------------------------------------------------

pub const STRENGTH_KEYWORDS: &[&str] = &["strength"];
pub const CARDIO_KEYWORDS: &[&str] = &["cardio", "conditioning"];

/// Independent focus flags of a prompt. Both may be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromptFocus {
    pub strength: bool,
    pub cardio: bool,
}

impl PromptFocus {
    /// Classify a prompt by case-insensitive substring match.
    pub fn classify(prompt: &str) -> Self {
        let lowered = prompt.to_lowercase();
        Self {
            strength: STRENGTH_KEYWORDS.iter().any(|k| lowered.contains(k)),
            cardio: CARDIO_KEYWORDS.iter().any(|k| lowered.contains(k)),
        }
    }

    /// Pool and title table: strength first, then cardio, then general.
    pub fn pool_kind(&self) -> PoolKind {
        if self.strength {
            PoolKind::Strength
        } else if self.cardio {
            PoolKind::Cardio
        } else {
            PoolKind::General
        }
    }

    /// Six training days for cardio prompts, four otherwise.
    pub fn days_per_week(&self) -> u32 {
        if self.cardio { 6 } else { 4 }
    }
}

// ---------------------------------------------------------------------------
// Week count
// ---------------------------------------------------------------------------

pub const DEFAULT_WEEK_COUNT: u32 = 4;

/// Find the first `<digits>[-|whitespace]?week` in the prompt
/// (case-insensitive) and return the digit run, or `None` if absent.
pub fn find_week_count(prompt: &str) -> Option<&str> {
    let bytes = prompt.as_bytes();
    let mut search_from = 0;
    while let Some(offset) = find_ascii_ci(&bytes[search_from..], b"week") {
        let week_at = search_from + offset;
        search_from = week_at + 1;

        // Optional single separator directly before "week".
        let mut end = week_at;
        if let Some(sep) = prompt[..end].chars().next_back() {
            if sep == '-' || sep.is_whitespace() {
                let before = end - sep.len_utf8();
                if ends_with_digit(&bytes[..before]) {
                    end = before;
                }
            }
        }

        let start = bytes[..end]
            .iter()
            .rposition(|b| !b.is_ascii_digit())
            .map(|p| p + 1)
            .unwrap_or(0);
        if start < end {
            return Some(&prompt[start..end]);
        }
    }
    None
}

fn ends_with_digit(bytes: &[u8]) -> bool {
    bytes.last().is_some_and(u8::is_ascii_digit)
}

fn find_ascii_ci(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
