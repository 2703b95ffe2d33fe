//! Exercise catalog for the mock generator.
//!
//! The built-in catalog is defined in `catalog.toml` and embedded in the
//! binary at compile time. A replacement catalog with the same shape can be
//! loaded from disk.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Which exercise pool (and day-title table) a program draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Strength,
    Cardio,
    General,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::General => "general",
        };
        f.write_str(s)
    }
}

/// A single exercise entry in a pool.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExerciseTemplate {
    pub name: String,
    #[serde(default)]
    pub rest: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// An ordered sub-list of a pool, cycled through when filling a day.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub exercises: Vec<ExerciseTemplate>,
}

/// Day-title tables, indexed by `(day - 1) mod len`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DayTitles {
    #[serde(default)]
    pub strength: Vec<String>,
    #[serde(default)]
    pub cardio: Vec<String>,
    #[serde(default)]
    pub general: Vec<String>,
}

/// The full catalog: day titles plus three exercise pools.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Catalog {
    pub titles: DayTitles,
    #[serde(default)]
    pub strength: Vec<ExerciseSet>,
    #[serde(default)]
    pub cardio: Vec<ExerciseSet>,
    #[serde(default)]
    pub general: Vec<ExerciseSet>,
}

/// Errors from loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read catalog at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The embedded catalog TOML.
static CATALOG_TOML: &str = include_str!("catalog.toml");

impl Catalog {
    /// Parse the embedded catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(CATALOG_TOML)
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// All exercise sets of a pool.
    pub fn pool(&self, kind: PoolKind) -> &[ExerciseSet] {
        match kind {
            PoolKind::Strength => &self.strength,
            PoolKind::Cardio => &self.cardio,
            PoolKind::General => &self.general,
        }
    }

    /// The day-title table of a pool.
    pub fn titles(&self, kind: PoolKind) -> &[String] {
        match kind {
            PoolKind::Strength => &self.titles.strength,
            PoolKind::Cardio => &self.titles.cardio,
            PoolKind::General => &self.titles.general,
        }
    }

    /// Title for a 1-based day number, or `None` if the table is empty.
    pub fn day_title(&self, kind: PoolKind, day_number: u32) -> Option<&str> {
        let titles = self.titles(kind);
        if titles.is_empty() {
            return None;
        }
        let idx = (day_number.max(1) as usize - 1) % titles.len();
        titles.get(idx).map(String::as_str)
    }

    /// Exercise set for a 1-based day number: `pool[day mod len]`, falling
    /// back to the first set. `None` only when the pool is empty.
    pub fn exercise_set(&self, kind: PoolKind, day_number: u32) -> Option<&ExerciseSet> {
        let pool = self.pool(kind);
        if pool.is_empty() {
            return None;
        }
        pool.get(day_number as usize % pool.len())
            .or_else(|| pool.first())
    }
}
