//! Plan documents on disk.
//!
//! A program is exchanged as a JSON or TOML document using the field names
//! of [`Program`]. This is a serialization surface only; there is no
//! storage layer behind it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::Program;

/// Document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFormat {
    #[default]
    Json,
    Toml,
}

impl PlanFormat {
    /// Infer the format from a file extension (`.json` or `.toml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.to_ascii_lowercase().parse().ok()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for PlanFormat {
    type Err = PlanFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(PlanFormatParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlanFormat`] string.
#[derive(Debug, Clone)]
pub struct PlanFormatParseError(pub String);

impl fmt::Display for PlanFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plan format: {:?} (expected json or toml)", self.0)
    }
}

impl std::error::Error for PlanFormatParseError {}

/// Errors reading or writing a plan document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON plan: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML plan: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to encode plan as TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Decode a program from `content`.
pub fn parse_program(content: &str, format: PlanFormat) -> Result<Program, DocumentError> {
    let program = match format {
        PlanFormat::Json => serde_json::from_str(content)?,
        PlanFormat::Toml => toml::from_str(content)?,
    };
    Ok(program)
}

/// Encode a program, pretty-printed.
pub fn render_program(program: &Program, format: PlanFormat) -> Result<String, DocumentError> {
    let mut out = match format {
        PlanFormat::Json => serde_json::to_string_pretty(program)?,
        PlanFormat::Toml => toml::to_string_pretty(program)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Read a program from `path`. The format comes from the extension,
/// falling back to JSON.
pub fn load_program(path: &Path) -> Result<Program, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&content, PlanFormat::from_path(path).unwrap_or_default())
}

/// Write a program to `path`, creating parent directories as needed.
pub fn save_program(
    program: &Program,
    path: &Path,
    format: PlanFormat,
) -> Result<(), DocumentError> {
    let rendered = render_program(program, format)?;
    let write_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, rendered).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::model::{Day, Exercise, Week};

    fn sample() -> Program {
        let mut program = Program::new("Strength Mastery Program", "Lift heavy");
        program.weeks.push(Week::new(
            1,
            vec![
                Day::new(
                    1,
                    "Upper Body Power",
                    vec![Exercise::new("A", "Bench Press", 3, "11, 9, 7").rest("2min")],
                ),
                Day::rest(3),
            ],
        ));
        program
    }

    #[test]
    fn format_from_str_and_path() {
        assert_eq!("json".parse::<PlanFormat>().unwrap(), PlanFormat::Json);
        assert_eq!("toml".parse::<PlanFormat>().unwrap(), PlanFormat::Toml);
        assert!("yaml".parse::<PlanFormat>().is_err());
        assert_eq!(
            PlanFormat::from_path(Path::new("plan.TOML")),
            Some(PlanFormat::Toml)
        );
        assert_eq!(PlanFormat::from_path(Path::new("plan")), None);
        assert_eq!(PlanFormat::Toml.to_string(), "toml");
    }

    #[test]
    fn json_uses_document_field_names() {
        let rendered = render_program(&sample(), PlanFormat::Json).unwrap();
        assert!(rendered.contains("\"programName\": \"Strength Mastery Program\""));
        assert!(rendered.contains("\"exerciseName\": \"Bench Press\""));
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn toml_document_reads_back() {
        let rendered = render_program(&sample(), PlanFormat::Toml).unwrap();
        let parsed = parse_program(&rendered, PlanFormat::Toml).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_program("{ not json", PlanFormat::Json).unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn save_and_load_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("plan.toml");
        save_program(&sample(), &path, PlanFormat::Toml).unwrap();
        assert_eq!(load_program(&path).unwrap(), sample());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load_program(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
