//! Configuration file management for fitscribe.
//!
//! Provides a TOML-based config file at `~/.config/fitscribe/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fitscribe_core::plan::{Catalog, LatencyConfig, MockGenerator, PlanFormat, SeededRandom};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Fixed part of the simulated generation delay.
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound of the random extra delay.
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,
    /// Exercise catalog to use instead of the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: PlanFormat,
}

fn default_min_delay_ms() -> u64 {
    LatencyConfig::DEFAULT_BASE_MS
}

fn default_jitter_ms() -> u64 {
    LatencyConfig::DEFAULT_JITTER_MS
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            jitter_ms: default_jitter_ms(),
            catalog: None,
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the fitscribe config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/fitscribe` or
/// `~/.config/fitscribe`, also on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("fitscribe");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("fitscribe")
}

/// Return the path to the fitscribe config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct FitscribeConfig {
    pub latency: LatencyConfig,
    pub catalog_path: Option<PathBuf>,
    pub format: PlanFormat,
}

impl FitscribeConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Delay: `--no-delay` > `FITSCRIBE_MIN_DELAY_MS` / `FITSCRIBE_JITTER_MS` > `[generator]` > 3000 / 2000 ms
    /// - Catalog: `FITSCRIBE_CATALOG` > `generator.catalog` > built-in
    /// - Format: `cli_format` > `FITSCRIBE_FORMAT` > `output.format` > json
    ///
    /// A missing config file is fine; a malformed one is an error.
    pub fn resolve(no_delay: bool, cli_format: Option<PlanFormat>) -> Result<Self> {
        let file_config = if config_path().exists() {
            load_config()?
        } else {
            ConfigFile::default()
        };

        let latency = if no_delay {
            LatencyConfig::none()
        } else {
            let base = env_u64("FITSCRIBE_MIN_DELAY_MS")?
                .unwrap_or(file_config.generator.min_delay_ms);
            let jitter =
                env_u64("FITSCRIBE_JITTER_MS")?.unwrap_or(file_config.generator.jitter_ms);
            LatencyConfig::new(Duration::from_millis(base), Duration::from_millis(jitter))
        };

        let catalog_path = match std::env::var("FITSCRIBE_CATALOG") {
            Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => file_config.generator.catalog,
        };

        let format = if let Some(format) = cli_format {
            format
        } else if let Ok(value) = std::env::var("FITSCRIBE_FORMAT") {
            value
                .parse()
                .with_context(|| format!("FITSCRIBE_FORMAT env var is invalid: {value:?}"))?
        } else {
            file_config.output.format
        };

        debug!(
            base_ms = latency.base.as_millis() as u64,
            jitter_ms = latency.jitter.as_millis() as u64,
            catalog = ?catalog_path,
            %format,
            "resolved configuration"
        );

        Ok(Self {
            latency,
            catalog_path,
            format,
        })
    }

    /// Load the configured exercise catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("failed to load catalog {}", path.display())),
            None => Catalog::builtin().context("built-in catalog is malformed"),
        }
    }

    /// Build the mock generator, optionally with a fixed seed.
    pub fn generator(&self, seed: Option<u64>) -> Result<MockGenerator> {
        let rng = match seed {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        };
        Ok(MockGenerator::new(self.catalog()?, self.latency, Box::new(rng)))
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} env var is not a number: {value:?}")),
        Err(_) => Ok(None),
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
