//! Optional TOML configuration.
//!
//! Every field has a default, so an empty file (or no file) is valid.
//! Relative paths are resolved against the directory holding the config
//! file. Command-line flags override anything set here.

use std::path::{Path, PathBuf};

use safe_route_grid::DEFAULT_CELL_SIZE_KM;
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The config file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Grid generation settings.
    pub grid: GridConfig,
    /// Cell scoring settings.
    pub scoring: ScoringConfig,
    /// Place lookup settings.
    pub gazetteer: GazetteerConfig,
}

/// `[grid]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// District boundary `GeoJSON`; the embedded outline when unset.
    pub boundary: Option<PathBuf>,
    /// Cell edge length in kilometers.
    pub cell_size_km: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            boundary: None,
            cell_size_km: DEFAULT_CELL_SIZE_KM,
        }
    }
}

/// `[scoring]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Seed for the placeholder scorer; OS entropy when unset.
    pub seed: Option<u64>,
}

/// `[gazetteer]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GazetteerConfig {
    /// Place table TOML; the built-in table when unset.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Parses configuration from a TOML string. Paths are kept as written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the TOML is malformed or has
    /// unknown keys.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads a config file, resolving relative paths against its directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        log::debug!("Loaded config from {}", path.display());
        Ok(config.relative_to(base))
    }

    /// Resolves relative paths against `base`.
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.grid.boundary = self.grid.boundary.map(resolve);
        self.gazetteer.path = self.gazetteer.path.map(resolve);
        self
    }
}
