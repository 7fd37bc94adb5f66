//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `<user config dir>/ctxbuild/config.toml` - user-wide defaults
//! - Project: `.ctxbuild/config.toml` next to the solution file
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::options::BuilderOptions;

/// ctxbuild configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Number of contexts built concurrently
    pub jobs: Option<usize>,

    /// Install missing packs before building
    pub packs: Option<bool>,

    /// Validate solution documents against their schema
    pub schema: Option<bool>,

    /// Stop after the first failed context
    pub fail_fast: Option<bool>,

    /// Output directory root
    pub output_dir: Option<PathBuf>,

    /// Intermediate directory root
    pub intermediate_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.packs.is_some() {
            self.build.packs = other.build.packs;
        }
        if other.build.schema.is_some() {
            self.build.schema = other.build.schema;
        }
        if other.build.fail_fast.is_some() {
            self.build.fail_fast = other.build.fail_fast;
        }
        if other.build.output_dir.is_some() {
            self.build.output_dir = other.build.output_dir;
        }
        if other.build.intermediate_dir.is_some() {
            self.build.intermediate_dir = other.build.intermediate_dir;
        }
    }

    /// Fill options the command line left unset from this config.
    ///
    /// Boolean flags can only be switched on by the command line, so a
    /// `false` option is overridden by a `true` config value.
    pub fn apply_to(&self, options: &mut BuilderOptions, cli_jobs: Option<usize>) {
        options.jobs = cli_jobs.or(self.build.jobs).unwrap_or(1).max(1);
        options.packs |= self.build.packs.unwrap_or(false);
        options.schema |= self.build.schema.unwrap_or(false);
        options.fail_fast |= self.build.fail_fast.unwrap_or(false);
        if options.output_dir.is_none() {
            options.output_dir = self.build.output_dir.clone();
        }
        if options.intermediate_dir.is_none() {
            options.intermediate_dir = self.build.intermediate_dir.clone();
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.ctxbuild/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config path.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "ctxbuild", "ctxbuild").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the project config path for a solution file.
pub fn project_config_path(solution: &Path) -> PathBuf {
    solution
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(".ctxbuild")
        .join("config.toml")
}
