//! Configuration file support for genhook.
//!
//! genhook reads two configuration files:
//! - Global: `~/.genhook/config.toml` - user-wide defaults
//! - Project: `.genhook/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::PartialSettings;
use crate::generate::{SystemLibsPatch, PRESETS_FILE, TOOLCHAIN_FILE};

/// Environment variable overriding the global config directory.
pub const HOME_ENV: &str = "GENHOOK_HOME";

/// genhook configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings (build type, os, arch, compiler, version)
    pub settings: PartialSettings,

    /// Generation paths
    pub generate: GenerateConfig,

    /// System-library patching
    pub patch: PatchConfig,
}

/// `[generate]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Preset file, relative to the project directory
    pub presets_file: Option<PathBuf>,

    /// Generators folder, relative to the project directory
    pub generators_folder: Option<PathBuf>,

    /// Toolchain file name inside the generators folder
    pub toolchain_file: Option<String>,
}

/// `[patch]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Library token to strip (default `stdc++`)
    pub token: Option<String>,

    /// Data file patterns (default `*-data.cmake`, `*-*-*-data.cmake`)
    pub patterns: Option<Vec<String>>,
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
    /// or unreadable.
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
        self.settings = other.settings.or(std::mem::take(&mut self.settings));

        if other.generate.presets_file.is_some() {
            self.generate.presets_file = other.generate.presets_file;
        }
        if other.generate.generators_folder.is_some() {
            self.generate.generators_folder = other.generate.generators_folder;
        }
        if other.generate.toolchain_file.is_some() {
            self.generate.toolchain_file = other.generate.toolchain_file;
        }

        if other.patch.token.is_some() {
            self.patch.token = other.patch.token;
        }
        if other.patch.patterns.is_some() {
            self.patch.patterns = other.patch.patterns;
        }
    }

    /// Preset file path, resolved against `project_dir`.
    pub fn presets_file(&self, project_dir: &Path) -> PathBuf {
        let file = self
            .generate
            .presets_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(PRESETS_FILE));
        project_dir.join(file)
    }

    /// Generators folder, resolved against `project_dir`.
    ///
    /// Defaults to the project directory itself.
    pub fn generators_folder(&self, project_dir: &Path) -> PathBuf {
        match &self.generate.generators_folder {
            Some(dir) => project_dir.join(dir),
            None => project_dir.to_path_buf(),
        }
    }

    /// Toolchain file name.
    pub fn toolchain_file(&self) -> String {
        self.generate
            .toolchain_file
            .clone()
            .unwrap_or_else(|| TOOLCHAIN_FILE.to_string())
    }

    /// Effective system-library patch settings.
    pub fn system_libs_patch(&self) -> SystemLibsPatch {
        let defaults = SystemLibsPatch::default();
        SystemLibsPatch {
            token: self.patch.token.clone().unwrap_or(defaults.token),
            patterns: self.patch.patterns.clone().unwrap_or(defaults.patterns),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.genhook/config.toml)
/// 2. Global config (~/.genhook/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global genhook config directory (`$GENHOOK_HOME` or `~/.genhook`).
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Some(PathBuf::from(home));
    }
    directories::BaseDirs::new().map(|b| b.home_dir().join(".genhook"))
}

/// Get the global config path (`~/.genhook/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (`.genhook/config.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".genhook").join("config.toml")
}
