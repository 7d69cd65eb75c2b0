//! Global context for genhook operations.
//!
//! Locates the project directory and recipe, and loads the layered
//! configuration once per invocation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::recipe::Recipe;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Paths and configuration for one invocation.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory holding `Recipe.toml`, or the working directory
    project_dir: PathBuf,

    /// Merged configuration
    config: Config,
}

impl GlobalContext {
    /// Create a context for the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context for a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let project_dir = Recipe::find(&cwd)
            .and_then(|path| path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| cwd.clone());

        let global = global_config_path();
        let config = load_config(global.as_deref(), &project_config_path(&project_dir));

        GlobalContext {
            cwd,
            project_dir,
            config,
        }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the project's recipe, or the built-in one if there is none.
    pub fn recipe(&self) -> Result<Recipe> {
        Recipe::discover(&self.cwd)
    }
}
