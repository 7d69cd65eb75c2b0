//! Implementation of `genhook init`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::recipe::{default_manifest, RECIPE_FILE};

/// Write the built-in recipe as `Recipe.toml` into `dir`.
pub fn init_recipe(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(RECIPE_FILE);
    if path.exists() {
        bail!("`{}` already exists in `{}`", RECIPE_FILE, dir.display());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    std::fs::write(&path, default_manifest()?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}
