//! Recipe.toml parsing and schema.
//!
//! The recipe declares the package identity, its options, per-dependency
//! option overrides and the ordered list of requirements handed to the
//! package resolver. The hook reads it but never mutates it.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::requirement::Requirement;

/// Canonical recipe file name.
pub const RECIPE_FILE: &str = "Recipe.toml";

/// Requirements of the built-in recipe, in declaration order.
const DEFAULT_REQUIRES: &[&str] = &[
    "fmt/[11.2.0]",
    "zlib/[~1.3]",
    "nlohmann_json/[~3.11]",
    "opus/1.5.2",
    "openssl/3.4.1",
    "libcurl/8.12.1",
    "tinyxml2/11.0.0",
];

/// `[package]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
}

/// `[options]` section: the package's own options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOptions {
    #[serde(default)]
    pub shared: bool,

    #[serde(default = "default_true", rename = "fPIC")]
    pub fpic: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        PackageOptions {
            shared: false,
            fpic: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Option overrides applied to dependencies matching a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,

    #[serde(default, rename = "fPIC", skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
}

impl OptionOverrides {
    fn apply(&self, options: &mut PackageOptions) {
        if let Some(shared) = self.shared {
            options.shared = shared;
        }
        if let Some(fpic) = self.fpic {
            options.fpic = fpic;
        }
    }
}

/// `[requirements]` section as written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RequirementsSection {
    #[serde(default)]
    requires: Vec<String>,

    #[serde(default, rename = "tool-requires")]
    tool_requires: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawRecipe {
    package: PackageMetadata,

    #[serde(default)]
    options: PackageOptions,

    #[serde(default, rename = "dependency-options")]
    dependency_options: BTreeMap<String, OptionOverrides>,

    #[serde(default)]
    requirements: RequirementsSection,
}

/// A parsed recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub package: PackageMetadata,
    pub options: PackageOptions,
    /// Pattern (`*` or an exact package name) to overrides.
    pub dependency_options: BTreeMap<String, OptionOverrides>,
    requires: Vec<Requirement>,
    tool_requires: Vec<Requirement>,
    path: Option<PathBuf>,
}

impl Recipe {
    /// The recipe used when no `Recipe.toml` exists.
    pub fn default_recipe() -> Self {
        let mut dependency_options = BTreeMap::new();
        dependency_options.insert(
            "*".to_string(),
            OptionOverrides {
                shared: Some(false),
                fpic: None,
            },
        );

        Recipe {
            package: PackageMetadata {
                name: "ibot".to_string(),
                version: "1.0".to_string(),
            },
            options: PackageOptions::default(),
            dependency_options,
            requires: DEFAULT_REQUIRES
                .iter()
                .filter_map(|r| Requirement::parse(r).ok())
                .collect(),
            tool_requires: Vec::new(),
            path: None,
        }
    }

    /// Load a recipe from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe: {}", path.display()))?;
        Recipe::parse(&content, path)
    }

    /// Find `Recipe.toml` in `start` or any ancestor directory.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(RECIPE_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load the recipe found from `start`, or the built-in one.
    pub fn discover(start: &Path) -> Result<Self> {
        match Recipe::find(start) {
            Some(path) => {
                tracing::debug!("using recipe {}", path.display());
                Recipe::load(&path)
            }
            None => {
                tracing::debug!("no {} found, using built-in recipe", RECIPE_FILE);
                Ok(Recipe::default_recipe())
            }
        }
    }

    /// Parse recipe text. `path` is used for error messages only.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawRecipe = toml::from_str(content)
            .with_context(|| format!("failed to parse recipe: {}", path.display()))?;

        let requires = parse_requirements(&raw.requirements.requires, "requires", path)?;
        let tool_requires =
            parse_requirements(&raw.requirements.tool_requires, "tool-requires", path)?;

        Ok(Recipe {
            package: raw.package,
            options: raw.options,
            dependency_options: raw.dependency_options,
            requires,
            tool_requires,
            path: Some(path.to_path_buf()),
        })
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Package version as written.
    pub fn version(&self) -> &str {
        &self.package.version
    }

    /// Regular requirements in declaration order.
    pub fn requires(&self) -> &[Requirement] {
        &self.requires
    }

    /// Build-tool requirements in declaration order.
    pub fn tool_requires(&self) -> &[Requirement] {
        &self.tool_requires
    }

    /// Where the recipe was loaded from, if anywhere.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Effective options for one dependency.
    ///
    /// The `*` entry applies first, then the entry named after the package.
    pub fn dependency_options(&self, name: &str) -> PackageOptions {
        let mut options = PackageOptions::default();

        if let Some(all) = self.dependency_options.get("*") {
            all.apply(&mut options);
        }
        if let Some(exact) = self.dependency_options.get(name) {
            exact.apply(&mut options);
        }

        options
    }

    /// Render as `Recipe.toml` text.
    pub fn to_manifest(&self) -> Result<String> {
        let raw = RawRecipe {
            package: self.package.clone(),
            options: self.options,
            dependency_options: self.dependency_options.clone(),
            requirements: RequirementsSection {
                requires: self.requires.iter().map(ToString::to_string).collect(),
                tool_requires: self.tool_requires.iter().map(ToString::to_string).collect(),
            },
        };
        toml::to_string_pretty(&raw).context("failed to serialize recipe")
    }
}

fn parse_requirements(refs: &[String], field: &str, path: &Path) -> Result<Vec<Requirement>> {
    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(refs.len());

    for reference in refs {
        let req = Requirement::parse(reference)
            .with_context(|| format!("invalid `{}` entry in {}", field, path.display()))?;

        if !seen.insert(req.name().to_string()) {
            bail!(
                "package `{}` is required more than once in `{}` of {}",
                req.name(),
                field,
                path.display()
            );
        }
        parsed.push(req);
    }

    Ok(parsed)
}

/// The built-in recipe as `Recipe.toml` text.
pub fn default_manifest() -> Result<String> {
    Recipe::default_recipe().to_manifest()
}
