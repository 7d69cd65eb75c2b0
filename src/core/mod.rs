//! Core data types: settings, requirements and the recipe.

pub mod recipe;
pub mod requirement;
pub mod settings;

pub use recipe::{PackageOptions, Recipe};
pub use requirement::{Requirement, RequirementError, VersionConstraint};
pub use settings::{PartialSettings, Settings, SettingsError};
