//! High-level operations.
//!
//! This module contains the implementation of genhook commands.

pub mod genhook_generate;
pub mod genhook_init;
pub mod genhook_licenses;

pub use genhook_generate::{generate, GenerateOptions, GenerateReport};
pub use genhook_init::init_recipe;
pub use genhook_licenses::{import_licenses, LicenseReport};
