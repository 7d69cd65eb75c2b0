//! genhook - build-configuration generation hook for CMake projects
//!
//! This crate provides the library behind the `genhook` binary: the recipe
//! model, toolchain file generation, preset normalization and patching of
//! generated system-library lists.

pub mod core;
pub mod generate;
pub mod ops;
pub mod util;

/// Test utilities for genhook unit tests.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{recipe::Recipe, requirement::Requirement, settings::Settings};
pub use generate::FileOutcome;
pub use util::context::GlobalContext;
