//! Test utilities for genhook unit tests.
//!
//! Provides canned file contents in the shapes the package manager and CMake
//! generate, plus a builder that lays them out in a temporary project.

pub mod fixtures;

pub use fixtures::*;
