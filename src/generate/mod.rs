//! Rewriting of files produced during build-configuration generation.
//!
//! - [`toolchain`]: writes the toolchain file with the build-type override
//! - [`presets`]: renames presets in `CMakePresets.json`
//! - [`syslibs`]: strips the C++ runtime from generated system-library lists
//!
//! Each step works file by file: a file is read completely, rewritten in
//! memory and replaced atomically, so it is either fully updated or left
//! exactly as it was.

pub mod cmake_set;
pub mod errors;
pub mod presets;
pub mod syslibs;
pub mod toolchain;

use std::fmt;

pub use errors::GenerateError;
pub use presets::{normalize_presets, rewrite_presets, PresetRename, PRESETS_FILE};
pub use syslibs::{patch_system_libs, strip_token, PatchReport, SystemLibsPatch};
pub use toolchain::{ToolchainFile, ToolchainValue, TOOLCHAIN_FILE};

/// Terminal state of one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Absent, or nothing to change.
    Skipped,
    /// Rewritten in place.
    Patched,
    /// Left untouched after an error; carries the warning text.
    Failed(String),
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Skipped => write!(f, "skipped"),
            FileOutcome::Patched => write!(f, "patched"),
            FileOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
