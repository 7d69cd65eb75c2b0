//! Implementation of `genhook generate`: the generation hook.
//!
//! Runs the toolchain step, then preset normalization, then system-library
//! patching. Only the toolchain step can fail the run; the other two
//! degrade to warnings so a best-effort configuration still comes out.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::{PackageOptions, Settings};
use crate::generate::{
    normalize_presets, patch_system_libs, FileOutcome, PatchReport, SystemLibsPatch,
    ToolchainFile,
};

/// Options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Configuration the run is keyed on.
    pub settings: Settings,

    /// The recipe's own options.
    pub options: PackageOptions,

    /// Path of `CMakePresets.json`.
    pub presets_file: PathBuf,

    /// Folder the generated CMake files live in.
    pub generators_folder: PathBuf,

    /// File name of the toolchain file inside the generators folder.
    pub toolchain_file: String,

    /// System-library patch settings.
    pub patch: SystemLibsPatch,
}

/// What a generation run did.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Path of the written toolchain file.
    pub toolchain: PathBuf,

    /// Outcome of preset normalization.
    pub presets: FileOutcome,

    /// Outcome of system-library patching.
    pub system_libs: PatchReport,
}

/// Run the generation hook.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateReport> {
    let toolchain = ToolchainFile::new(&opts.settings, &opts.options)
        .write(&opts.generators_folder, &opts.toolchain_file)?;

    let presets = match normalize_presets(&opts.presets_file, &opts.settings) {
        Ok(outcome) => outcome,
        Err(e) => {
            let reason = format!("{:#}", anyhow::Error::new(e));
            tracing::warn!("Failed to update CMake presets: {}", reason);
            FileOutcome::Failed(reason)
        }
    };

    let system_libs = match patch_system_libs(&opts.generators_folder, &opts.patch) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!("Could not patch system libraries: {:#}", e);
            PatchReport::default()
        }
    };

    Ok(GenerateReport {
        toolchain,
        presets,
        system_libs,
    })
}
