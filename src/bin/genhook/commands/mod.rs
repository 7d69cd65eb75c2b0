//! Command implementations

pub mod completions;
pub mod generate;
pub mod init;
pub mod licenses;
pub mod patch;
pub mod presets;
pub mod requirements;
pub mod settings;

use anyhow::{anyhow, Result};

use crate::cli::SettingsArgs;
use genhook::core::{PartialSettings, Settings};
use genhook::util::GlobalContext;

/// Resolve settings: flags, then config files, then host detection.
pub fn resolve_settings(args: &SettingsArgs, ctx: &GlobalContext) -> Result<Settings> {
    let mut partial = args.to_partial().or(ctx.config().settings.clone());

    if !partial.is_complete() {
        let detect_compiler = partial.compiler.is_none() || partial.compiler_version.is_none();
        let mut detected = PartialSettings::detect_host(detect_compiler);

        // A detected version only describes the detected compiler.
        if partial.compiler.is_some() && partial.compiler != detected.compiler {
            detected.compiler_version = None;
        }
        partial = partial.or(detected);
    }

    partial.resolve().map_err(|e| {
        anyhow!(
            "{}\n\
             \n\
             help: pass it on the command line or set it under [settings] in .genhook/config.toml",
            e
        )
    })
}
