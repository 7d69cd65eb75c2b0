//! `genhook presets` command

use anyhow::Result;

use crate::cli::PresetsArgs;
use crate::commands::resolve_settings;
use genhook::generate::{normalize_presets, FileOutcome};
use genhook::util::fs::display_path;
use genhook::util::shell::{Shell, Status};
use genhook::util::GlobalContext;

pub fn execute(args: PresetsArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let settings = resolve_settings(&args.settings, &ctx)?;

    let path = args
        .presets
        .map(|p| ctx.cwd().join(p))
        .unwrap_or_else(|| ctx.config().presets_file(ctx.project_dir()));
    let shown = display_path(ctx.cwd(), &path);

    match normalize_presets(&path, &settings) {
        Ok(FileOutcome::Patched) => shell.status(
            Status::Patched,
            format!("{} (presets renamed to `{}`)", shown, settings.preset_name()),
        ),
        Ok(_) => shell.status(Status::Skipped, format!("{} (not found)", shown)),
        // Presets are best-effort; a broken file is reported, not fatal.
        Err(e) => shell.warn(format!("Failed to update CMake presets: {:#}", anyhow::Error::new(e))),
    }

    Ok(())
}
