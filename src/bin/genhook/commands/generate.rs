//! `genhook generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::resolve_settings;
use genhook::generate::FileOutcome;
use genhook::ops::{generate, GenerateOptions};
use genhook::util::fs::display_path;
use genhook::util::shell::{Shell, Status};
use genhook::util::GlobalContext;

pub fn execute(args: GenerateArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.config();
    let recipe = ctx.recipe()?;
    let settings = resolve_settings(&args.settings, &ctx)?;

    let mut patch = config.system_libs_patch();
    if let Some(token) = args.token {
        patch.token = token;
    }

    let opts = GenerateOptions {
        presets_file: args
            .presets
            .map(|p| ctx.cwd().join(p))
            .unwrap_or_else(|| config.presets_file(ctx.project_dir())),
        generators_folder: args
            .generators_folder
            .map(|p| ctx.cwd().join(p))
            .unwrap_or_else(|| config.generators_folder(ctx.project_dir())),
        toolchain_file: args.toolchain_file.unwrap_or_else(|| config.toolchain_file()),
        options: recipe.options,
        settings,
        patch,
    };

    shell.verbose(Status::Info, format!("settings: {}", opts.settings));

    let report = generate(&opts)?;
    let cwd = ctx.cwd();

    shell.status(
        Status::Generated,
        display_path(cwd, &report.toolchain),
    );

    match &report.presets {
        FileOutcome::Patched => shell.status(
            Status::Patched,
            format!(
                "{} (presets renamed to `{}`)",
                display_path(cwd, &opts.presets_file),
                opts.settings.preset_name()
            ),
        ),
        FileOutcome::Skipped => shell.verbose(
            Status::Skipped,
            format!("{} (not found)", display_path(cwd, &opts.presets_file)),
        ),
        FileOutcome::Failed(_) => {}
    }

    shell.status(
        Status::Finished,
        format!(
            "`{}` for {}/{} ({} data file(s) patched)",
            opts.settings.preset_name(),
            recipe.name(),
            recipe.version(),
            report.system_libs.patched_count()
        ),
    );

    Ok(())
}
