//! `genhook patch` command

use anyhow::Result;

use crate::cli::PatchArgs;
use genhook::generate::patch_system_libs;
use genhook::util::fs::display_path;
use genhook::util::shell::{Shell, Status};
use genhook::util::GlobalContext;

pub fn execute(args: PatchArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.config();

    let dir = args
        .generators_folder
        .map(|p| ctx.cwd().join(p))
        .unwrap_or_else(|| config.generators_folder(ctx.project_dir()));

    let mut patch = config.system_libs_patch();
    if let Some(token) = args.token {
        patch.token = token;
    }

    let report = patch_system_libs(&dir, &patch)?;

    if report.files.is_empty() {
        shell.status(
            Status::Skipped,
            format!("no generated data files in {}", display_path(ctx.cwd(), &dir)),
        );
        return Ok(());
    }

    for (path, outcome) in &report.files {
        shell.verbose(Status::Info, format!("{}: {}", display_path(ctx.cwd(), path), outcome));
    }

    shell.status(
        Status::Finished,
        format!(
            "{} of {} data file(s) patched",
            report.patched_count(),
            report.files.len()
        ),
    );

    Ok(())
}
