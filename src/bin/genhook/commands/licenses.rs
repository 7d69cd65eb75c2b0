//! `genhook licenses` command

use anyhow::Result;

use crate::cli::LicensesArgs;
use genhook::ops::import_licenses;
use genhook::util::fs::display_path;
use genhook::util::shell::{Shell, Status};
use genhook::util::GlobalContext;

pub fn execute(args: LicensesArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let deps = ctx.cwd().join(&args.deps);
    let dest = args
        .dest
        .map(|d| ctx.cwd().join(d))
        .unwrap_or_else(|| ctx.project_dir().join("licenses"));

    let report = import_licenses(&deps, &dest)?;

    for path in &report.copied {
        shell.verbose(Status::Copied, display_path(ctx.cwd(), path));
    }

    shell.status(
        Status::Finished,
        format!(
            "{} license file(s) from {} package(s) into {}",
            report.copied.len(),
            report.packages.len(),
            display_path(ctx.cwd(), &dest)
        ),
    );

    Ok(())
}
