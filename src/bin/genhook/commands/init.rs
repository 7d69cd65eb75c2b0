//! `genhook init` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InitArgs;
use genhook::ops::init_recipe;
use genhook::util::shell::{Shell, Status};

pub fn execute(args: InitArgs, shell: &Shell) -> Result<()> {
    let dir = args.path.unwrap_or_else(|| PathBuf::from("."));
    let path = init_recipe(&dir)?;

    shell.status(Status::Created, path.display());

    Ok(())
}
