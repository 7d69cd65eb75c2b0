//! `genhook settings` command

use anyhow::Result;

use crate::cli::SettingsArgs;
use crate::commands::resolve_settings;
use genhook::util::GlobalContext;

pub fn execute(args: SettingsArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let settings = resolve_settings(&args, &ctx)?;

    println!("Settings:");
    println!("  build_type:       {}", settings.build_type);
    println!("  os:               {}", settings.os);
    println!("  arch:             {}", settings.arch);
    println!("  compiler:         {}", settings.compiler);
    println!("  compiler.version: {}", settings.compiler_version);
    println!();
    println!("Preset name: {}", settings.preset_name());

    Ok(())
}
