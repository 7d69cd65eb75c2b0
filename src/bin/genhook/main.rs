//! genhook CLI - build-configuration generation hook

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use genhook::util::Shell;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.quiet {
        EnvFilter::new("genhook=error")
    } else if cli.verbose {
        EnvFilter::new("genhook=debug")
    } else {
        EnvFilter::new("genhook=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    // Execute command
    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &shell),
        Commands::Generate(args) => commands::generate::execute(args, &shell),
        Commands::Presets(args) => commands::presets::execute(args, &shell),
        Commands::Patch(args) => commands::patch::execute(args, &shell),
        Commands::Requirements => commands::requirements::execute(),
        Commands::Settings(args) => commands::settings::execute(args),
        Commands::Licenses(args) => commands::licenses::execute(args, &shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
