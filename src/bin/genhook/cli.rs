//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use genhook::core::PartialSettings;
use genhook::util::shell::ColorChoice;

/// genhook - build-configuration generation hook for CMake projects
#[derive(Parser)]
#[command(name = "genhook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default Recipe.toml
    Init(InitArgs),

    /// Run the generation hook: toolchain, presets, system libraries
    Generate(GenerateArgs),

    /// Rename presets in CMakePresets.json after the current settings
    Presets(PresetsArgs),

    /// Strip the C++ runtime from generated SYSTEM_LIBS lists
    Patch(PatchArgs),

    /// List the recipe's requirements
    Requirements,

    /// Show the resolved settings and preset name
    Settings(SettingsArgs),

    /// Copy dependency license files into one folder
    Licenses(LicensesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings overrides shared by several commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Build type (e.g. Release, Debug)
    #[arg(long, env = "GENHOOK_BUILD_TYPE")]
    pub build_type: Option<String>,

    /// Target operating system (e.g. Linux, Windows, Macos)
    #[arg(long)]
    pub os: Option<String>,

    /// Target architecture (e.g. x86_64, armv8)
    #[arg(long)]
    pub arch: Option<String>,

    /// Compiler name (e.g. gcc, clang, msvc)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Compiler version (e.g. 13)
    #[arg(long)]
    pub compiler_version: Option<String>,
}

impl SettingsArgs {
    pub fn to_partial(&self) -> PartialSettings {
        PartialSettings {
            build_type: self.build_type.clone(),
            os: self.os.clone(),
            arch: self.arch.clone(),
            compiler: self.compiler.clone(),
            compiler_version: self.compiler_version.clone(),
        }
    }
}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Path of CMakePresets.json
    #[arg(long)]
    pub presets: Option<PathBuf>,

    /// Folder holding the generated CMake files
    #[arg(long)]
    pub generators_folder: Option<PathBuf>,

    /// Toolchain file name inside the generators folder
    #[arg(long)]
    pub toolchain_file: Option<String>,

    /// Library token to strip from SYSTEM_LIBS
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Args)]
pub struct PresetsArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Path of CMakePresets.json
    #[arg(long)]
    pub presets: Option<PathBuf>,
}

#[derive(Args)]
pub struct PatchArgs {
    /// Folder holding the generated CMake files
    #[arg(long)]
    pub generators_folder: Option<PathBuf>,

    /// Library token to strip from SYSTEM_LIBS
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Args)]
pub struct LicensesArgs {
    /// Folder with one sub-folder per dependency package
    #[arg(long)]
    pub deps: PathBuf,

    /// Destination folder (defaults to `licenses` in the project)
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: CompletionShell,
}
