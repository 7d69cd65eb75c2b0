//! Build settings: the configuration key a generation run is keyed on.
//!
//! Settings mirror the package manager's `build_type`, `os`, `arch`,
//! `compiler` and `compiler.version`. They are always passed explicitly;
//! nothing in the hook looks them up from ambient state.

use std::fmt;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error resolving a complete set of settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("setting `{0}` is not specified and could not be detected")]
    Missing(&'static str),
}

/// A fully resolved configuration key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub build_type: String,
    pub os: String,
    pub arch: String,
    pub compiler: String,
    pub compiler_version: String,
}

impl Settings {
    /// Create settings from explicit components.
    pub fn new(
        build_type: impl Into<String>,
        os: impl Into<String>,
        arch: impl Into<String>,
        compiler: impl Into<String>,
        compiler_version: impl Into<String>,
    ) -> Self {
        Settings {
            build_type: build_type.into(),
            os: os.into(),
            arch: arch.into(),
            compiler: compiler.into(),
            compiler_version: compiler_version.into(),
        }
    }

    /// Derived preset identifier, e.g. `release-linux-x86_64-gcc-13`.
    ///
    /// Build type and OS are lowercased; arch, compiler and compiler
    /// version are used as given.
    pub fn preset_name(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.build_type.to_lowercase(),
            self.os.to_lowercase(),
            self.arch,
            self.compiler,
            self.compiler_version
        )
    }

    /// Whether the target OS is Windows.
    pub fn is_windows(&self) -> bool {
        self.os.eq_ignore_ascii_case("windows")
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "build_type={} os={} arch={} compiler={} compiler.version={}",
            self.build_type, self.os, self.arch, self.compiler, self.compiler_version
        )
    }
}

/// Settings where any component may still be unknown.
///
/// Layers are combined with [`PartialSettings::or`]; the first layer that
/// specifies a component wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialSettings {
    pub build_type: Option<String>,
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    pub compiler_version: Option<String>,
}

impl PartialSettings {
    /// Fill components missing from `self` with those of `fallback`.
    pub fn or(self, fallback: PartialSettings) -> PartialSettings {
        PartialSettings {
            build_type: self.build_type.or(fallback.build_type),
            os: self.os.or(fallback.os),
            arch: self.arch.or(fallback.arch),
            compiler: self.compiler.or(fallback.compiler),
            compiler_version: self.compiler_version.or(fallback.compiler_version),
        }
    }

    /// Whether every component is specified.
    pub fn is_complete(&self) -> bool {
        self.build_type.is_some()
            && self.os.is_some()
            && self.arch.is_some()
            && self.compiler.is_some()
            && self.compiler_version.is_some()
    }

    /// Turn into complete settings, naming the first missing component.
    pub fn resolve(self) -> Result<Settings, SettingsError> {
        Ok(Settings {
            build_type: self.build_type.ok_or(SettingsError::Missing("build_type"))?,
            os: self.os.ok_or(SettingsError::Missing("os"))?,
            arch: self.arch.ok_or(SettingsError::Missing("arch"))?,
            compiler: self.compiler.ok_or(SettingsError::Missing("compiler"))?,
            compiler_version: self
                .compiler_version
                .ok_or(SettingsError::Missing("compiler_version"))?,
        })
    }

    /// Detect settings from the host.
    ///
    /// Compiler detection runs only when `detect_compiler` is set, since it
    /// spawns the compiler.
    pub fn detect_host(detect_compiler: bool) -> PartialSettings {
        let mut detected = PartialSettings {
            build_type: Some("Release".to_string()),
            os: host_os().map(str::to_string),
            arch: host_arch().map(str::to_string),
            compiler: None,
            compiler_version: None,
        };

        if detect_compiler {
            if let Some((compiler, version)) = detect_cxx_compiler() {
                detected.compiler = Some(compiler);
                detected.compiler_version = version;
            }
        }

        detected
    }
}

/// Host OS in the package manager's spelling.
fn host_os() -> Option<&'static str> {
    match std::env::consts::OS {
        "linux" => Some("Linux"),
        "macos" => Some("Macos"),
        "windows" => Some("Windows"),
        "freebsd" => Some("FreeBSD"),
        _ => None,
    }
}

/// Host architecture in the package manager's spelling.
fn host_arch() -> Option<&'static str> {
    map_arch(std::env::consts::ARCH)
}

/// Map a Rust architecture name to the package manager's name.
pub fn map_arch(arch: &str) -> Option<&'static str> {
    match arch {
        "x86_64" => Some("x86_64"),
        "x86" => Some("x86"),
        "aarch64" => Some("armv8"),
        "arm" => Some("armv7"),
        "riscv64" => Some("riscv64"),
        _ => None,
    }
}

/// Map a compiler executable to a compiler family name.
pub fn compiler_family(program: &Path) -> Option<&'static str> {
    let stem = program.file_stem()?.to_str()?.to_lowercase();

    if stem == "cl" {
        Some("msvc")
    } else if stem.contains("clang") {
        if cfg!(target_os = "macos") {
            Some("apple-clang")
        } else {
            Some("clang")
        }
    } else if stem.contains("g++") || stem.contains("gcc") || stem == "c++" {
        Some("gcc")
    } else {
        None
    }
}

/// Find a C++ compiler via `CXX` or `PATH` and query its version.
fn detect_cxx_compiler() -> Option<(String, Option<String>)> {
    let program = std::env::var_os("CXX")
        .and_then(|cxx| which::which(cxx).ok())
        .or_else(|| {
            ["g++", "clang++", "cl"]
                .iter()
                .find_map(|name| which::which(name).ok())
        })?;

    let family = compiler_family(&program)?;
    tracing::debug!("detected {} compiler at {}", family, program.display());

    // MSVC has no -dumpversion; its version is left for the user to set.
    if family == "msvc" {
        return Some((family.to_string(), None));
    }

    let output = Command::new(&program).arg("-dumpversion").output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = major_version(stdout.trim());

    Some((family.to_string(), version))
}

/// Major component of a dotted version string.
pub fn major_version(version: &str) -> Option<String> {
    let major = version.split('.').next()?.trim();
    if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(major.to_string())
}
