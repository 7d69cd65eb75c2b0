//! Toolchain file generation.
//!
//! The toolchain file carries the variables CMake needs before the first
//! `project()` call: the build-type override from the settings and the
//! library kind and PIC defaults from the recipe options.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{PackageOptions, Settings};
use crate::util::fs::{ensure_dir, write_atomic};

/// Default toolchain file name inside the generators folder.
pub const TOOLCHAIN_FILE: &str = "genhook_toolchain.cmake";

/// A cache variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainValue {
    String(String),
    Bool(bool),
}

impl ToolchainValue {
    fn render(&self) -> (String, &'static str) {
        match self {
            ToolchainValue::String(s) => (format!("\"{}\"", escape(s)), "STRING"),
            ToolchainValue::Bool(true) => ("ON".to_string(), "BOOL"),
            ToolchainValue::Bool(false) => ("OFF".to_string(), "BOOL"),
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "\\$")
}

/// Ordered toolchain variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainFile {
    /// Identifier of the configuration the file was generated for.
    pub configuration: String,
    variables: Vec<(String, ToolchainValue)>,
}

impl ToolchainFile {
    /// Variables for one configuration.
    pub fn new(settings: &Settings, options: &PackageOptions) -> Self {
        let mut file = ToolchainFile {
            configuration: settings.preset_name(),
            variables: Vec::new(),
        };

        file.set(
            "CMAKE_BUILD_TYPE",
            ToolchainValue::String(settings.build_type.clone()),
        );
        file.set("BUILD_SHARED_LIBS", ToolchainValue::Bool(options.shared));
        if !settings.is_windows() {
            file.set(
                "CMAKE_POSITION_INDEPENDENT_CODE",
                ToolchainValue::Bool(options.fpic),
            );
        }

        file
    }

    /// Set a variable, replacing an earlier value in place.
    pub fn set(&mut self, name: impl Into<String>, value: ToolchainValue) {
        let name = name.into();
        match self.variables.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.variables.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolchainValue> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn variables(&self) -> &[(String, ToolchainValue)] {
        &self.variables
    }

    /// CMake source for the toolchain file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "# Generated by genhook for {}. Do not edit.\n",
            self.configuration
        ));
        out.push_str("include_guard()\n\n");

        for (name, value) in &self.variables {
            let (rendered, kind) = value.render();
            out.push_str(&format!(
                "set({} {} CACHE {} \"Variable {} defined by genhook\")\n",
                name, rendered, kind, name
            ));
        }

        out
    }

    /// Write the file into `dir` under `file_name`; returns its path.
    pub fn write(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        ensure_dir(dir)?;
        let path = dir.join(file_name);
        write_atomic(&path, self.render().as_bytes())
            .with_context(|| format!("failed to write toolchain file: {}", path.display()))?;
        tracing::debug!("wrote toolchain file {}", path.display());
        Ok(path)
    }
}
