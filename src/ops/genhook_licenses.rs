//! Implementation of `genhook licenses`.
//!
//! Copies the license files shipped by each dependency into one folder so
//! they can be installed alongside the binaries.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::util::fs::copy_file;

/// Result of a license import.
#[derive(Debug, Clone, Default)]
pub struct LicenseReport {
    /// Destination paths of the copied files.
    pub copied: Vec<PathBuf>,
    /// Packages that shipped at least one license file.
    pub packages: Vec<String>,
}

/// Whether a file name looks like a license file.
pub fn is_license_file(name: &str) -> bool {
    name.to_lowercase().starts_with("license")
}

/// Copy license files from each package folder under `deps_root` into
/// `dest/<package>/`, keeping their relative layout.
///
/// A missing `deps_root` imports nothing.
pub fn import_licenses(deps_root: &Path, dest: &Path) -> Result<LicenseReport> {
    let mut report = LicenseReport::default();

    if !deps_root.is_dir() {
        tracing::debug!("no dependency folder at {}", deps_root.display());
        return Ok(report);
    }

    let mut packages: Vec<PathBuf> = fs::read_dir(deps_root)
        .with_context(|| format!("failed to read directory: {}", deps_root.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir() && !path.starts_with(dest))
        .collect();
    packages.sort();

    for package_dir in packages {
        let Some(package) = package_dir.file_name().map(|n| n.to_string_lossy().into_owned())
        else {
            continue;
        };
        let before = report.copied.len();

        for entry in WalkDir::new(&package_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry in {}: {}", package_dir.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file()
                || !is_license_file(&entry.file_name().to_string_lossy())
            {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&package_dir)
                .unwrap_or(entry.path());
            let target = dest.join(&package).join(rel);

            copy_file(entry.path(), &target)?;
            tracing::debug!("copied {} to {}", entry.path().display(), target.display());
            report.copied.push(target);
        }

        if report.copied.len() > before {
            report.packages.push(package);
        }
    }

    Ok(report)
}
