//! System-library patching for generated `*-data.cmake` files.
//!
//! The package manager's CMake generator lists the system libraries each
//! dependency expects in `set(<pkg>_SYSTEM_LIBS<_CONFIG> ...)` assignments.
//! Some toolchains fail with duplicate-link errors when the C++ runtime
//! shows up there, so the runtime token is removed from those lists.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::generate::cmake_set::parse_commands;
use crate::generate::errors::GenerateError;
use crate::generate::FileOutcome;
use crate::util::fs::{glob_files, write_atomic};

/// Variable names holding system-library lists.
static SYSTEM_LIBS_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S*_SYSTEM_LIBS(?:_[A-Z]+)?$").unwrap());

/// What to strip and where to look for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemLibsPatch {
    /// Library token to remove.
    pub token: String,
    /// File name patterns relative to the generators folder.
    pub patterns: Vec<String>,
}

impl Default for SystemLibsPatch {
    fn default() -> Self {
        SystemLibsPatch {
            token: "stdc++".to_string(),
            patterns: vec!["*-data.cmake".to_string(), "*-*-*-data.cmake".to_string()],
        }
    }
}

/// Result of patching one generators folder.
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    /// Every candidate file with its outcome, sorted by path.
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl PatchReport {
    /// Files that were rewritten.
    pub fn patched(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|(_, outcome)| *outcome == FileOutcome::Patched)
            .map(|(path, _)| path.as_path())
    }

    pub fn patched_count(&self) -> usize {
        self.patched().count()
    }

    /// Files that could not be processed, with the reason.
    pub fn failed(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().filter_map(|(path, outcome)| match outcome {
            FileOutcome::Failed(reason) => Some((path.as_path(), reason.as_str())),
            _ => None,
        })
    }
}

/// Whether `name` is a system-library list variable.
pub fn is_system_libs_var(name: &str) -> bool {
    SYSTEM_LIBS_VAR.is_match(name)
}

/// Remove every `token` argument from system-library `set()` assignments.
///
/// Returns `None` when nothing changed. Other arguments, spacing and
/// comments are kept; the whitespace that separated a removed token from
/// its neighbour goes with it.
pub fn strip_token(content: &str, token: &str) -> Option<String> {
    let bytes = content.as_bytes();
    let mut removals: Vec<Range<usize>> = Vec::new();

    for cmd in parse_commands(content) {
        if !cmd.is_set(content) {
            continue;
        }
        let Some((name, values)) = cmd.args.split_first() else {
            continue;
        };
        if !is_system_libs_var(name.value(content)) {
            continue;
        }

        let kept: Vec<bool> = values.iter().map(|a| a.value(content) != token).collect();

        for (idx, arg) in values.iter().enumerate() {
            if kept[idx] {
                continue;
            }

            let kept_after = kept[idx + 1..].contains(&true);
            let kept_before = kept[..idx].contains(&true);

            let mut range = arg.range();
            if kept_after || (!kept_before && idx + 1 < values.len()) {
                while range.end < bytes.len() && bytes[range.end].is_ascii_whitespace() {
                    range.end += 1;
                }
            } else if kept_before {
                // Never join the closing paren onto a line that may end in a comment.
                while range.start > 0
                    && bytes[range.start - 1].is_ascii_whitespace()
                    && bytes[range.start - 1] != b'\n'
                {
                    range.start -= 1;
                }
            }
            removals.push(range);
        }
    }

    if removals.is_empty() {
        return None;
    }

    removals.sort_by_key(|r| r.start);
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for range in removals {
        if range.start > cursor {
            out.push_str(&content[cursor..range.start]);
        }
        cursor = cursor.max(range.end);
    }
    out.push_str(&content[cursor..]);

    Some(out)
}

/// Find the generated data files in `dir`.
pub fn discover_data_files(dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    glob_files(dir, patterns)
}

/// Patch a single file.
pub fn patch_file(path: &Path, token: &str) -> Result<FileOutcome, GenerateError> {
    let content = fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(patched) = strip_token(&content, token) else {
        return Ok(FileOutcome::Skipped);
    };

    write_atomic(path, patched.as_bytes()).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(FileOutcome::Patched)
}

/// Strip the configured token from every data file in `dir`.
///
/// A file that cannot be read or written is reported and skipped; the rest
/// are still processed.
pub fn patch_system_libs(dir: &Path, patch: &SystemLibsPatch) -> Result<PatchReport> {
    let candidates = discover_data_files(dir, &patch.patterns)?;
    let mut report = PatchReport::default();

    if candidates.is_empty() {
        tracing::debug!("no generated data files in {}", dir.display());
        return Ok(report);
    }

    for path in candidates {
        let outcome = match patch_file(&path, &patch.token) {
            Ok(FileOutcome::Patched) => {
                tracing::info!(
                    "Patched {} - removed {} from SYSTEM_LIBS",
                    path.display(),
                    patch.token
                );
                FileOutcome::Patched
            }
            Ok(outcome) => outcome,
            Err(e) => {
                let reason = format!("{:#}", anyhow::Error::new(e));
                tracing::warn!("Could not patch {}: {}", path.display(), reason);
                FileOutcome::Failed(reason)
            }
        };
        report.files.push((path, outcome));
    }

    let count = report.patched_count();
    if count > 0 {
        tracing::info!("Successfully patched {} CMake files", count);
    }

    Ok(report)
}
