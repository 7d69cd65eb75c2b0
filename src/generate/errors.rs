//! Errors raised while rewriting generated files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure on a single target file.
///
/// None of these abort a generation run; callers degrade them to warnings
/// and leave the file as it was.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed preset file `{}`", .path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed preset file `{}`: {reason}", .path.display())]
    MalformedDescriptor { path: PathBuf, reason: String },
}

impl GenerateError {
    /// The file the error is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            GenerateError::Read { path, .. }
            | GenerateError::Write { path, .. }
            | GenerateError::MalformedJson { path, .. }
            | GenerateError::MalformedDescriptor { path, .. } => path,
        }
    }
}
