//! Package requirements.
//!
//! A requirement is a package reference of the form `name/version`, where
//! the version is either a bare exact pin (`opus/1.5.2`) or a bracketed
//! range expression (`fmt/[11.2.0]`, `zlib/[~1.3]`, `cmake/[>3.14]`).

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};
use thiserror::Error;

/// Error parsing a package reference.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequirementError {
    #[error("invalid package reference `{0}`: expected `name/version`")]
    MissingVersion(String),

    #[error("invalid package name in `{0}`")]
    InvalidName(String),

    #[error("unterminated version range in `{0}`")]
    UnterminatedRange(String),

    #[error("invalid version range `{range}` in `{reference}`: {reason}")]
    InvalidRange {
        reference: String,
        range: String,
        reason: String,
    },
}

/// How a requirement constrains the version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Exactly one version, bare (`1.5.2`) or bracketed (`[11.2.0]`).
    Exact(String),
    /// Tilde range: patch-level changes only (`[~1.3]`).
    Tilde(VersionReq),
    /// Open or bounded comparator range (`[>3.14]`, `[>=1.0 <2.0]`).
    Range(VersionReq),
}

impl VersionConstraint {
    /// Check whether a concrete version satisfies this constraint.
    ///
    /// Versions are parsed leniently: missing minor/patch components are
    /// treated as zero.
    pub fn matches(&self, version: &str) -> bool {
        match self {
            VersionConstraint::Exact(pinned) => match (lenient_version(pinned), lenient_version(version)) {
                (Some(a), Some(b)) => a == b,
                _ => pinned == version,
            },
            VersionConstraint::Tilde(req) | VersionConstraint::Range(req) => {
                lenient_version(version).is_some_and(|v| req.matches(&v))
            }
        }
    }

    /// Short name of the constraint kind.
    pub fn kind(&self) -> &'static str {
        match self {
            VersionConstraint::Exact(_) => "exact",
            VersionConstraint::Tilde(_) => "tilde",
            VersionConstraint::Range(_) => "range",
        }
    }
}

/// A declared dependency on another package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    name: String,
    /// Version part exactly as written (`[~1.3]`, `1.5.2`).
    version_text: String,
    constraint: VersionConstraint,
}

impl Requirement {
    /// Parse a `name/version` package reference.
    pub fn parse(reference: &str) -> Result<Self, RequirementError> {
        let reference = reference.trim();
        let (name, version_text) = reference
            .split_once('/')
            .ok_or_else(|| RequirementError::MissingVersion(reference.to_string()))?;

        if !is_valid_name(name) {
            return Err(RequirementError::InvalidName(reference.to_string()));
        }
        if version_text.is_empty() {
            return Err(RequirementError::MissingVersion(reference.to_string()));
        }

        let constraint = if let Some(inner) = version_text.strip_prefix('[') {
            let inner = inner
                .strip_suffix(']')
                .ok_or_else(|| RequirementError::UnterminatedRange(reference.to_string()))?;
            parse_range(reference, inner.trim())?
        } else {
            VersionConstraint::Exact(version_text.to_string())
        };

        Ok(Requirement {
            name: name.to_string(),
            version_text: version_text.to_string(),
            constraint,
        })
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version constraint.
    pub fn constraint(&self) -> &VersionConstraint {
        &self.constraint
    }
}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Requirement::parse(s)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version_text)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
}

/// Parse the expression inside `[...]`.
fn parse_range(reference: &str, expr: &str) -> Result<VersionConstraint, RequirementError> {
    let invalid = |reason: String| RequirementError::InvalidRange {
        reference: reference.to_string(),
        range: expr.to_string(),
        reason,
    };

    if expr.is_empty() {
        return Err(invalid("empty range".to_string()));
    }
    if expr.contains("||") {
        return Err(invalid("alternative ranges are not supported".to_string()));
    }

    if expr.starts_with(|c: char| c.is_ascii_digit()) && !expr.contains(char::is_whitespace) {
        return Ok(VersionConstraint::Exact(expr.to_string()));
    }

    // Comparators are space-separated in references, comma-separated in semver.
    let semver_expr = expr
        .split_whitespace()
        .map(pad_comparator)
        .collect::<Vec<_>>()
        .join(", ");
    let req = VersionReq::parse(&semver_expr).map_err(|e| invalid(e.to_string()))?;

    if expr.starts_with('~') {
        Ok(VersionConstraint::Tilde(req))
    } else {
        Ok(VersionConstraint::Range(req))
    }
}

/// Expand the partial bound of a `>` or `<=` comparator to a full version.
///
/// semver reads `>3.14` as `>=3.15.0` and `<=3.14` as `<3.15.0`; references
/// compare against `3.14.0` instead, so `3.14.5` satisfies `>3.14`.
fn pad_comparator(comparator: &str) -> String {
    let split = comparator
        .find(|c: char| !matches!(c, '>' | '<' | '='))
        .unwrap_or(comparator.len());
    let (op, bound) = comparator.split_at(split);

    match (op, lenient_version(bound)) {
        (">" | "<=", Some(version)) => format!("{}{}", op, version),
        _ => comparator.to_string(),
    }
}

/// Parse `1`, `1.3` or `1.3.1` as a semver version.
fn lenient_version(version: &str) -> Option<Version> {
    let parts = version.split('.').count();
    let padded = match parts {
        1 => format!("{}.0.0", version),
        2 => format!("{}.0", version),
        _ => version.to_string(),
    };
    Version::parse(&padded).ok()
}
