//! Preset normalization for `CMakePresets.json`.
//!
//! Every configure preset is renamed to the identifier derived from the
//! current settings, and build/test presets that referenced one of them are
//! renamed along with their reference. Generating several configurations
//! into the same tree then never produces clashing preset names.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::core::Settings;
use crate::generate::errors::GenerateError;
use crate::generate::FileOutcome;
use crate::util::fs::write_atomic;

/// Default preset file name, looked up in the working directory.
pub const PRESETS_FILE: &str = "CMakePresets.json";

/// Preset arrays whose records reference a configure preset.
const DEPENDENT_PRESETS: &[&str] = &["buildPresets", "testPresets"];

/// What a rewrite changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetRename {
    /// Configure presets renamed.
    pub configure: usize,
    /// Build and test presets renamed.
    pub dependent: usize,
    /// `configurePreset` references that matched no configure preset.
    pub unmatched: Vec<String>,
}

/// Rename presets in a parsed descriptor.
///
/// Returns a description of the structural problem if the descriptor does
/// not have the expected shape; `data` may be partially rewritten then and
/// must not be written back.
pub fn rewrite_presets(data: &mut Value, preset_name: &str) -> Result<PresetRename, String> {
    let root = data
        .as_object_mut()
        .ok_or_else(|| "top level is not an object".to_string())?;

    let mut rename = PresetRename::default();
    let mut original_names = Vec::new();

    for preset in preset_records(root, "configurePresets")? {
        let old_name = preset
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| "configure preset without a string `name`".to_string())?
            .to_string();

        preset.insert("name".to_string(), Value::from(preset_name));
        preset.insert("displayName".to_string(), Value::from(preset_name));

        original_names.push(old_name);
        rename.configure += 1;
    }

    for key in DEPENDENT_PRESETS {
        for preset in preset_records(root, key)? {
            let Some(reference) = preset.get("configurePreset").and_then(Value::as_str) else {
                continue;
            };

            if original_names.iter().any(|name| name == reference) {
                preset.insert("name".to_string(), Value::from(preset_name));
                preset.insert("configurePreset".to_string(), Value::from(preset_name));
                rename.dependent += 1;
            } else {
                rename.unmatched.push(reference.to_string());
            }
        }
    }

    Ok(rename)
}

/// Mutable records of one preset array; a missing array yields none.
fn preset_records<'a>(
    root: &'a mut Map<String, Value>,
    key: &str,
) -> Result<Vec<&'a mut Map<String, Value>>, String> {
    let Some(value) = root.get_mut(key) else {
        return Ok(Vec::new());
    };

    let records = value
        .as_array_mut()
        .ok_or_else(|| format!("`{}` is not an array", key))?;

    records
        .iter_mut()
        .map(|record| {
            record
                .as_object_mut()
                .ok_or_else(|| format!("`{}` contains a non-object entry", key))
        })
        .collect()
}

/// Serialize with four-space indentation and a trailing newline.
pub fn to_pretty_json(data: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    data.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

/// Rename the presets in the file at `path` after `settings`.
///
/// A missing file is skipped. The file is only replaced once the complete
/// new contents exist, so an error leaves it as it was.
pub fn normalize_presets(path: &Path, settings: &Settings) -> Result<FileOutcome, GenerateError> {
    if !path.exists() {
        tracing::debug!("no preset file at {}, skipping", path.display());
        return Ok(FileOutcome::Skipped);
    }

    let content = std::fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut data: Value =
        serde_json::from_str(&content).map_err(|source| GenerateError::MalformedJson {
            path: path.to_path_buf(),
            source,
        })?;

    let preset_name = settings.preset_name();
    let rename = rewrite_presets(&mut data, &preset_name).map_err(|reason| {
        GenerateError::MalformedDescriptor {
            path: path.to_path_buf(),
            reason,
        }
    })?;

    for reference in &rename.unmatched {
        tracing::debug!(
            "preset reference `{}` in {} matches no configure preset; left unchanged",
            reference,
            path.display()
        );
    }

    let bytes = to_pretty_json(&data).map_err(|source| GenerateError::MalformedJson {
        path: path.to_path_buf(),
        source,
    })?;

    write_atomic(path, &bytes).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "renamed {} configure and {} build/test presets to `{}`",
        rename.configure,
        rename.dependent,
        preset_name
    );

    Ok(FileOutcome::Patched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{release_gcc_13, PRESETS_JSON};
    use serde_json::json;
    use tempfile::TempDir;

    const NAME: &str = "release-linux-x86_64-gcc-13";

    #[test]
    fn test_rewrite_scenario() {
        let mut data = json!({
            "configurePresets": [{"name": "default", "displayName": "default"}],
            "buildPresets": [{"name": "default-build", "configurePreset": "default"}]
        });

        let rename = rewrite_presets(&mut data, NAME).unwrap();

        assert_eq!(rename.configure, 1);
        assert_eq!(rename.dependent, 1);
        assert_eq!(data["configurePresets"][0]["name"], NAME);
        assert_eq!(data["configurePresets"][0]["displayName"], NAME);
        assert_eq!(data["buildPresets"][0]["name"], NAME);
        assert_eq!(data["buildPresets"][0]["configurePreset"], NAME);
    }

    #[test]
    fn test_unmatched_reference_left_alone() {
        let mut data = json!({
            "configurePresets": [{"name": "default", "displayName": "Default"}],
            "testPresets": [{"name": "typo-test", "configurePreset": "defualt"}]
        });

        let rename = rewrite_presets(&mut data, NAME).unwrap();

        assert_eq!(rename.unmatched, vec!["defualt".to_string()]);
        assert_eq!(data["testPresets"][0]["name"], "typo-test");
        assert_eq!(data["testPresets"][0]["configurePreset"], "defualt");
    }

    #[test]
    fn test_other_fields_preserved_in_order() {
        let mut data: Value = serde_json::from_str(PRESETS_JSON).unwrap();
        let before = data.clone();

        rewrite_presets(&mut data, NAME).unwrap();

        let old = before["configurePresets"][0].as_object().unwrap();
        let new = data["configurePresets"][0].as_object().unwrap();
        let old_keys: Vec<_> = old.keys().collect();
        let new_keys: Vec<_> = new.keys().collect();
        assert_eq!(old_keys, new_keys);

        for (key, value) in old {
            if key != "name" && key != "displayName" {
                assert_eq!(&new[key], value, "field `{}` changed", key);
            }
        }
        assert_eq!(data["version"], before["version"]);
        assert_eq!(data["cmakeMinimumRequired"], before["cmakeMinimumRequired"]);
    }

    #[test]
    fn test_missing_display_name_is_added() {
        let mut data = json!({"configurePresets": [{"name": "ci"}]});
        rewrite_presets(&mut data, NAME).unwrap();
        assert_eq!(data["configurePresets"][0]["displayName"], NAME);
    }

    #[test]
    fn test_malformed_shapes() {
        assert!(rewrite_presets(&mut json!([]), NAME).is_err());
        assert!(rewrite_presets(&mut json!({"configurePresets": {}}), NAME).is_err());
        assert!(rewrite_presets(&mut json!({"configurePresets": [{"displayName": "x"}]}), NAME).is_err());
        assert!(rewrite_presets(&mut json!({"buildPresets": [1]}), NAME).is_err());
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let outcome = normalize_presets(&tmp.path().join(PRESETS_FILE), &release_gcc_13()).unwrap();
        assert_eq!(outcome, FileOutcome::Skipped);
        assert!(!tmp.path().join(PRESETS_FILE).exists());
    }

    #[test]
    fn test_normalize_file_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PRESETS_FILE);
        std::fs::write(&path, PRESETS_JSON).unwrap();

        let outcome = normalize_presets(&path, &release_gcc_13()).unwrap();
        assert_eq!(outcome, FileOutcome::Patched);
        let once = std::fs::read(&path).unwrap();

        normalize_presets(&path, &release_gcc_13()).unwrap();
        let twice = std::fs::read(&path).unwrap();

        assert_eq!(once, twice);
        let text = String::from_utf8(once).unwrap();
        assert!(text.contains("\n    \"version\": 3"));
        assert!(text.contains(NAME));
    }

    #[test]
    fn test_malformed_file_left_intact() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PRESETS_FILE);
        std::fs::write(&path, "{ \"configurePresets\": [").unwrap();

        let err = normalize_presets(&path, &release_gcc_13()).unwrap_err();
        assert!(matches!(err, GenerateError::MalformedJson { .. }));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{ \"configurePresets\": ["
        );
    }
}
