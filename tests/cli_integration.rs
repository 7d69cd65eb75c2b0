//! CLI integration tests for genhook.
//!
//! These tests run the binary against temporary project layouts shaped like
//! the output of the package manager's CMake generators.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const SETTINGS: &[&str] = &[
    "--build-type",
    "Release",
    "--os",
    "Linux",
    "--arch",
    "x86_64",
    "--compiler",
    "gcc",
    "--compiler-version",
    "13",
];

const PRESETS: &str = r#"{
    "version": 3,
    "configurePresets": [
        {
            "name": "default",
            "displayName": "default",
            "generator": "Ninja",
            "cacheVariables": {
                "CMAKE_BUILD_TYPE": "Release"
            }
        }
    ],
    "buildPresets": [
        {
            "name": "default-build",
            "configurePreset": "default"
        },
        {
            "name": "orphan",
            "configurePreset": "missing"
        }
    ]
}
"#;

/// Get the genhook binary command, isolated from the user's config.
fn genhook(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("genhook").unwrap();
    cmd.env("GENHOOK_HOME", home);
    cmd.env_remove("GENHOOK_BUILD_TYPE");
    cmd
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

// ============================================================================
// genhook generate
// ============================================================================

#[test]
fn test_generate_renames_presets_and_patches_data() {
    let tmp = temp_dir();
    let root = tmp.path();
    let generators = root.join("build").join("generators");
    fs::create_dir_all(&generators).unwrap();
    fs::write(root.join("CMakePresets.json"), PRESETS).unwrap();
    fs::write(
        generators.join("openssl-release-x86_64-data.cmake"),
        "set(openssl_SYSTEM_LIBS_RELEASE stdc++ pthread dl)\nset(openssl_OTHERLIBS stdc++ m)\n",
    )
    .unwrap();

    genhook(root)
        .arg("generate")
        .args(SETTINGS)
        .args(["--generators-folder", "build/generators"])
        .current_dir(root)
        .assert()
        .success()
        .stderr(predicate::str::contains("Successfully patched 1 CMake files"))
        .stderr(predicate::str::contains("release-linux-x86_64-gcc-13"));

    let presets: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("CMakePresets.json")).unwrap())
            .unwrap();
    assert_eq!(presets["configurePresets"][0]["name"], "release-linux-x86_64-gcc-13");
    assert_eq!(presets["configurePresets"][0]["displayName"], "release-linux-x86_64-gcc-13");
    assert_eq!(presets["configurePresets"][0]["generator"], "Ninja");
    assert_eq!(presets["buildPresets"][0]["name"], "release-linux-x86_64-gcc-13");
    assert_eq!(presets["buildPresets"][0]["configurePreset"], "release-linux-x86_64-gcc-13");
    assert_eq!(presets["buildPresets"][1]["name"], "orphan");
    assert_eq!(presets["buildPresets"][1]["configurePreset"], "missing");

    let data = fs::read_to_string(generators.join("openssl-release-x86_64-data.cmake")).unwrap();
    assert_eq!(
        data,
        "set(openssl_SYSTEM_LIBS_RELEASE pthread dl)\nset(openssl_OTHERLIBS stdc++ m)\n"
    );

    let toolchain = fs::read_to_string(generators.join("genhook_toolchain.cmake")).unwrap();
    assert!(toolchain.contains("set(CMAKE_BUILD_TYPE \"Release\""));
}

#[test]
fn test_generate_is_idempotent() {
    let tmp = temp_dir();
    let root = tmp.path();
    fs::write(root.join("CMakePresets.json"), PRESETS).unwrap();

    for _ in 0..2 {
        genhook(root)
            .arg("generate")
            .args(SETTINGS)
            .current_dir(root)
            .assert()
            .success();
    }
    let twice = fs::read_to_string(root.join("CMakePresets.json")).unwrap();

    fs::write(root.join("CMakePresets.json"), PRESETS).unwrap();
    genhook(root)
        .arg("generate")
        .args(SETTINGS)
        .current_dir(root)
        .assert()
        .success();
    let once = fs::read_to_string(root.join("CMakePresets.json")).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_generate_survives_malformed_presets() {
    let tmp = temp_dir();
    let root = tmp.path();
    fs::write(root.join("CMakePresets.json"), "{ broken").unwrap();

    genhook(root)
        .arg("generate")
        .args(SETTINGS)
        .current_dir(root)
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to update CMake presets"));

    assert_eq!(
        fs::read_to_string(root.join("CMakePresets.json")).unwrap(),
        "{ broken"
    );
}

#[test]
fn test_generate_uses_project_config() {
    let tmp = temp_dir();
    let root = tmp.path();
    fs::create_dir_all(root.join(".genhook")).unwrap();
    fs::write(
        root.join(".genhook").join("config.toml"),
        r#"
[settings]
build_type = "Debug"
os = "Windows"
arch = "x86_64"
compiler = "msvc"
compiler_version = "194"

[generate]
generators_folder = "gen"
"#,
    )
    .unwrap();

    genhook(root)
        .arg("generate")
        .current_dir(root)
        .assert()
        .success()
        .stderr(predicate::str::contains("debug-windows-x86_64-msvc-194"));

    let toolchain = fs::read_to_string(root.join("gen").join("genhook_toolchain.cmake")).unwrap();
    assert!(toolchain.contains("\"Debug\""));
    assert!(!toolchain.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
}

// ============================================================================
// genhook presets / patch
// ============================================================================

#[test]
fn test_presets_missing_file_is_not_an_error() {
    let tmp = temp_dir();

    genhook(tmp.path())
        .arg("presets")
        .args(SETTINGS)
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join("CMakePresets.json").exists());
}

#[test]
fn test_patch_reports_count() {
    let tmp = temp_dir();
    let root = tmp.path();
    fs::write(root.join("zlib-data.cmake"), "set(zlib_SYSTEM_LIBS stdc++ m)\n").unwrap();
    fs::write(root.join("fmt-data.cmake"), "set(fmt_SYSTEM_LIBS m)\n").unwrap();

    genhook(root)
        .arg("patch")
        .current_dir(root)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 of 2 data file(s) patched"));

    assert_eq!(
        fs::read_to_string(root.join("zlib-data.cmake")).unwrap(),
        "set(zlib_SYSTEM_LIBS m)\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("fmt-data.cmake")).unwrap(),
        "set(fmt_SYSTEM_LIBS m)\n"
    );
}

#[test]
fn test_patch_custom_token() {
    let tmp = temp_dir();
    let root = tmp.path();
    fs::write(root.join("zlib-data.cmake"), "set(zlib_SYSTEM_LIBS c++ m)\n").unwrap();

    genhook(root)
        .args(["patch", "--token", "c++"])
        .current_dir(root)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.join("zlib-data.cmake")).unwrap(),
        "set(zlib_SYSTEM_LIBS m)\n"
    );
}

// ============================================================================
// genhook init / requirements / settings
// ============================================================================

#[test]
fn test_init_then_requirements() {
    let tmp = temp_dir();

    genhook(tmp.path())
        .arg("init")
        .current_dir(tmp.path())
        .assert()
        .success();
    assert!(tmp.path().join("Recipe.toml").exists());

    genhook(tmp.path())
        .arg("init")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    genhook(tmp.path())
        .arg("requirements")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ibot/1.0"))
        .stdout(predicate::str::contains("zlib/[~1.3]"))
        .stdout(predicate::str::contains("tilde"))
        .stdout(predicate::str::contains("shared=False"));
}

#[test]
fn test_settings_shows_preset_name() {
    let tmp = temp_dir();

    genhook(tmp.path())
        .arg("settings")
        .args(SETTINGS)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Preset name: release-linux-x86_64-gcc-13"));
}

#[test]
fn test_invalid_recipe_fails() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("Recipe.toml"),
        "[package]\nname = \"bot\"\nversion = \"1.0\"\n\n[requirements]\nrequires = [\"zlib\"]\n",
    )
    .unwrap();

    genhook(tmp.path())
        .arg("requirements")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid `requires` entry"));
}

// ============================================================================
// genhook licenses
// ============================================================================

#[test]
fn test_licenses_copies_files() {
    let tmp = temp_dir();
    let root = tmp.path();
    fs::create_dir_all(root.join("deps").join("zlib")).unwrap();
    fs::write(root.join("deps").join("zlib").join("LICENSE"), "zlib").unwrap();

    genhook(root)
        .args(["licenses", "--deps", "deps"])
        .current_dir(root)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 license file(s) from 1 package(s)"));

    assert_eq!(
        fs::read_to_string(root.join("licenses").join("zlib").join("LICENSE")).unwrap(),
        "zlib"
    );
}
