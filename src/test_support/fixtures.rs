//! Test fixtures for common test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::Settings;

/// The configuration most tests run under.
pub fn release_gcc_13() -> Settings {
    Settings::new("Release", "Linux", "x86_64", "gcc", "13")
}

/// A `CMakePresets.json` as written by the toolchain generator.
pub const PRESETS_JSON: &str = r#"{
    "version": 3,
    "vendor": {
        "conan": {}
    },
    "cmakeMinimumRequired": {
        "major": 3,
        "minor": 15,
        "patch": 0
    },
    "configurePresets": [
        {
            "name": "conan-release",
            "displayName": "'conan-release' config",
            "description": "'conan-release' configure using 'Unix Makefiles' generator",
            "generator": "Unix Makefiles",
            "cacheVariables": {
                "CMAKE_POLICY_DEFAULT_CMP0091": "NEW",
                "CMAKE_BUILD_TYPE": "Release"
            },
            "toolchainFile": "generators/genhook_toolchain.cmake",
            "binaryDir": "/work/build/Release"
        }
    ],
    "buildPresets": [
        {
            "name": "conan-release",
            "configurePreset": "conan-release",
            "jobs": 16
        }
    ],
    "testPresets": [
        {
            "name": "conan-release",
            "configurePreset": "conan-release",
            "execution": {
                "jobs": 16
            }
        }
    ]
}
"#;

/// A generated `zlib-release-x86_64-data.cmake`.
pub const ZLIB_DATA_CMAKE: &str = r#"########### AGGREGATED COMPONENTS AND DEPENDENCIES FOR THE MULTI CONFIG #####################
#############################################################################################

set(zlib_COMPONENT_NAMES "")
if(DEFINED zlib_FIND_DEPENDENCY_NAMES)
  list(APPEND zlib_FIND_DEPENDENCY_NAMES )
  list(REMOVE_DUPLICATES zlib_FIND_DEPENDENCY_NAMES)
else()
  set(zlib_FIND_DEPENDENCY_NAMES )
endif()

########### VARIABLES #######################################################################
#############################################################################################
set(zlib_PACKAGE_FOLDER_RELEASE "/home/user/.conan2/p/zlib1a2b3c/p")
set(zlib_BUILD_MODULES_PATHS_RELEASE )

set(zlib_INCLUDE_DIRS_RELEASE "${zlib_PACKAGE_FOLDER_RELEASE}/include")
set(zlib_LIBS_RELEASE z)
set(zlib_SYSTEM_LIBS_RELEASE stdc++ m pthread)
set(zlib_LINKER_FLAGS_RELEASE stdc++)
# set(zlib_SYSTEM_LIBS_DEBUG stdc++)
set(zlib_COMPONENTS_RELEASE )

########## COMPONENTS #######################################################################
set(zlib_ZLIB_ZLIB_SYSTEM_LIBS_RELEASE m stdc++)
set(zlib_ZLIB_ZLIB_LIBS_RELEASE z)
"#;

/// Builder for a project directory with generated files.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    /// An empty project in a fresh temporary directory.
    pub fn new() -> Self {
        ProjectFixture {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Folder the generated CMake files live in.
    pub fn generators(&self) -> PathBuf {
        self.root().join("build").join("generators")
    }

    /// Add `CMakePresets.json` at the project root.
    pub fn with_presets(self, content: &str) -> Self {
        fs::write(self.root().join("CMakePresets.json"), content).unwrap();
        self
    }

    /// Add a generated data file in the generators folder.
    pub fn with_data_file(self, name: &str, content: &str) -> Self {
        let dir = self.generators();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
        self
    }

    /// Add a license file for a dependency under `deps/<package>/`.
    pub fn with_license(self, package: &str, rel_path: &str, content: &str) -> Self {
        let path = self.root().join("deps").join(package).join(rel_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn read(&self, rel_path: impl AsRef<Path>) -> String {
        fs::read_to_string(self.root().join(rel_path)).unwrap()
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
