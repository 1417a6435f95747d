//! Suite configuration.
//!
//! Which packages belong to the suite, which external packages get
//! vendored anyway, and the per-package quirks of the generated vendor
//! packages all live here. The built-in defaults describe the Gazebo
//! suite; a project-local `stevedore.toml` overrides them wholesale.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::package_name::{NameError, PackageName, UnversionedName};

/// Name of the project-local configuration file.
pub const CONFIG_FILE: &str = "stevedore.toml";

/// Configuration for one library suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Name prefix shared by suite libraries (used to derive designators)
    pub suite_prefix: String,

    /// Unversioned names of the libraries that make up the suite
    pub suite_libraries: Vec<String>,

    /// Suite member names that do not carry the suite prefix
    pub designator_passthrough: Vec<String>,

    /// External packages vendored under a fixed vendor package name,
    /// keyed by the exact dependency name
    pub extra_vendored: BTreeMap<String, String>,

    /// Dependencies removed from upstream descriptions entirely
    pub disallowed_dependencies: Vec<String>,

    /// Packages whose CMake package name differs from the unversioned name
    pub cmake_name_overrides: BTreeMap<String, String>,

    /// Packages whose upstream repository name differs from the unversioned name
    pub github_name_overrides: BTreeMap<String, String>,

    /// Base URL the vendor build scripts fetch sources from
    pub vcs_base_url: String,

    /// Per-package feature quirks
    pub features: FeatureRules,
}

/// Per-package feature rules, each a list of unversioned names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureRules {
    /// Packages that ship no extras cmake hook
    pub no_extra_cmake: Vec<String>,

    /// Packages that ship no dsv environment hook
    pub no_dsv: Vec<String>,

    /// Packages that carry local patches
    pub patched: Vec<String>,

    /// Packages with SWIG bindings to skip
    pub swig: Vec<String>,

    /// Packages with pybind11 bindings to skip
    pub pybind11: Vec<String>,

    /// Packages without a docs build to turn off
    pub no_docs: Vec<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        SuiteConfig {
            suite_prefix: "gz-".to_string(),
            suite_libraries: [
                "gz-cmake",
                "gz-common",
                "gz-fuel_tools",
                "gz-fuel-tools",
                "gz-gui",
                "gz-launch",
                "gz-math",
                "gz-msgs",
                "gz-physics",
                "gz-plugin",
                "gz-rendering",
                "gz-sensors",
                "gz-sim",
                "gz-tools",
                "gz-transport",
                "gz-utils",
                "sdformat",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            designator_passthrough: vec!["sdformat".to_string()],
            extra_vendored: BTreeMap::from([
                ("dartsim".to_string(), "gz_dartsim_vendor".to_string()),
                ("DART".to_string(), "gz_dartsim_vendor".to_string()),
                (
                    "libogre-next-2.3-dev".to_string(),
                    "gz_ogre_next_vendor".to_string(),
                ),
                (
                    "libogre-next-2.3".to_string(),
                    "gz_ogre_next_vendor".to_string(),
                ),
            ]),
            // python3-distutils is not needed for CMake > 3.12 and no
            // longer installable on current distributions.
            disallowed_dependencies: vec!["python3-distutils".to_string()],
            cmake_name_overrides: BTreeMap::from([(
                "gz-fuel-tools".to_string(),
                "gz-fuel_tools".to_string(),
            )]),
            github_name_overrides: BTreeMap::from([(
                "gz-fuel_tools".to_string(),
                "gz-fuel-tools".to_string(),
            )]),
            vcs_base_url: "https://github.com/gazebosim".to_string(),
            features: FeatureRules {
                no_extra_cmake: vec!["gz-tools".to_string(), "gz-cmake".to_string()],
                no_dsv: vec!["gz-tools".to_string(), "gz-cmake".to_string()],
                patched: vec!["gz-cmake".to_string(), "gz-rendering".to_string()],
                swig: vec!["gz-math".to_string()],
                pybind11: vec![
                    "gz-math".to_string(),
                    "sdformat".to_string(),
                    "gz-transport".to_string(),
                    "gz-sim".to_string(),
                ],
                no_docs: vec!["sdformat".to_string()],
            },
        }
    }
}

impl SuiteConfig {
    /// Load configuration for a project directory.
    ///
    /// Reads `stevedore.toml` from the directory if present, otherwise
    /// falls back to the built-in suite defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("no {} found, using built-in suite defaults", CONFIG_FILE);
            return Ok(SuiteConfig::default());
        }

        let contents = crate::util::fs::read_to_string(&path)?;
        let config: SuiteConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        tracing::debug!("loaded suite config from {}", path.display());
        Ok(config)
    }

    /// Whether a dependency belongs to the suite (or is force-vendored).
    pub fn is_suite_dependency(&self, dep: &PackageName) -> bool {
        if self.extra_vendored.contains_key(dep.as_str()) {
            return true;
        }
        match dep.unversioned() {
            Ok(unversioned) => self
                .suite_libraries
                .iter()
                .any(|lib| lib == unversioned.as_str()),
            Err(_) => false,
        }
    }

    /// The short library designator used as the alias namespace root.
    ///
    /// `gz-math` -> `math`; passthrough names map to themselves.
    pub fn designator(&self, name: &UnversionedName) -> Result<String, NameError> {
        if let Some(rest) = name.as_str().strip_prefix(&self.suite_prefix) {
            if !rest.is_empty() {
                return Ok(rest.to_string());
            }
        }
        if self.designator_passthrough.iter().any(|n| n == name.as_str()) {
            return Ok(name.as_str().to_string());
        }
        Err(NameError::Designator(name.as_str().to_string()))
    }

    /// The CMake package name for an unversioned suite name.
    pub fn cmake_name(&self, name: &UnversionedName) -> String {
        self.cmake_name_overrides
            .get(name.as_str())
            .cloned()
            .unwrap_or_else(|| name.as_str().to_string())
    }

    /// The upstream repository name for an unversioned suite name.
    pub fn github_name(&self, name: &UnversionedName) -> String {
        self.github_name_overrides
            .get(name.as_str())
            .cloned()
            .unwrap_or_else(|| name.as_str().to_string())
    }

    /// Whether the vendor package ships an extras cmake hook.
    pub fn has_extra_cmake(&self, name: &UnversionedName) -> bool {
        !self.features.no_extra_cmake.iter().any(|n| n == name.as_str())
    }

    /// Whether the vendor package ships a dsv environment hook.
    pub fn has_dsv(&self, name: &UnversionedName) -> bool {
        !self.features.no_dsv.iter().any(|n| n == name.as_str())
    }

    /// Whether the vendor package carries local patches.
    pub fn has_patches(&self, name: &UnversionedName) -> bool {
        self.features.patched.iter().any(|n| n == name.as_str())
    }

    /// Whether the upstream build has SWIG bindings to skip.
    pub fn has_swig(&self, name: &UnversionedName) -> bool {
        self.features.swig.iter().any(|n| n == name.as_str())
    }

    /// Whether the upstream build has pybind11 bindings to skip.
    pub fn has_pybind11(&self, name: &UnversionedName) -> bool {
        self.features.pybind11.iter().any(|n| n == name.as_str())
    }

    /// Whether the upstream build produces docs to turn off.
    pub fn has_docs(&self, name: &UnversionedName) -> bool {
        !self.features.no_docs.iter().any(|n| n == name.as_str())
    }
}
