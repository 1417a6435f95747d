//! Upstream package descriptions.
//!
//! The generator's input is a small TOML file describing the upstream
//! suite package: identity, metadata, and its dependency groups. This
//! mirrors the dependency-group structure of the packaging manifests
//! the vendor packages ultimately ship with.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::package_name::PackageName;
use crate::core::version::SuiteVersion;

/// The parsed upstream package description.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamManifest {
    /// Package identity and metadata
    pub package: UpstreamPackage,

    /// Dependency groups
    #[serde(default)]
    pub dependencies: DependencyGroups,
}

/// Package metadata from the `[package]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamPackage {
    /// Upstream package name, usually version-suffixed (e.g. `gz-math7`)
    pub name: PackageName,

    /// Upstream release version
    pub version: SuiteVersion,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Maintainer contacts
    #[serde(default)]
    pub maintainers: Vec<String>,

    /// License identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Upstream homepage
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Dependency groups, one list per phase the packaging format knows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyGroups {
    pub build: Vec<PackageName>,
    pub buildtool: Vec<PackageName>,
    pub exec: Vec<PackageName>,
    pub test: Vec<PackageName>,
    pub doc: Vec<PackageName>,
}

impl DependencyGroups {
    /// All groups, in manifest order.
    pub fn groups(&self) -> [&Vec<PackageName>; 5] {
        [
            &self.build,
            &self.buildtool,
            &self.exec,
            &self.test,
            &self.doc,
        ]
    }

    /// All groups, mutably.
    pub fn groups_mut(&mut self) -> [&mut Vec<PackageName>; 5] {
        [
            &mut self.build,
            &mut self.buildtool,
            &mut self.exec,
            &mut self.test,
            &mut self.doc,
        ]
    }

    /// Drop every dependency whose name is on the disallow list.
    pub fn retain_allowed(&mut self, disallowed: &[String]) {
        for group in self.groups_mut() {
            group.retain(|dep| !disallowed.iter().any(|d| d == dep.as_str()));
        }
    }
}

impl UpstreamManifest {
    /// Load an upstream description from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = crate::util::fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse an upstream description from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let manifest: UpstreamManifest = toml::from_str(contents)?;
        Ok(manifest)
    }
}
