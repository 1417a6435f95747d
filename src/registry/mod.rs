//! Installed-package providers and the alias target registry.
//!
//! A [`PackageProvider`] answers "what is installed here?" the way a
//! build tool's package search would, minus the filesystem crawling:
//! each installed package carries its version, its component list, and
//! the link-targets attached to its `requested` aggregate target.

pub mod targets;

use std::path::Path;

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;

use crate::core::package_name::VersionedName;
use crate::core::target::TargetName;

pub use targets::{Alias, AliasConflict, PublishOutcome, TargetRegistry};

/// One installed, discoverable package.
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    /// Versioned package name the package is found under
    pub name: VersionedName,

    /// Installed version
    pub version: Version,

    /// Component names the package provides
    pub components: Vec<String>,

    /// Link-targets carried by the `requested` aggregate target
    pub link_targets: Vec<TargetName>,
}

impl InstalledPackage {
    /// Describe an installed package with no components beyond the core.
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        let name = VersionedName::new(name);
        let core = name.core_target();
        InstalledPackage {
            name,
            version,
            components: Vec::new(),
            link_targets: vec![core],
        }
    }

    /// Add provided components, synthesizing their link-targets in the
    /// conventional `<pkg>::<pkg>-<component>` shape.
    pub fn with_components(mut self, components: &[&str]) -> Self {
        for component in components {
            self.components.push(component.to_string());
            self.link_targets.push(TargetName::new(
                self.name.as_str(),
                format!("{}-{}", self.name.as_str(), component),
            ));
        }
        self
    }

    /// Replace the `requested` aggregate content verbatim.
    pub fn with_link_targets(mut self, targets: Vec<TargetName>) -> Self {
        self.link_targets = targets;
        self
    }

    /// Whether the package provides a component by name.
    pub fn provides_component(&self, component: &str) -> bool {
        self.components.iter().any(|c| c == component)
    }
}

/// A source of installed packages.
pub trait PackageProvider {
    /// Look up an installed package by its exact versioned name.
    fn find(&self, name: &str) -> Option<&InstalledPackage>;
}

/// Raw registry file schema.
#[derive(Debug, Deserialize)]
struct RawRegistry {
    #[serde(default, rename = "package")]
    packages: Vec<RawPackage>,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    name: String,
    version: Version,
    #[serde(default)]
    components: Vec<String>,
    /// Overrides the synthesized `requested` content when present.
    #[serde(default)]
    link_targets: Option<Vec<TargetName>>,
}

/// A provider backed by a TOML description of what is installed.
#[derive(Debug, Default)]
pub struct TomlProvider {
    packages: Vec<InstalledPackage>,
}

impl TomlProvider {
    /// Load an installed-registry description from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = crate::util::fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse registry: {}", path.display()))
    }

    /// Parse an installed-registry description from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let raw: RawRegistry = toml::from_str(contents)?;

        let mut packages = Vec::new();
        for raw_pkg in raw.packages {
            let mut pkg = InstalledPackage::new(raw_pkg.name, raw_pkg.version);
            let components: Vec<&str> = raw_pkg.components.iter().map(|c| c.as_str()).collect();
            pkg = pkg.with_components(&components);
            if let Some(link_targets) = raw_pkg.link_targets {
                pkg = pkg.with_link_targets(link_targets);
            }
            packages.push(pkg);
        }

        Ok(TomlProvider { packages })
    }
}

impl PackageProvider for TomlProvider {
    fn find(&self, name: &str) -> Option<&InstalledPackage> {
        self.packages.iter().find(|p| p.name.as_str() == name)
    }
}
