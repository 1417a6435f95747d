//! Implementation of `stevedore aliases`.
//!
//! Runs one full resolution pass against a registry description and
//! returns the alias report. The registry is fresh per invocation; the
//! caller decides what to do with the report.

use std::path::PathBuf;

use anyhow::Result;
use semver::VersionReq;

use crate::registry::{TargetRegistry, TomlProvider};
use crate::resolve::{self, AliasReport, PackageRequest};

/// Options for an alias-resolution run.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Path to the installed-registry description
    pub registry_path: PathBuf,

    /// Versioned package name to locate
    pub package: String,

    /// Version requirement the installed package must satisfy
    pub requirement: VersionReq,

    /// Requested components
    pub components: Vec<String>,

    /// Alias namespace root to publish under
    pub prefix: String,
}

/// Locate the package and publish its alias set.
pub fn resolve_aliases(opts: &ResolveOptions) -> Result<AliasReport> {
    let provider = TomlProvider::load(&opts.registry_path)?;
    let mut registry = TargetRegistry::new();

    let request = PackageRequest {
        package: opts.package.clone(),
        requirement: opts.requirement.clone(),
        components: opts.components.clone(),
    };

    let report = resolve::resolve(&provider, &mut registry, &request, &opts.prefix)?;
    Ok(report)
}
