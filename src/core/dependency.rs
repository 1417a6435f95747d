//! Dependency classification and vendorization.
//!
//! Suite dependencies are replaced by their vendor packages; everything
//! else passes through to the generated manifest untouched.

use crate::core::package_name::{NameError, PackageName};
use crate::util::config::SuiteConfig;

/// A dependency group split into suite members and external packages.
#[derive(Debug, Clone, Default)]
pub struct SeparatedDeps {
    /// Dependencies that belong to the suite (or are force-vendored)
    pub in_suite: Vec<PackageName>,

    /// Everything else, in original order
    pub external: Vec<PackageName>,
}

/// Split a dependency list into suite and external parts, preserving order.
pub fn separate_suite_deps(deps: &[PackageName], config: &SuiteConfig) -> SeparatedDeps {
    let mut separated = SeparatedDeps::default();
    for dep in deps {
        if config.is_suite_dependency(dep) {
            separated.in_suite.push(dep.clone());
        } else {
            separated.external.push(dep.clone());
        }
    }
    separated
}

/// Rewrite a suite dependency to its vendor package name.
///
/// Force-vendored externals map through the configured override table;
/// suite members derive `<unversioned-with-underscores>_vendor`.
pub fn vendor_dependency(dep: &PackageName, config: &SuiteConfig) -> Result<String, NameError> {
    if let Some(vendor) = config.extra_vendored.get(dep.as_str()) {
        return Ok(vendor.clone());
    }
    Ok(dep.unversioned()?.vendor_name())
}

/// Deduplicate while preserving first-seen order.
pub fn stable_unique(deps: Vec<PackageName>) -> Vec<PackageName> {
    let mut unique: Vec<PackageName> = Vec::new();
    for dep in deps {
        if !unique.contains(&dep) {
            unique.push(dep);
        }
    }
    unique
}
