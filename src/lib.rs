//! Stevedore - a vendor-package toolkit for versioned C/C++ library suites
//!
//! This crate provides the core library functionality for Stevedore:
//! locating installed versioned packages, publishing their stable alias
//! namespaces, and generating the vendor packages that carry the
//! discovery scripts.

pub mod core;
pub mod ops;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod util;

pub use self::core::{
    manifest::UpstreamManifest, package_name::PackageName, package_name::UnversionedName,
    package_name::VersionedName, target::TargetName, version::SuiteVersion,
};

pub use registry::{InstalledPackage, PackageProvider, TargetRegistry};
pub use resolve::{AliasReport, PackageRequest, ResolveError};
pub use util::config::SuiteConfig;
