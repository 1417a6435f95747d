//! Core domain types: names, versions, targets, manifests.

pub mod dependency;
pub mod manifest;
pub mod package_name;
pub mod target;
pub mod version;

pub use manifest::{DependencyGroups, UpstreamManifest, UpstreamPackage};
pub use package_name::{NameError, PackageName, UnversionedName, VersionedName};
pub use target::{TargetName, TargetParseError};
pub use version::SuiteVersion;
