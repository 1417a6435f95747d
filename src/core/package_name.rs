//! Package naming - versioned names, unversioned names, vendor names.
//!
//! Library suites append the major version to every package name
//! (`gz-math` becomes `gz-math7`), so most name handling starts by
//! splitting the version suffix back off.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::target::TargetName;

/// Leading unversioned portion of a suite package name.
static UNVERSIONED: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[-_a-z]+").unwrap());

/// Error deriving one name form from another.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("could not derive an unversioned name from `{0}`")]
    Unversioned(String),

    #[error("could not derive a library designator from `{0}`")]
    Designator(String),
}

/// A package name as it appears in a dependency list.
///
/// May or may not carry a trailing major-version suffix
/// (`gz-math7` and `libeigen3-dev` are both valid entries).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Create a new package name.
    pub fn new(name: impl Into<String>) -> Self {
        PackageName(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strip the trailing major-version digits, if any.
    ///
    /// Fails when the name has no leading lowercase portion at all
    /// (e.g. a name starting with a digit or an uppercase letter).
    pub fn unversioned(&self) -> Result<UnversionedName, NameError> {
        let m = UNVERSIONED
            .find(&self.0)
            .ok_or_else(|| NameError::Unversioned(self.0.clone()))?;
        Ok(UnversionedName(m.as_str().to_string()))
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        PackageName::new(s)
    }
}

/// A suite package name with the version suffix removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnversionedName(String);

impl UnversionedName {
    /// Create an unversioned name directly.
    pub fn new(name: impl Into<String>) -> Self {
        UnversionedName(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the vendor package name: dashes become underscores and
    /// a `_vendor` suffix is appended (`gz-math` -> `gz_math_vendor`).
    pub fn vendor_name(&self) -> String {
        format!("{}_vendor", self.0.replace('-', "_"))
    }
}

impl fmt::Display for UnversionedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UnversionedName {
    fn from(s: &str) -> Self {
        UnversionedName::new(s)
    }
}

/// The identity a versioned package is looked up under: base name with
/// the major version appended (`gz-math` + 7 -> `gz-math7`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionedName(String);

impl VersionedName {
    /// Wrap an already-formed versioned name.
    pub fn new(name: impl Into<String>) -> Self {
        VersionedName(name.into())
    }

    /// Form a versioned name from a base name and a major version.
    pub fn from_base(base: &str, major: u64) -> Self {
        VersionedName(format!("{}{}", base, major))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The core library target exported by this package:
    /// `<name>::<name>`.
    pub fn core_target(&self) -> TargetName {
        TargetName::new(&self.0, &self.0)
    }

    /// Derive the short component name from a component link-target.
    ///
    /// Only targets named exactly `<name>::<name>-<suffix>` qualify;
    /// anything else (including the core target itself) returns `None`.
    pub fn component_suffix<'t>(&self, target: &'t TargetName) -> Option<&'t str> {
        if target.namespace() != self.0 {
            return None;
        }
        let prefix = format!("{}-", self.0);
        target
            .name()
            .strip_prefix(prefix.as_str())
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for VersionedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unversioned_strips_major_suffix() {
        let name = PackageName::new("gz-math7");
        assert_eq!(name.unversioned().unwrap().as_str(), "gz-math");

        let name = PackageName::new("sdformat14");
        assert_eq!(name.unversioned().unwrap().as_str(), "sdformat");
    }

    #[test]
    fn test_unversioned_passes_through_plain_names() {
        let name = PackageName::new("gz-cmake");
        assert_eq!(name.unversioned().unwrap().as_str(), "gz-cmake");
    }

    #[test]
    fn test_unversioned_rejects_unparseable_names() {
        let name = PackageName::new("3dparty");
        assert_eq!(
            name.unversioned(),
            Err(NameError::Unversioned("3dparty".to_string()))
        );
    }

    #[test]
    fn test_vendor_name() {
        let name = UnversionedName::new("gz-fuel_tools");
        assert_eq!(name.vendor_name(), "gz_fuel_tools_vendor");

        let name = UnversionedName::new("sdformat");
        assert_eq!(name.vendor_name(), "sdformat_vendor");
    }

    #[test]
    fn test_versioned_name_from_base() {
        let name = VersionedName::from_base("gz-cmake", 3);
        assert_eq!(name.as_str(), "gz-cmake3");
        assert_eq!(name.core_target().to_string(), "gz-cmake3::gz-cmake3");
    }

    #[test]
    fn test_component_suffix() {
        let pkg = VersionedName::new("foo3");
        let target = "foo3::foo3-bar".parse().unwrap();
        assert_eq!(pkg.component_suffix(&target), Some("bar"));
    }

    #[test]
    fn test_component_suffix_rejects_core_and_foreign_targets() {
        let pkg = VersionedName::new("foo3");

        let core = "foo3::foo3".parse().unwrap();
        assert_eq!(pkg.component_suffix(&core), None);

        let foreign = "other::other-bar".parse().unwrap();
        assert_eq!(pkg.component_suffix(&foreign), None);

        let wrong_name = "foo3::unrelated".parse().unwrap();
        assert_eq!(pkg.component_suffix(&wrong_name), None);

        let empty_suffix = "foo3::foo3-".parse::<TargetName>().unwrap();
        assert_eq!(pkg.component_suffix(&empty_suffix), None);
    }
}
