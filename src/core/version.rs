//! Suite version handling.
//!
//! Upstream suite releases are always plain MAJOR.MINOR.PATCH integer
//! triples; pre-release tags and build metadata are not allowed, since
//! the major number becomes part of package and target names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a suite version.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid version `{0}`: expected MAJOR.MINOR.PATCH with integer segments")]
pub struct VersionParseError(String);

/// A strict MAJOR.MINOR.PATCH version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuiteVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SuiteVersion {
    /// Create a version from its three segments.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SuiteVersion {
            major,
            minor,
            patch,
        }
    }

    /// Convert to a full semver version (no pre-release, no metadata).
    pub fn to_semver(self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

fn parse_segment(s: &str, original: &str) -> Result<u64, VersionParseError> {
    // u64::from_str accepts a leading `+`, which we do not.
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(VersionParseError(original.to_string()));
    }
    s.parse()
        .map_err(|_| VersionParseError(original.to_string()))
}

impl FromStr for SuiteVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = segments.as_slice() else {
            return Err(VersionParseError(s.to_string()));
        };

        Ok(SuiteVersion {
            major: parse_segment(major, s)?,
            minor: parse_segment(minor, s)?,
            patch: parse_segment(patch, s)?,
        })
    }
}

impl fmt::Display for SuiteVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for SuiteVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SuiteVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
