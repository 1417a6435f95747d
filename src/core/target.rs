//! Link-target names - structured `namespace::name` pairs.
//!
//! Build systems address exported libraries through namespaced target
//! names like `gz-math7::gz-math7-eigen3`. Parsing them into their two
//! segments up front (instead of blind substring stripping later) is
//! what lets the alias publisher reject foreign targets loudly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a target name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("target name `{0}` is missing the `::` namespace delimiter")]
    MissingDelimiter(String),

    #[error("target name `{0}` has more than one `::` delimiter")]
    ExtraDelimiter(String),

    #[error("target name `{0}` has an empty segment")]
    EmptySegment(String),
}

/// A namespaced link-target name: `<namespace>::<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetName {
    namespace: String,
    name: String,
}

impl TargetName {
    /// Create a target name from its two segments.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TargetName {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Get the namespace segment.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the name segment.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for TargetName {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split("::").collect();
        match segments.as_slice() {
            [namespace, name] => {
                if namespace.is_empty() || name.is_empty() {
                    return Err(TargetParseError::EmptySegment(s.to_string()));
                }
                Ok(TargetName::new(*namespace, *name))
            }
            [_] => Err(TargetParseError::MissingDelimiter(s.to_string())),
            _ => Err(TargetParseError::ExtraDelimiter(s.to_string())),
        }
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.name)
    }
}

impl Serialize for TargetName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TargetName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
