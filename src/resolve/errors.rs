//! Resolution error types.

use miette::Diagnostic as MietteDiagnostic;
use semver::{Version, VersionReq};
use thiserror::Error;

use crate::core::target::TargetName;
use crate::registry::AliasConflict;
use crate::util::diagnostic::Diagnostic;

/// Error during package location or alias publishing.
///
/// Every variant is fatal for the resolution pass; there is no partial
/// or degraded success mode.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("package `{package}` not found")]
    #[diagnostic(
        code(stevedore::resolve::not_found),
        help("check that the package is installed and listed in the registry description")
    )]
    PackageNotFound { package: String },

    #[error("package `{package}` is version {found}, which does not satisfy `{requirement}`")]
    #[diagnostic(code(stevedore::resolve::version_mismatch))]
    VersionMismatch {
        package: String,
        requirement: VersionReq,
        found: Version,
    },

    #[error("package `{package}` does not provide component `{component}`")]
    #[diagnostic(code(stevedore::resolve::missing_component))]
    MissingComponent {
        package: String,
        component: String,
        available: Vec<String>,
    },

    #[error("target `{target}` does not belong to package `{package}`")]
    #[diagnostic(
        code(stevedore::resolve::foreign_target),
        help("component link-targets must be named `<package>::<package>-<component>`")
    )]
    ForeignComponentTarget {
        package: String,
        target: TargetName,
    },

    #[error("{0}")]
    #[diagnostic(code(stevedore::resolve::alias_conflict))]
    AliasConflict(#[from] AliasConflict),
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::PackageNotFound { package } => {
                Diagnostic::error(format!("package `{}` not found", package)).with_suggestion(
                    "Check that the package is installed and listed in the registry description",
                )
            }

            ResolveError::VersionMismatch {
                package,
                requirement,
                found,
            } => Diagnostic::error(format!("no matching version for `{}`", package))
                .with_context(format!("requested: {}", requirement))
                .with_context(format!("installed: {}", found))
                .with_suggestion(format!(
                    "Relax the version requirement or install a matching `{}`",
                    package
                )),

            ResolveError::MissingComponent {
                package,
                component,
                available,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "package `{}` does not provide component `{}`",
                    package, component
                ));
                if !available.is_empty() {
                    diag = diag
                        .with_context(format!("available components: {}", available.join(", ")));
                }
                diag
            }

            ResolveError::ForeignComponentTarget { package, target } => {
                Diagnostic::error(format!(
                    "target `{}` does not belong to package `{}`",
                    target, package
                ))
                .with_context("component link-targets must be named `<package>::<package>-<component>`")
            }

            ResolveError::AliasConflict(conflict) => Diagnostic::error(format!(
                "alias `{}` is already defined",
                conflict.alias
            ))
            .with_context(format!("existing target: {}", conflict.existing))
            .with_context(format!("requested target: {}", conflict.requested)),
        }
    }
}
