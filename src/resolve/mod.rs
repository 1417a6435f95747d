//! Package location and alias publishing.
//!
//! A resolution pass has three steps, run once per consumer:
//! locate the versioned package, enumerate the link-targets its
//! `requested` aggregate carries, and publish the short aliases into
//! a caller-owned [`TargetRegistry`]. Any failure aborts the pass
//! before later aliases are published; a failed locate publishes
//! nothing at all.

pub mod errors;

use semver::VersionReq;
use serde::Serialize;

use crate::core::package_name::VersionedName;
use crate::core::target::TargetName;
use crate::registry::{Alias, InstalledPackage, PackageProvider, TargetRegistry};

pub use errors::ResolveError;

/// Name of the reserved core alias.
const CORE_ALIAS: &str = "core";

/// What a consumer asks for: an exact versioned package name, a version
/// requirement, and the components it needs.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    /// Versioned package name (e.g. `gz-math7`)
    pub package: String,

    /// Version requirement the installed package must satisfy
    pub requirement: VersionReq,

    /// Requested component names (may be empty)
    pub components: Vec<String>,
}

impl PackageRequest {
    /// Request a package at any version with no components.
    pub fn any(package: impl Into<String>) -> Self {
        PackageRequest {
            package: package.into(),
            requirement: VersionReq::STAR,
            components: Vec::new(),
        }
    }

    /// Set the version requirement.
    pub fn with_requirement(mut self, requirement: VersionReq) -> Self {
        self.requirement = requirement;
        self
    }

    /// Add requested components.
    pub fn with_components(mut self, components: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.components
            .extend(components.into_iter().map(|c| c.into()));
        self
    }
}

/// A successfully located package, bound for the rest of the pass.
#[derive(Debug, Clone)]
pub struct LocatedPackage {
    /// The versioned package identity
    pub name: VersionedName,

    /// The installed version that satisfied the request
    pub version: semver::Version,

    /// The `requested` aggregate's link-target list, in provider order
    link_targets: Vec<TargetName>,
}

impl LocatedPackage {
    /// Enumerate the component link-targets attached to the
    /// `requested` aggregate target, in the order the locator bound
    /// them. An empty list means zero components beyond the core.
    pub fn requested_targets(&self) -> &[TargetName] {
        &self.link_targets
    }
}

/// Report of one alias-publishing pass.
#[derive(Debug, Clone, Serialize)]
pub struct AliasReport {
    /// The package the aliases point into
    pub package: String,

    /// The installed version that was matched
    pub version: String,

    /// Every alias mapping, in publication order
    pub aliases: Vec<Alias>,
}

impl AliasReport {
    /// Number of aliases in the report (always `2 + C` on success).
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Locate an installed package satisfying a request.
///
/// Fails fast: a missing package, an unsatisfied version requirement,
/// or a missing requested component each abort the pass with nothing
/// bound.
pub fn locate(
    provider: &dyn PackageProvider,
    request: &PackageRequest,
) -> Result<LocatedPackage, ResolveError> {
    tracing::debug!(
        "locating `{}` ({}), components: [{}]",
        request.package,
        request.requirement,
        request.components.join(", ")
    );

    let installed: &InstalledPackage =
        provider
            .find(&request.package)
            .ok_or_else(|| ResolveError::PackageNotFound {
                package: request.package.clone(),
            })?;

    if !request.requirement.matches(&installed.version) {
        return Err(ResolveError::VersionMismatch {
            package: request.package.clone(),
            requirement: request.requirement.clone(),
            found: installed.version.clone(),
        });
    }

    for component in &request.components {
        if !installed.provides_component(component) {
            return Err(ResolveError::MissingComponent {
                package: request.package.clone(),
                component: component.clone(),
                available: installed.components.clone(),
            });
        }
    }

    tracing::debug!(
        "located `{}` at {} with {} link-target(s)",
        installed.name,
        installed.version,
        installed.link_targets.len()
    );

    Ok(LocatedPackage {
        name: installed.name.clone(),
        version: installed.version.clone(),
        link_targets: installed.link_targets.clone(),
    })
}

/// Publish the alias set for a located package under a prefix.
///
/// Publishes `<prefix>::<prefix>` and `<prefix>::core` for the core
/// library, then one `<prefix>::<component>` alias per component
/// link-target. The core target is skipped in the loop so it never
/// receives a third alias. Republishing an identical alias set is a
/// no-op; a name collision with a different target is an error.
pub fn publish_aliases(
    registry: &mut TargetRegistry,
    located: &LocatedPackage,
    prefix: &str,
) -> Result<AliasReport, ResolveError> {
    let core = located.name.core_target();
    let mut aliases = Vec::new();

    let mut publish = |registry: &mut TargetRegistry, name: TargetName, target: TargetName| {
        registry.publish(name.clone(), target.clone())?;
        aliases.push(Alias { name, target });
        Ok::<_, ResolveError>(())
    };

    publish(registry, TargetName::new(prefix, prefix), core.clone())?;
    publish(registry, TargetName::new(prefix, CORE_ALIAS), core.clone())?;

    for target in located.requested_targets() {
        if *target == core {
            continue;
        }

        let suffix = located.name.component_suffix(target).ok_or_else(|| {
            ResolveError::ForeignComponentTarget {
                package: located.name.as_str().to_string(),
                target: target.clone(),
            }
        })?;

        publish(registry, TargetName::new(prefix, suffix), target.clone())?;
    }

    tracing::info!(
        "published {} alias(es) for `{}` under `{}`",
        aliases.len(),
        located.name,
        prefix
    );

    Ok(AliasReport {
        package: located.name.as_str().to_string(),
        version: located.version.to_string(),
        aliases,
    })
}

/// Run a full resolution pass: locate, enumerate, publish.
pub fn resolve(
    provider: &dyn PackageProvider,
    registry: &mut TargetRegistry,
    request: &PackageRequest,
    prefix: &str,
) -> Result<AliasReport, ResolveError> {
    let located = locate(provider, request)?;
    publish_aliases(registry, &located, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    struct MemoryProvider {
        packages: Vec<InstalledPackage>,
    }

    impl PackageProvider for MemoryProvider {
        fn find(&self, name: &str) -> Option<&InstalledPackage> {
            self.packages.iter().find(|p| p.name.as_str() == name)
        }
    }

    fn provider_with_foo3() -> MemoryProvider {
        MemoryProvider {
            packages: vec![InstalledPackage::new("foo3", Version::new(3, 2, 1))
                .with_components(&["bar", "baz"])],
        }
    }

    fn target(s: &str) -> TargetName {
        s.parse().unwrap()
    }

    #[test]
    fn test_locate_success() {
        let provider = provider_with_foo3();
        let request = PackageRequest::any("foo3")
            .with_requirement(">=3".parse().unwrap())
            .with_components(["bar"]);

        let located = locate(&provider, &request).unwrap();
        assert_eq!(located.name.as_str(), "foo3");
        assert_eq!(located.requested_targets().len(), 3);
    }

    #[test]
    fn test_locate_not_found() {
        let provider = provider_with_foo3();
        let err = locate(&provider, &PackageRequest::any("foo4")).unwrap_err();
        assert!(matches!(err, ResolveError::PackageNotFound { .. }));
    }

    #[test]
    fn test_locate_version_mismatch() {
        let provider = provider_with_foo3();
        let request = PackageRequest::any("foo3").with_requirement(">=4".parse().unwrap());
        let err = locate(&provider, &request).unwrap_err();
        assert!(matches!(err, ResolveError::VersionMismatch { .. }));
    }

    #[test]
    fn test_locate_missing_component() {
        let provider = provider_with_foo3();
        let request = PackageRequest::any("foo3").with_components(["qux"]);

        let err = locate(&provider, &request).unwrap_err();
        match err {
            ResolveError::MissingComponent {
                component,
                available,
                ..
            } => {
                assert_eq!(component, "qux");
                assert_eq!(available, vec!["bar", "baz"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // The worked scenario: package foo3, components [bar, baz],
    // published under prefix F.
    #[test]
    fn test_publish_full_alias_set() {
        let provider = provider_with_foo3();
        let mut registry = TargetRegistry::new();

        let report = resolve(&provider, &mut registry, &PackageRequest::any("foo3"), "F").unwrap();

        assert_eq!(report.len(), 4); // self + core + 2 components
        assert_eq!(registry.resolve(&target("F::F")), Some(&target("foo3::foo3")));
        assert_eq!(
            registry.resolve(&target("F::core")),
            Some(&target("foo3::foo3"))
        );
        assert_eq!(
            registry.resolve(&target("F::bar")),
            Some(&target("foo3::foo3-bar"))
        );
        assert_eq!(
            registry.resolve(&target("F::baz")),
            Some(&target("foo3::foo3-baz"))
        );
    }

    #[test]
    fn test_publish_component_free_package() {
        let provider = MemoryProvider {
            packages: vec![InstalledPackage::new("gz-cmake3", Version::new(3, 5, 0))],
        };
        let mut registry = TargetRegistry::new();

        let report = resolve(
            &provider,
            &mut registry,
            &PackageRequest::any("gz-cmake3"),
            "gz-cmake",
        )
        .unwrap();

        // Just the self alias and the core alias.
        assert_eq!(report.len(), 2);
        assert_eq!(
            registry.resolve(&target("gz-cmake::core")),
            Some(&target("gz-cmake3::gz-cmake3"))
        );
    }

    #[test]
    fn test_core_target_never_gets_a_third_alias() {
        // The requested list repeats the core target; the loop must
        // skip it both times.
        let provider = MemoryProvider {
            packages: vec![InstalledPackage::new("foo3", Version::new(3, 0, 0))
                .with_link_targets(vec![
                    target("foo3::foo3"),
                    target("foo3::foo3-bar"),
                    target("foo3::foo3"),
                ])],
        };
        let mut registry = TargetRegistry::new();

        let report = resolve(&provider, &mut registry, &PackageRequest::any("foo3"), "F").unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_foreign_target_is_rejected() {
        let provider = MemoryProvider {
            packages: vec![InstalledPackage::new("foo3", Version::new(3, 0, 0))
                .with_link_targets(vec![
                    target("foo3::foo3"),
                    target("other::other-thing"),
                ])],
        };
        let mut registry = TargetRegistry::new();

        let err =
            resolve(&provider, &mut registry, &PackageRequest::any("foo3"), "F").unwrap_err();
        assert!(matches!(err, ResolveError::ForeignComponentTarget { .. }));
    }

    #[test]
    fn test_failed_locate_publishes_nothing() {
        let provider = provider_with_foo3();
        let mut registry = TargetRegistry::new();
        let request = PackageRequest::any("foo3").with_requirement(">=9".parse().unwrap());

        assert!(resolve(&provider, &mut registry, &request, "F").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_rerun_in_same_registry_is_idempotent() {
        let provider = provider_with_foo3();
        let mut registry = TargetRegistry::new();
        let request = PackageRequest::any("foo3");

        let first = resolve(&provider, &mut registry, &request, "F").unwrap();
        let second = resolve(&provider, &mut registry, &request, "F").unwrap();

        assert_eq!(first.aliases, second.aliases);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_prefix_collision_across_packages_is_an_error() {
        let provider = MemoryProvider {
            packages: vec![
                InstalledPackage::new("foo3", Version::new(3, 0, 0)),
                InstalledPackage::new("bar2", Version::new(2, 0, 0)),
            ],
        };
        let mut registry = TargetRegistry::new();

        resolve(&provider, &mut registry, &PackageRequest::any("foo3"), "F").unwrap();
        let err = resolve(&provider, &mut registry, &PackageRequest::any("bar2"), "F").unwrap_err();
        assert!(matches!(err, ResolveError::AliasConflict(_)));
    }

    #[test]
    fn test_report_order_matches_enumeration_order() {
        let provider = provider_with_foo3();
        let mut registry = TargetRegistry::new();

        let report = resolve(&provider, &mut registry, &PackageRequest::any("foo3"), "F").unwrap();
        let names: Vec<String> = report.aliases.iter().map(|a| a.name.to_string()).collect();
        assert_eq!(names, vec!["F::F", "F::core", "F::bar", "F::baz"]);
    }
}
