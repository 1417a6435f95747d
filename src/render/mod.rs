//! Template rendering for vendor package files.
//!
//! All templates are compiled into the binary and rendered with a
//! single substitution context. Tokens are resolved exactly once, at
//! render time; the emitted files contain no deferred placeholders of
//! our own (CMake's `@ONLY` pass-through sees nothing left to do).

use anyhow::{Context, Result};
use serde::Serialize;
use tera::Tera;

/// Built-in template names.
pub mod template {
    pub const VENDOR_MANIFEST: &str = "package.xml";
    pub const BUILD_SCRIPT: &str = "CMakeLists.txt";
    pub const DISCOVERY_SCRIPT: &str = "config.cmake.in";
    pub const EXTRAS_HOOK: &str = "extras.cmake.in";
    pub const DSV_HOOK: &str = "vendor.dsv.in";
}

/// The substitution context shared by every template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    /// Upstream package name, version-suffixed (e.g. `gz-math7`)
    pub pkg_name: String,

    /// CMake package name, unversioned (e.g. `gz-math`)
    pub cmake_pkg_name: String,

    /// Upstream repository name (e.g. `gz-math`)
    pub github_pkg_name: String,

    /// Vendor package name (e.g. `gz_math_vendor`)
    pub vendor_name: String,

    /// The vendor package's own version
    pub vendor_version: String,

    /// Upstream release version as a string
    pub upstream_version: String,

    /// Upstream version segments
    pub major: u64,
    pub minor: u64,
    pub patch: u64,

    /// Versioned package name the discovery script locates
    /// (e.g. `gz-math7`)
    pub versioned_name: String,

    /// Alias namespace root published by the discovery script
    pub alias_prefix: String,

    /// Upstream metadata
    pub description: String,
    pub maintainers: Vec<String>,
    pub license: String,

    /// Vendorized suite dependencies, deduplicated
    pub suite_vendor_deps: Vec<String>,

    /// External dependency groups, passed through unchanged
    pub build_depends: Vec<String>,
    pub buildtool_depends: Vec<String>,
    pub exec_depends: Vec<String>,
    pub test_depends: Vec<String>,
    pub doc_depends: Vec<String>,

    /// Extra arguments for the vendored upstream build
    pub cmake_args: Vec<String>,

    /// Per-package quirks
    pub has_extra_cmake: bool,
    pub has_dsv: bool,
    pub has_patches: bool,

    /// Upstream source repository URL
    pub vcs_url: String,
}

/// Renderer over the built-in template set.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Compile the built-in templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                template::VENDOR_MANIFEST,
                include_str!("templates/package.xml.tera"),
            ),
            (
                template::BUILD_SCRIPT,
                include_str!("templates/cmakelists.tera"),
            ),
            (
                template::DISCOVERY_SCRIPT,
                include_str!("templates/config.cmake.in.tera"),
            ),
            (
                template::EXTRAS_HOOK,
                include_str!("templates/extras.cmake.in.tera"),
            ),
            (
                template::DSV_HOOK,
                include_str!("templates/vendor.dsv.in.tera"),
            ),
        ])
        .context("failed to compile built-in templates")?;

        Ok(Renderer { tera })
    }

    /// Render one of the built-in templates.
    pub fn render(&self, name: &str, ctx: &TemplateContext) -> Result<String> {
        let context = tera::Context::from_serialize(ctx)
            .context("failed to build template context")?;
        self.tera
            .render(name, &context)
            .with_context(|| format!("failed to render template `{}`", name))
    }
}
