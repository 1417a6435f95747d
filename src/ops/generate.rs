//! Implementation of `stevedore generate`.
//!
//! Turns an upstream package description into a complete vendor
//! package: manifest, build script, discovery script, and environment
//! hooks, with suite dependencies rewritten to their vendor packages.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::dependency::{separate_suite_deps, stable_unique, vendor_dependency};
use crate::core::manifest::UpstreamManifest;
use crate::core::package_name::{PackageName, VersionedName};
use crate::render::{template, Renderer, TemplateContext};
use crate::util::config::SuiteConfig;
use crate::util::fs::{ensure_dir, read_to_string, write_string};

/// `<version>` element of a previously generated vendor manifest.
static EXISTING_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<version>([^<]+)</version>").unwrap());

/// Initial version for a brand-new vendor package.
const INITIAL_VENDOR_VERSION: &str = "0.0.1";

/// Options for generating a vendor package.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path to the upstream package description
    pub manifest_path: PathBuf,

    /// Output directory (defaults to the vendor package name)
    pub output_dir: Option<PathBuf>,
}

/// What a generation run produced.
#[derive(Debug)]
pub struct GeneratedPackage {
    /// The vendor package name
    pub vendor_name: String,

    /// Where the files were written
    pub output_dir: PathBuf,

    /// The files written, in emission order
    pub files: Vec<PathBuf>,
}

/// Generate a vendor package from an upstream description.
pub fn generate(config: &SuiteConfig, opts: &GenerateOptions) -> Result<GeneratedPackage> {
    let mut manifest = UpstreamManifest::load(&opts.manifest_path)?;
    manifest
        .dependencies
        .retain_allowed(&config.disallowed_dependencies);

    let unversioned = manifest.package.name.unversioned()?;
    let vendor_name = unversioned.vendor_name();
    let output_dir = opts
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&vendor_name));

    tracing::info!(
        "generating `{}` from `{}`",
        vendor_name,
        manifest.package.name
    );

    // Suite dependencies get vendored and declared unconditionally;
    // each remaining group passes through as-is. Buildtool entries are
    // never suite members, so that group is left untouched.
    let build = separate_suite_deps(&manifest.dependencies.build, config);
    let exec = separate_suite_deps(&manifest.dependencies.exec, config);
    let test = separate_suite_deps(&manifest.dependencies.test, config);
    let doc = separate_suite_deps(&manifest.dependencies.doc, config);

    let mut in_suite: Vec<PackageName> = Vec::new();
    in_suite.extend(build.in_suite.iter().cloned());
    in_suite.extend(exec.in_suite.iter().cloned());
    in_suite.extend(test.in_suite.iter().cloned());
    in_suite.extend(doc.in_suite.iter().cloned());

    let mut suite_vendor_deps = Vec::new();
    for dep in stable_unique(in_suite) {
        suite_vendor_deps.push(vendor_dependency(&dep, config)?);
    }

    let cmake_pkg_name = config.cmake_name(&unversioned);
    let github_pkg_name = config.github_name(&unversioned);
    let version = manifest.package.version;
    let versioned_name = VersionedName::from_base(&cmake_pkg_name, version.major);

    let mut cmake_args = Vec::new();
    if config.has_docs(&unversioned) {
        cmake_args.push("-DBUILD_DOCS:BOOL=OFF".to_string());
    }
    if config.has_pybind11(&unversioned) {
        cmake_args.push("-DSKIP_PYBIND11:BOOL=ON".to_string());
    }
    if config.has_swig(&unversioned) {
        cmake_args.push("-DSKIP_SWIG:BOOL=ON".to_string());
    }

    let has_extra_cmake = config.has_extra_cmake(&unversioned);
    let has_dsv = config.has_dsv(&unversioned);

    let ctx = TemplateContext {
        pkg_name: manifest.package.name.as_str().to_string(),
        cmake_pkg_name: cmake_pkg_name.clone(),
        github_pkg_name: github_pkg_name.clone(),
        vendor_name: vendor_name.clone(),
        vendor_version: existing_vendor_version(&output_dir),
        upstream_version: version.to_string(),
        major: version.major,
        minor: version.minor,
        patch: version.patch,
        versioned_name: versioned_name.as_str().to_string(),
        alias_prefix: cmake_pkg_name.clone(),
        description: manifest.package.description.clone().unwrap_or_default(),
        maintainers: manifest.package.maintainers.clone(),
        license: manifest
            .package
            .license
            .clone()
            .unwrap_or_else(|| "Apache-2.0".to_string()),
        suite_vendor_deps,
        build_depends: names(&build.external),
        buildtool_depends: names(&manifest.dependencies.buildtool),
        exec_depends: names(&exec.external),
        test_depends: names(&test.external),
        doc_depends: names(&doc.external),
        cmake_args,
        has_extra_cmake,
        has_dsv,
        has_patches: config.has_patches(&unversioned),
        vcs_url: format!("{}/{}.git", config.vcs_base_url, github_pkg_name),
    };

    let renderer = Renderer::new()?;
    ensure_dir(&output_dir)?;

    let mut files = Vec::new();
    let mut emit = |file_name: String, template_name: &str| -> Result<()> {
        let contents = renderer.render(template_name, &ctx)?;
        let path = output_dir.join(&file_name);
        write_string(&path, &contents)?;
        tracing::info!("wrote {}", path.display());
        files.push(path);
        Ok(())
    };

    emit("package.xml".to_string(), template::VENDOR_MANIFEST)?;
    emit("CMakeLists.txt".to_string(), template::BUILD_SCRIPT)?;
    emit(
        format!("{}-config.cmake.in", cmake_pkg_name),
        template::DISCOVERY_SCRIPT,
    )?;
    if has_extra_cmake {
        emit(
            format!("{}-extras.cmake.in", vendor_name),
            template::EXTRAS_HOOK,
        )?;
    }
    if has_dsv {
        emit(format!("{}.dsv.in", vendor_name), template::DSV_HOOK)?;
    }

    Ok(GeneratedPackage {
        vendor_name,
        output_dir,
        files,
    })
}

/// The vendor package's own version, preserved across regeneration.
fn existing_vendor_version(output_dir: &Path) -> String {
    let manifest_path = output_dir.join("package.xml");
    if !manifest_path.exists() {
        return INITIAL_VENDOR_VERSION.to_string();
    }

    match read_to_string(&manifest_path) {
        Ok(contents) => EXISTING_VERSION
            .captures(&contents)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| INITIAL_VENDOR_VERSION.to_string()),
        Err(e) => {
            tracing::warn!(
                "could not read existing {}: {:#}",
                manifest_path.display(),
                e
            );
            INITIAL_VENDOR_VERSION.to_string()
        }
    }
}

fn names(deps: &[PackageName]) -> Vec<String> {
    deps.iter().map(|d| d.as_str().to_string()).collect()
}
