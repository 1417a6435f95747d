//! CLI integration tests for Stevedore.
//!
//! These tests verify the full CLI workflow: generating vendor packages
//! from upstream descriptions and resolving alias sets against an
//! installed registry.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the stevedore binary command.
fn stevedore() -> Command {
    Command::cargo_bin("stevedore").unwrap()
}

/// Create a temporary directory for test fixtures.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_upstream(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("gz-math7.toml");
    fs::write(
        &path,
        r#"
[package]
name = "gz-math7"
version = "7.4.0"
description = "Math classes and functions for robot applications"
maintainers = ["dev@example.org"]
license = "Apache-2.0"

[dependencies]
build = ["gz-cmake3", "libeigen3-dev"]
exec = ["gz-utils2"]
"#,
    )
    .unwrap();
    path
}

fn write_registry(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("registry.toml");
    fs::write(
        &path,
        r#"
[[package]]
name = "foo3"
version = "3.2.1"
components = ["bar", "baz"]
"#,
    )
    .unwrap();
    path
}

// ============================================================================
// stevedore generate
// ============================================================================

#[test]
fn test_generate_writes_vendor_package() {
    let tmp = temp_dir();
    let manifest = write_upstream(tmp.path());
    let output_dir = tmp.path().join("gz_math_vendor");

    stevedore()
        .args(["generate", manifest.to_str().unwrap()])
        .args(["--output", output_dir.to_str().unwrap()])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("generated `gz_math_vendor`"));

    // Check emitted files
    assert!(output_dir.join("package.xml").exists());
    assert!(output_dir.join("CMakeLists.txt").exists());
    assert!(output_dir.join("gz-math-config.cmake.in").exists());
    assert!(output_dir.join("gz_math_vendor-extras.cmake.in").exists());
    assert!(output_dir.join("gz_math_vendor.dsv.in").exists());

    // Suite dependencies are vendored; external ones pass through.
    let manifest = fs::read_to_string(output_dir.join("package.xml")).unwrap();
    assert!(manifest.contains("<name>gz_math_vendor</name>"));
    assert!(manifest.contains("<depend>gz_cmake_vendor</depend>"));
    assert!(manifest.contains("<build_depend>libeigen3-dev</build_depend>"));
}

#[test]
fn test_generate_discovery_script_aliases() {
    let tmp = temp_dir();
    let manifest = write_upstream(tmp.path());
    let output_dir = tmp.path().join("out");

    stevedore()
        .args(["generate", manifest.to_str().unwrap()])
        .args(["--output", output_dir.to_str().unwrap()])
        .current_dir(tmp.path())
        .assert()
        .success();

    let script = fs::read_to_string(output_dir.join("gz-math-config.cmake.in")).unwrap();
    assert!(script.contains("add_library(gz-math::gz-math ALIAS gz-math7::gz-math7)"));
    assert!(script.contains("add_library(gz-math::core ALIAS gz-math7::gz-math7)"));
}

#[test]
fn test_generate_fails_on_missing_manifest() {
    let tmp = temp_dir();

    stevedore()
        .args(["generate", "no-such-package.toml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ============================================================================
// stevedore aliases
// ============================================================================

#[test]
fn test_aliases_text_output() {
    let tmp = temp_dir();
    let registry = write_registry(tmp.path());

    stevedore()
        .args(["aliases", "foo3"])
        .args(["--registry", registry.to_str().unwrap()])
        .args(["--prefix", "F"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("foo3 3.2.1"))
        .stdout(predicate::str::contains("F::F -> foo3::foo3"))
        .stdout(predicate::str::contains("F::core -> foo3::foo3"))
        .stdout(predicate::str::contains("F::bar -> foo3::foo3-bar"))
        .stdout(predicate::str::contains("F::baz -> foo3::foo3-baz"));
}

#[test]
fn test_aliases_default_prefix_strips_version() {
    let tmp = temp_dir();
    let registry = write_registry(tmp.path());

    stevedore()
        .args(["aliases", "foo3"])
        .args(["--registry", registry.to_str().unwrap()])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("foo::foo -> foo3::foo3"))
        .stdout(predicate::str::contains("foo::core -> foo3::foo3"));
}

#[test]
fn test_aliases_json_output() {
    let tmp = temp_dir();
    let registry = write_registry(tmp.path());

    let output = stevedore()
        .args(["aliases", "foo3", "--json"])
        .args(["--registry", registry.to_str().unwrap()])
        .args(["--prefix", "F"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["package"], "foo3");
    assert_eq!(report["version"], "3.2.1");
    let aliases = report["aliases"].as_array().unwrap();
    assert_eq!(aliases.len(), 4);
    assert_eq!(aliases[0]["name"], "F::F");
    assert_eq!(aliases[1]["name"], "F::core");
}

#[test]
fn test_aliases_version_mismatch_fails() {
    let tmp = temp_dir();
    let registry = write_registry(tmp.path());

    stevedore()
        .args(["aliases", "foo3"])
        .args(["--registry", registry.to_str().unwrap()])
        .args(["--requirement", ">=4"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("foo3"));
}

#[test]
fn test_aliases_missing_component_fails() {
    let tmp = temp_dir();
    let registry = write_registry(tmp.path());

    stevedore()
        .args(["aliases", "foo3"])
        .args(["--registry", registry.to_str().unwrap()])
        .args(["--component", "qux"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("qux"));
}

#[test]
fn test_aliases_unknown_package_fails() {
    let tmp = temp_dir();
    let registry = write_registry(tmp.path());

    stevedore()
        .args(["aliases", "nope1"])
        .args(["--registry", registry.to_str().unwrap()])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_aliases_missing_registry_fails() {
    let tmp = temp_dir();

    stevedore()
        .args(["aliases", "foo3"])
        .args(["--registry", "no-such-registry.toml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ============================================================================
// stevedore completions
// ============================================================================

#[test]
fn test_completions_bash() {
    stevedore()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stevedore"));
}
