//! Smoke tests for the rulewire binary

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const REGISTRY: &str = "\
linters:
  IfStmt: [NoParensAroundConditions]
  ForStmt: [NoParensAroundConditions, DontRepeatTypeInStaticProperties]
formatters: [UseShorthandTypeNames, NoParensAroundConditions]
";

fn rulewire() -> Command {
    Command::cargo_bin("rulewire").expect("rulewire binary should exist")
}

fn registry(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("rules.yaml");
    fs::write(&path, REGISTRY).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    rulewire()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    rulewire()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn test_no_args_fails() {
    rulewire().assert().failure();
}

// ============================================================================
// Generate
// ============================================================================

#[test]
fn test_generate_to_stdout() {
    let dir = TempDir::new().unwrap();
    rulewire()
        .args(["generate", "--registry"])
        .arg(registry(&dir))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("//"))
        .stdout(predicate::str::contains("extension LintPipeline {"))
        .stdout(predicate::str::contains("func visit(_ node: ForStmtSyntax)"))
        .stdout(predicate::str::contains("extension FormatPipeline {"))
        .stdout(predicate::str::ends_with("}\n"));
}

#[test]
fn test_generate_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = registry(&dir);
    let first = rulewire()
        .args(["generate", "--registry"])
        .arg(&path)
        .output()
        .unwrap();
    let second = rulewire()
        .args(["generate", "--registry"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_generate_rejects_bad_identifier() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");
    fs::write(&path, "formatters: [\"not valid\"]\n").unwrap();
    rulewire()
        .args(["generate", "--registry"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_generate_with_config_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rulewire.yaml");
    fs::write(&config, "lint_pipeline: Linter\nindent_width: 4\n").unwrap();
    rulewire()
        .args(["generate", "--registry"])
        .arg(registry(&dir))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("extension Linter {"))
        .stdout(predicate::str::contains("\n    func visit("));
}

// ============================================================================
// Manifest round trip
// ============================================================================

#[test]
fn test_generate_manifest_then_verify() {
    let dir = TempDir::new().unwrap();
    let rules = registry(&dir);
    let output = dir.path().join("Pipelines+Generated.swift");

    rulewire()
        .args(["--quiet", "generate", "--manifest", "--registry"])
        .arg(&rules)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();
    assert!(dir
        .path()
        .join("Pipelines+Generated.swift.manifest.json")
        .exists());

    rulewire()
        .arg("verify")
        .arg(&output)
        .arg("--registry")
        .arg(&rules)
        .assert()
        .success();
}

#[test]
fn test_verify_fails_after_edit() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("Pipelines+Generated.swift");
    rulewire()
        .args(["generate", "--manifest", "--registry"])
        .arg(registry(&dir))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let mut contents = fs::read_to_string(&output).unwrap();
    contents.push_str("// hand edit\n");
    fs::write(&output, contents).unwrap();

    rulewire()
        .arg("verify")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Verification failed"));
}

#[test]
fn test_manifest_requires_output() {
    let dir = TempDir::new().unwrap();
    rulewire()
        .args(["generate", "--manifest", "--registry"])
        .arg(registry(&dir))
        .assert()
        .failure();
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_shows_defaults() {
    rulewire()
        .arg("config")
        .env_remove("RULEWIRE_CONFIG")
        .assert()
        .success()
        .stdout(predicate::str::contains("format_pipeline: FormatPipeline"));
}

// ============================================================================
// Failure reporting
// ============================================================================

#[test]
fn test_failure_reported_even_when_quiet() {
    let dir = TempDir::new().unwrap();
    rulewire()
        .args(["--quiet", "--color", "never", "verify"])
        .arg(dir.path().join("missing.swift"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("FAIL Error: Verification failed"));
}

#[test]
fn test_generate_rejects_oversized_indent() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rulewire.yaml");
    fs::write(&config, "indent_width: 18446744073709551615\n").unwrap();
    rulewire()
        .args(["--color", "never", "generate", "--registry"])
        .arg(registry(&dir))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("indent_width must be between 1 and 16"));
}

#[test]
fn test_generate_merges_repeated_node_type() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");
    fs::write(&path, "linters:\n  IfStmt: [RuleA]\n  IfStmt: [RuleB]\n").unwrap();
    rulewire()
        .args(["generate", "--registry"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("_ = RuleA(context: context).visit(node)"))
        .stdout(predicate::str::contains("_ = RuleB(context: context).visit(node)"));
}
