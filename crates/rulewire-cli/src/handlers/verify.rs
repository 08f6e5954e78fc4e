//! Verify command handler

use crate::commands::VerifyArgs;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use rulewire::manifest;
use rulewire::registry::{RegistryFile, RegistrySnapshot};
use rulewire::GenError;

/// Execute the verify command
pub fn execute_verify(reporter: &Reporter, args: &VerifyArgs) -> CliResult<()> {
    let found = manifest::verify(&args.file).map_err(|e| match e {
        GenError::HashMismatch { .. } | GenError::ManifestError { .. } => {
            CliError::verification(e.to_string())
        }
        other => other.into(),
    })?;

    if let Some(registry_path) = &args.registry {
        tracing::debug!(registry = %registry_path.display(), "checking registry hash");
        let registry = RegistryFile::load(registry_path)?;
        let input_hash = RegistrySnapshot::capture(&registry).hash()?;
        manifest::check_input(&args.file, &found, &input_hash)
            .map_err(|e| CliError::verification(e.to_string()))?;
    }

    reporter.success(&format!(
        "{} matches its manifest (generated by {} {})",
        args.file.display(),
        found.generation.tool,
        found.generation.version
    ));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rulewire::config::GeneratorConfig;
    use rulewire::generator::PipelineGenerator;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn generate(dir: &TempDir, registry_text: &str) -> (PathBuf, PathBuf) {
        let registry_path = dir.path().join("rules.yaml");
        std::fs::write(&registry_path, registry_text).unwrap();
        let registry = RegistryFile::load(&registry_path).unwrap();
        let output = dir.path().join("Pipelines+Generated.swift");
        PipelineGenerator::new(GeneratorConfig::default())
            .write_with_manifest(&registry, &output, "rulewire generate")
            .unwrap();
        (output, registry_path)
    }

    fn quiet() -> Reporter {
        Reporter::new(false, true)
    }

    #[test]
    fn test_verify_fresh_file() {
        let dir = TempDir::new().unwrap();
        let (file, registry) = generate(&dir, "formatters: [UseEarlyExits]\n");
        let args = VerifyArgs {
            file,
            registry: Some(registry),
        };
        execute_verify(&quiet(), &args).unwrap();
    }

    #[test]
    fn test_verify_detects_edit() {
        let dir = TempDir::new().unwrap();
        let (file, _) = generate(&dir, "formatters: [UseEarlyExits]\n");
        std::fs::write(&file, "// edited\n").unwrap();

        let err = execute_verify(&quiet(), &VerifyArgs { file, registry: None }).unwrap_err();
        assert!(matches!(err, CliError::Verification { .. }));
    }

    #[test]
    fn test_verify_detects_stale_registry() {
        let dir = TempDir::new().unwrap();
        let (file, registry) = generate(&dir, "formatters: [UseEarlyExits]\n");
        std::fs::write(&registry, "formatters: [UseEarlyExits, UseShorthandTypeNames]\n").unwrap();

        let err = execute_verify(
            &quiet(),
            &VerifyArgs {
                file,
                registry: Some(registry),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("registry changed"));
    }

    #[test]
    fn test_verify_without_manifest() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.swift");
        std::fs::write(&file, "import SwiftSyntax\n").unwrap();

        let err = execute_verify(&quiet(), &VerifyArgs { file, registry: None }).unwrap_err();
        assert!(matches!(err, CliError::Verification { .. }));
    }
}
