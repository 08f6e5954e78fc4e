//! Manifest sidecar for generated files.
//!
//! # Purpose
//!
//! Generated pipeline files are overwritten wholesale on every run, so a hand
//! edit is silently lost. The manifest makes such edits, and stale output,
//! detectable.
//!
//! # Workflow
//!
//! 1. Generate → write `Pipelines+Generated.swift` and
//!    `Pipelines+Generated.swift.manifest.json`
//! 2. `verify` → hash the file and compare with the manifest
//! 3. Optionally compare the recorded registry hash with the current one

use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata about one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Tool that generated this code
    pub tool: String,
    /// Tool version
    pub version: String,
    /// Blake3 hash of the canonical registry snapshot
    pub input_hash: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    /// Command to regenerate
    pub regenerate_cmd: String,
}

impl GenerationMetadata {
    /// Metadata for a run happening now.
    #[must_use]
    pub fn now(input_hash: impl Into<String>, regenerate_cmd: impl Into<String>) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input_hash: input_hash.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            regenerate_cmd: regenerate_cmd.into(),
        }
    }
}

/// Manifest for a generated file.
///
/// Stored alongside generated files as `<filename>.manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileManifest {
    /// Version of manifest format
    pub manifest_version: u32,
    /// Generated file name
    pub output_path: String,
    /// Blake3 hash of generated file contents
    pub output_hash: String,
    /// Generation metadata
    pub generation: GenerationMetadata,
}

impl FileManifest {
    /// Current manifest format version.
    pub const VERSION: u32 = 1;

    /// Create a new manifest.
    #[must_use]
    pub fn new(
        output_path: impl Into<String>,
        output_hash: impl Into<String>,
        generation: GenerationMetadata,
    ) -> Self {
        Self {
            manifest_version: Self::VERSION,
            output_path: output_path.into(),
            output_hash: output_hash.into(),
            generation,
        }
    }

    /// Get the manifest file path for a generated file.
    #[must_use]
    pub fn manifest_path(generated_path: &Path) -> PathBuf {
        let mut filename = generated_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        filename.push_str(".manifest.json");
        generated_path.with_file_name(filename)
    }

    /// Write manifest to file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read manifest from file.
    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Compute Blake3 hash of file contents.
#[must_use]
pub fn hash_file_contents(contents: &str) -> String {
    blake3::hash(contents.as_bytes()).to_hex().to_string()
}

/// Verify a generated file matches its manifest, returning the manifest.
///
/// # Errors
///
/// Returns an error if:
/// - Manifest file doesn't exist or cannot be parsed
/// - Manifest was written by an unknown format version
/// - Hash mismatch (file was modified)
pub fn verify(generated_path: &Path) -> Result<FileManifest> {
    let manifest_path = FileManifest::manifest_path(generated_path);

    let manifest = FileManifest::read(&manifest_path).map_err(|e| GenError::ManifestError {
        path: generated_path.display().to_string(),
        reason: format!("cannot read manifest at {}: {e}", manifest_path.display()),
    })?;

    if manifest.manifest_version != FileManifest::VERSION {
        return Err(GenError::ManifestError {
            path: generated_path.display().to_string(),
            reason: format!(
                "unsupported manifest version {} (expected {})",
                manifest.manifest_version,
                FileManifest::VERSION
            ),
        });
    }

    let contents = std::fs::read_to_string(generated_path)?;
    let actual_hash = hash_file_contents(&contents);

    if actual_hash != manifest.output_hash {
        return Err(GenError::HashMismatch {
            path: generated_path.display().to_string(),
            expected: manifest.output_hash,
            actual: actual_hash,
        });
    }

    tracing::debug!(path = %generated_path.display(), "manifest verified");
    Ok(manifest)
}

/// Check that a verified manifest was generated from the given registry.
///
/// # Errors
///
/// Returns [`GenError::ManifestError`] naming the regeneration command if
/// the registry has changed since the file was generated.
pub fn check_input(generated_path: &Path, manifest: &FileManifest, input_hash: &str) -> Result<()> {
    if manifest.generation.input_hash == input_hash {
        return Ok(());
    }
    Err(GenError::ManifestError {
        path: generated_path.display().to_string(),
        reason: format!(
            "registry changed since generation; run `{}`",
            manifest.generation.regenerate_cmd
        ),
    })
}

/// Write generated code with manifest.
///
/// Creates both the generated file and its `.manifest.json` sidecar.
pub fn write_with_manifest(path: &Path, contents: &str, metadata: GenerationMetadata) -> Result<()> {
    let hash = hash_file_contents(contents);

    std::fs::write(path, contents)?;

    let manifest = FileManifest::new(
        path.file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
        hash,
        metadata,
    );
    manifest.write(&FileManifest::manifest_path(path))?;

    Ok(())
}
