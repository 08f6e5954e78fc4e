//! Error types for `rulewire`.
//!
//! Generation itself is total once identifiers are validated. Everything
//! that can fail lives at the edges: loading the registry or configuration,
//! writing the output sink, and checking a manifest.

use thiserror::Error;

/// Result type alias for rulewire operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that can occur while loading inputs or writing generated code.
#[derive(Debug, Error)]
pub enum GenError {
    /// Invalid identifier name (keyword, invalid characters, etc.)
    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdentifier {
        /// The invalid identifier
        name: String,
        /// Why it's invalid
        reason: String,
    },

    /// Configuration could not be interpreted
    #[error("Configuration error: {0}")]
    Config(String),

    /// Manifest verification failed (missing or unreadable manifest)
    #[error("Manifest verification failed for '{path}': {reason}")]
    ManifestError {
        /// Path to the generated file
        path: String,
        /// Why verification failed
        reason: String,
    },

    /// Hash mismatch (generated file was edited by hand)
    #[error("Hash mismatch for '{path}': expected {expected}, got {actual}")]
    HashMismatch {
        /// Path to the file
        path: String,
        /// Expected hash
        expected: String,
        /// Actual hash
        actual: String,
    },

    /// IO error while reading inputs or writing to the sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl GenError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_identifier() {
        let err = GenError::InvalidIdentifier {
            name: "func".to_string(),
            reason: "reserved word".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid identifier 'func': reserved word");
    }

    #[test]
    fn error_display_hash_mismatch() {
        let err = GenError::HashMismatch {
            path: "Pipelines+Generated.swift".to_string(),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        assert!(err.to_string().contains("Hash mismatch"));
        assert!(err.to_string().contains("Pipelines+Generated.swift"));
    }

    #[test]
    fn error_display_config() {
        let err = GenError::config("unsupported extension 'toml'");
        assert_eq!(
            err.to_string(),
            "Configuration error: unsupported extension 'toml'"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed");
        let err: GenError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
