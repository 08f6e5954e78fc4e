//! Generator configuration.
//!
//! Names that appear verbatim in generated code (pipeline types, imported
//! modules, the visitor method) plus layout settings. Every field has a
//! default, so a config file only needs to list what it changes.

use crate::builder::{DeclBuilder, MAX_INDENT_WIDTH};
use crate::syntax::{Identifier, Trivia};
use crate::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// License block placed at the top of every generated file.
pub const DEFAULT_LICENSE: &[&str] = &[
    "//===----------------------------------------------------------------------===//",
    "//",
    "// This source file is part of a rulewire-generated pipeline.",
    "//",
    "// Licensed under the MIT License or Apache License v2.0, at your option.",
    "//",
    "//===----------------------------------------------------------------------===//",
];

/// Configuration for one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// License comment lines; `//` is prefixed to lines that lack it
    pub license: Vec<String>,
    /// Notice following the license
    pub notice: String,
    /// Module defining the pipeline types
    pub core_module: Identifier,
    /// Module defining the rules
    pub rules_module: Identifier,
    /// Module defining syntax tree nodes
    pub syntax_module: Identifier,
    /// Type extended with inspection functions
    pub lint_pipeline: Identifier,
    /// Type extended with the rewrite function
    pub format_pipeline: Identifier,
    /// Return type of inspection functions
    pub continue_kind: Identifier,
    /// Case of `continue_kind` returned after running every rule
    pub continue_value: Identifier,
    /// Generic tree node type taken and returned by the rewrite function
    pub tree_node: Identifier,
    /// Name of generated functions and of the method called on each rule
    pub visit_method: Identifier,
    /// Parameter name, also the local binding in the rewrite function
    pub node_param: Identifier,
    /// Label and argument passed to each rule's initializer
    pub context_arg: Identifier,
    /// Spaces per indent level
    pub indent_width: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            license: DEFAULT_LICENSE.iter().map(ToString::to_string).collect(),
            notice: "This file is automatically generated with rulewire. Do Not Edit!".to_string(),
            core_module: Identifier::new_unchecked("SwiftFormatCore"),
            rules_module: Identifier::new_unchecked("SwiftFormatRules"),
            syntax_module: Identifier::new_unchecked("SwiftSyntax"),
            lint_pipeline: Identifier::new_unchecked("LintPipeline"),
            format_pipeline: Identifier::new_unchecked("FormatPipeline"),
            continue_kind: Identifier::new_unchecked("SyntaxVisitorContinueKind"),
            continue_value: Identifier::new_unchecked("visitChildren"),
            tree_node: Identifier::new_unchecked("Syntax"),
            visit_method: Identifier::new_unchecked("visit"),
            node_param: Identifier::new_unchecked("node"),
            context_arg: Identifier::new_unchecked("context"),
            indent_width: 2,
        }
    }
}

impl GeneratorConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has another extension,
    /// fails to parse, or names an invalid identifier.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml_ng::from_str(&text)?,
            Some("json") => serde_json::from_str(&text)?,
            other => {
                return Err(GenError::config(format!(
                    "unsupported config extension {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded generator config");
        Ok(config)
    }

    /// Check settings that the field types cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Config`] for an indent width outside
    /// `1..=MAX_INDENT_WIDTH` or a multi-line notice.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_INDENT_WIDTH).contains(&self.indent_width) {
            return Err(GenError::config(format!(
                "indent_width must be between 1 and {MAX_INDENT_WIDTH}, got {}",
                self.indent_width
            )));
        }
        if self.notice.contains('\n') || self.license.iter().any(|l| l.contains('\n')) {
            return Err(GenError::config("header lines cannot contain newlines"));
        }
        Ok(())
    }

    /// Set the indent width.
    #[must_use]
    pub const fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the license lines.
    #[must_use]
    pub fn with_license(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.license = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Imports in their fixed order: core, rules, syntax.
    #[must_use]
    pub fn imports(&self) -> [&Identifier; 3] {
        [&self.core_module, &self.rules_module, &self.syntax_module]
    }

    /// A builder laid out with this config's indent width.
    #[must_use]
    pub const fn builder(&self) -> DeclBuilder {
        DeclBuilder::new(self.indent_width)
    }

    /// Leading trivia of the first import: license, blank line, notice,
    /// blank line.
    #[must_use]
    pub fn header_trivia(&self) -> Trivia {
        let mut trivia = Trivia::new();
        for line in &self.license {
            trivia = trivia.line_comment(comment_line(line)).newline(1);
        }
        if !self.license.is_empty() {
            trivia = trivia.newline(1);
        }
        trivia.line_comment(comment_line(&self.notice)).newline(2)
    }
}

fn comment_line(text: &str) -> String {
    if text.starts_with("//") {
        text.to_string()
    } else if text.is_empty() {
        "//".to_string()
    } else {
        format!("// {text}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn temp_with_suffix(suffix: &str) -> NamedTempFile {
        tempfile::Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn default_validates() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn imports_in_fixed_order() {
        let config = GeneratorConfig::default();
        let names: Vec<_> = config.imports().iter().map(|i| i.as_str()).collect();
        assert_eq!(names, ["SwiftFormatCore", "SwiftFormatRules", "SwiftSyntax"]);
    }

    #[test]
    fn header_trivia_layout() {
        let config = GeneratorConfig::default().with_license(["Copyright", ""]);
        assert_eq!(
            config.header_trivia().to_string(),
            "// Copyright\n//\n\n// This file is automatically generated with rulewire. Do Not Edit!\n\n"
        );
    }

    #[test]
    fn header_without_license() {
        let mut config = GeneratorConfig::default().with_license(Vec::<String>::new());
        config.notice = "generated".into();
        assert_eq!(config.header_trivia().to_string(), "// generated\n\n");
    }

    #[test]
    fn zero_indent_rejected() {
        let config = GeneratorConfig::default().with_indent_width(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_indent_rejected() {
        let config = GeneratorConfig::default().with_indent_width(MAX_INDENT_WIDTH + 1);
        assert!(config.validate().is_err());
        assert!(GeneratorConfig::default()
            .with_indent_width(MAX_INDENT_WIDTH)
            .validate()
            .is_ok());
    }

    #[test]
    fn load_rejects_huge_indent() {
        let mut file = temp_with_suffix(".yaml");
        writeln!(file, "indent_width: 18446744073709551615").unwrap();
        let err = GeneratorConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
        assert!(err.to_string().contains("indent_width"));
    }

    #[test]
    fn load_yaml_partial_override() {
        let mut file = temp_with_suffix(".yaml");
        writeln!(file, "lint_pipeline: Linter\nindent_width: 4").unwrap();
        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.lint_pipeline.as_str(), "Linter");
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.format_pipeline.as_str(), "FormatPipeline");
    }

    #[test]
    fn load_json() {
        let mut file = temp_with_suffix(".json");
        write!(file, r#"{{"tree_node": "Node"}}"#).unwrap();
        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.tree_node.as_str(), "Node");
    }

    #[test]
    fn load_rejects_keyword_names() {
        let mut file = temp_with_suffix(".yaml");
        writeln!(file, "visit_method: return").unwrap();
        assert!(GeneratorConfig::load(file.path()).is_err());
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let file = temp_with_suffix(".toml");
        let err = GeneratorConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }
}
