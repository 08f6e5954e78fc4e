//! Pipeline generator: registry in, source file out.

use crate::builder::SourceFileBuilder;
use crate::codegen::{generate, write_source};
use crate::config::GeneratorConfig;
use crate::format::FormatExtensionEmitter;
use crate::lint::LintExtensionEmitter;
use crate::manifest::{write_with_manifest, GenerationMetadata};
use crate::registry::{RegistrySnapshot, RuleRegistry};
use crate::syntax::SourceFile;
use crate::Result;
use std::io::Write;
use std::path::Path;

/// Default name of the generated file.
pub const DEFAULT_OUTPUT_FILE: &str = "Pipelines+Generated.swift";

/// Generates the pipeline dispatch file.
///
/// The output is a function of the registry's contents and the config only:
/// two runs over equal registries produce identical bytes.
#[derive(Debug, Clone, Default)]
pub struct PipelineGenerator {
    config: GeneratorConfig,
}

impl PipelineGenerator {
    /// Create a generator.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the declaration sequence: header-commented first import, the
    /// remaining imports, the lint extension, the format extension.
    #[must_use]
    pub fn build<R: RuleRegistry + ?Sized>(&self, registry: &R) -> SourceFile {
        let b = self.config.builder();
        let [core, rules, syntax] = self.config.imports();

        let linters = registry.syntax_node_linters();
        let formatters = registry.all_formatters();
        tracing::info!(
            node_types = linters.len(),
            formatters = formatters.len(),
            "generating pipelines"
        );

        SourceFileBuilder::new()
            .import(b.import_with_header(core, self.config.header_trivia()))
            .import(b.import(rules))
            .import(b.import(syntax))
            .extension(LintExtensionEmitter::new(&self.config).emit(&linters))
            .extension(FormatExtensionEmitter::new(&self.config).emit(&formatters))
            .build()
    }

    /// Generate the file as a string.
    #[must_use]
    pub fn generate<R: RuleRegistry + ?Sized>(&self, registry: &R) -> String {
        generate(&self.build(registry))
    }

    /// Generate and stream to `sink`. Returns the byte count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenError::Io`] if the sink fails.
    pub fn write<R: RuleRegistry + ?Sized, W: Write + ?Sized>(
        &self,
        registry: &R,
        sink: &mut W,
    ) -> Result<usize> {
        write_source(&self.build(registry), sink)
    }

    /// Generate to `path` and write a manifest sidecar next to it.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn write_with_manifest<R: RuleRegistry + ?Sized>(
        &self,
        registry: &R,
        path: &Path,
        regenerate_cmd: &str,
    ) -> Result<GenerationMetadata> {
        let contents = self.generate(registry);
        let input_hash = RegistrySnapshot::capture(registry).hash()?;
        let metadata = GenerationMetadata::now(input_hash, regenerate_cmd);
        write_with_manifest(path, &contents, metadata.clone())?;
        tracing::info!(path = %path.display(), bytes = contents.len(), "wrote generated file with manifest");
        Ok(metadata)
    }
}
