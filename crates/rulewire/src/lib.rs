//! Rulewire: generated dispatch code for lint and format pipelines.
//!
//! Given a registry of which inspection rules apply to which syntax node
//! types, and which rewrite rules apply to the whole tree, rulewire emits a
//! source file that extends the two pipeline types with one dispatch
//! function per node type (inspection) and a single rewrite function
//! (formatting).
//!
//! Output is built as a typed syntax tree with explicit whitespace trivia and
//! then serialized, never assembled from string templates, so it is always
//! well formed and byte-for-byte reproducible.
//!
//! ```rust
//! use rulewire::prelude::*;
//!
//! let registry = StaticRegistry::from_names(
//!     [("IfStmtSyntax", vec!["NoParensAroundConditions"])],
//!     ["NoParensAroundConditions"],
//! ).unwrap();
//! let text = PipelineGenerator::default().generate(&registry);
//! assert!(text.contains("func visit(_ node: IfStmtSyntax) -> SyntaxVisitorContinueKind {"));
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod codegen;
pub mod config;
mod error;
pub mod format;
pub mod generator;
pub mod lint;
pub mod manifest;
pub mod registry;
pub mod syntax;

pub use error::{GenError, Result};

/// Common imports.
pub mod prelude {
    pub use crate::builder::{AssignTarget, DeclBuilder, SourceFileBuilder};
    pub use crate::codegen::{generate, render, write_source};
    pub use crate::config::GeneratorConfig;
    pub use crate::format::FormatExtensionEmitter;
    pub use crate::generator::{PipelineGenerator, DEFAULT_OUTPUT_FILE};
    pub use crate::lint::LintExtensionEmitter;
    pub use crate::registry::{RegistryFile, RegistrySnapshot, RuleRegistry, StaticRegistry};
    pub use crate::syntax::*;
    pub use crate::{GenError, Result};
}
