//! Format extension emitter.
//!
//! Exactly one rewrite function. It copies its parameter into a local
//! binding, feeds that binding through every rewrite rule in ascending name
//! order, reassigning after each one, and returns the final value.
//!
//! Because every step reassigns the same binding, the generated body is a
//! left fold of rewrites in sorted order. Rules whose effects do not commute
//! will observe that order.

use crate::builder::AssignTarget;
use crate::config::GeneratorConfig;
use crate::syntax::{Expr, ExtensionDecl, Identifier};
use std::collections::HashSet;

/// Builds the rewrite-pipeline extension.
#[derive(Debug, Clone, Copy)]
pub struct FormatExtensionEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> FormatExtensionEmitter<'a> {
    /// Create an emitter using `config`'s names and layout.
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Emit the extension for `formatters`.
    #[must_use]
    pub fn emit(&self, formatters: &HashSet<Identifier>) -> ExtensionDecl {
        let b = self.config.builder();
        let c = self.config;
        let node = &c.node_param;

        let mut rules: Vec<_> = formatters.iter().collect();
        rules.sort_unstable();

        let mut body = Vec::with_capacity(rules.len() + 2);
        body.push(b.variable_binding(node, node));
        body.extend(rules.iter().map(|rule| {
            b.rule_invocation(
                &AssignTarget::Binding(node.clone()),
                rule,
                &c.context_arg,
                &c.visit_method,
                node,
            )
        }));
        body.push(b.return_statement(Expr::ident(node)));

        tracing::debug!(rules = rules.len(), "emitted rewrite function");
        let visit = b.function(&c.visit_method, node, &c.tree_node, &c.tree_node, body);
        b.extension(&c.format_pipeline, vec![visit])
    }
}
