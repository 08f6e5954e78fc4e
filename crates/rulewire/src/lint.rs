//! Lint extension emitter.
//!
//! One inspection function per syntax node type. Each function runs every
//! rule registered for that type, discards the results (inspection rules
//! only report), and tells the traversal to continue into children.

use crate::builder::AssignTarget;
use crate::config::GeneratorConfig;
use crate::syntax::{Expr, ExtensionDecl, FunctionDecl, Identifier};
use std::collections::{HashMap, HashSet};

/// Builds the inspection-pipeline extension.
#[derive(Debug, Clone, Copy)]
pub struct LintExtensionEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> LintExtensionEmitter<'a> {
    /// Create an emitter using `config`'s names and layout.
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Emit the extension for `linters`.
    ///
    /// Functions appear in ascending node-type order and rule calls in
    /// ascending rule order. A node type with no rules still gets a function
    /// holding only the return.
    #[must_use]
    pub fn emit(&self, linters: &HashMap<Identifier, HashSet<Identifier>>) -> ExtensionDecl {
        let mut node_types: Vec<_> = linters.iter().collect();
        node_types.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let functions = node_types
            .into_iter()
            .map(|(node_type, rules)| {
                let mut rules: Vec<_> = rules.iter().collect();
                rules.sort_unstable();
                self.visit_function(node_type, &rules)
            })
            .collect();

        self.config
            .builder()
            .extension(&self.config.lint_pipeline, functions)
    }

    fn visit_function(&self, node_type: &Identifier, rules: &[&Identifier]) -> FunctionDecl {
        let b = self.config.builder();
        let c = self.config;

        let mut body: Vec<_> = rules
            .iter()
            .map(|rule| {
                b.rule_invocation(
                    &AssignTarget::Discard,
                    rule,
                    &c.context_arg,
                    &c.visit_method,
                    &c.node_param,
                )
            })
            .collect();
        body.push(b.return_statement(Expr::implicit_member(&c.continue_value)));

        tracing::debug!(node_type = %node_type, rules = rules.len(), "emitted inspection function");
        b.function(
            &c.visit_method,
            &c.node_param,
            node_type,
            &c.continue_kind,
            body,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codegen::render;
    use crate::syntax::Stmt;
    use pretty_assertions::assert_eq;

    fn id(name: &str) -> Identifier {
        Identifier::new(name).unwrap()
    }

    fn mapping(entries: &[(&str, &[&str])]) -> HashMap<Identifier, HashSet<Identifier>> {
        entries
            .iter()
            .map(|(k, rules)| (id(k), rules.iter().map(|r| id(r)).collect()))
            .collect()
    }

    #[test]
    fn one_function_per_node_type() {
        let config = GeneratorConfig::default();
        let ext = LintExtensionEmitter::new(&config).emit(&mapping(&[
            ("A", &["R1"]),
            ("B", &[]),
            ("C", &["R1", "R2", "R3"]),
        ]));
        assert_eq!(ext.functions().len(), 3);
        let counts: Vec<_> = ext
            .functions()
            .iter()
            .map(|f| f.body.statements.len())
            .collect();
        assert_eq!(counts, [2, 1, 4]);
    }

    #[test]
    fn node_types_and_rules_sorted() {
        let config = GeneratorConfig::default();
        let ext = LintExtensionEmitter::new(&config).emit(&mapping(&[
            ("IfStmt", &["RuleZ", "RuleA"]),
            ("ForStmt", &["RuleB"]),
        ]));
        let types: Vec<_> = ext.functions().iter().map(|f| f.parameter_type()).collect();
        assert_eq!(types, ["ForStmt", "IfStmt"]);

        let rendered = render(&ext.functions()[1]);
        let a = rendered.find("RuleA").unwrap();
        let z = rendered.find("RuleZ").unwrap();
        assert!(a < z);
    }

    #[test]
    fn empty_rule_set_keeps_return_only() {
        let config = GeneratorConfig::default();
        let ext = LintExtensionEmitter::new(&config).emit(&mapping(&[("Literal", &[])]));
        let body = &ext.functions()[0].body.statements;
        assert_eq!(body.len(), 1);
        assert!(matches!(body[0], Stmt::Return { .. }));
    }

    #[test]
    fn results_are_discarded() {
        let config = GeneratorConfig::default();
        let ext = LintExtensionEmitter::new(&config).emit(&mapping(&[("A", &["R1", "R2"])]));
        let body = &ext.functions()[0].body.statements;
        assert!(body[..2].iter().all(|s| matches!(
            s,
            Stmt::Assignment {
                target: Expr::Discard(_),
                ..
            }
        )));
    }

    #[test]
    fn renders_expected_text() {
        let config = GeneratorConfig::default();
        let ext = LintExtensionEmitter::new(&config).emit(&mapping(&[("ForStmtSyntax", &["RuleB"])]));
        assert_eq!(
            render(&ext),
            "\n\nextension LintPipeline {\n\
             \n  func visit(_ node: ForStmtSyntax) -> SyntaxVisitorContinueKind {\
             \n    _ = RuleB(context: context).visit(node)\
             \n    return .visitChildren\
             \n  }\
             \n}"
        );
    }

    #[test]
    fn empty_mapping_yields_empty_extension() {
        let config = GeneratorConfig::default();
        let ext = LintExtensionEmitter::new(&config).emit(&HashMap::new());
        assert!(ext.functions().is_empty());
        assert_eq!(render(&ext), "\n\nextension LintPipeline {\n}");
    }
}
