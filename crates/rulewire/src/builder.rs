//! Declaration builder.
//!
//! Constructors for the handful of shapes pipeline code needs. Every
//! constructor is total: names arrive as validated [`Identifier`]s, and the
//! builder attaches the whitespace each token needs, so the result renders
//! as correctly formatted source without a separate formatting pass.
//!
//! # Example
//!
//! ```rust
//! use rulewire::prelude::*;
//!
//! let b = DeclBuilder::new(2);
//! let node = Identifier::new("node").unwrap();
//! let body = vec![b.return_statement(Expr::ident(&node))];
//! let func = b.function(&Identifier::new("visit").unwrap(), &node,
//!     &Identifier::new("Syntax").unwrap(), &Identifier::new("Syntax").unwrap(), body);
//! assert_eq!(func.body.statements.len(), 1);
//! ```

use crate::syntax::*;

/// What the result of a rule invocation is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignTarget {
    /// `_ = ...`: the result is intentionally unused
    Discard,
    /// `name = ...`: the result replaces a local binding
    Binding(Identifier),
}

/// Builder for source files.
#[derive(Debug, Default)]
pub struct SourceFileBuilder {
    declarations: Vec<Decl>,
}

impl SourceFileBuilder {
    /// Create a new empty file builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration.
    #[must_use]
    pub fn decl(mut self, decl: Decl) -> Self {
        self.declarations.push(decl);
        self
    }

    /// Add an import.
    #[must_use]
    pub fn import(self, import: ImportDecl) -> Self {
        self.decl(Decl::Import(import))
    }

    /// Add several imports in order.
    #[must_use]
    pub fn imports(mut self, imports: impl IntoIterator<Item = ImportDecl>) -> Self {
        self.declarations
            .extend(imports.into_iter().map(Decl::Import));
        self
    }

    /// Add an extension block.
    #[must_use]
    pub fn extension(self, extension: ExtensionDecl) -> Self {
        self.decl(Decl::Extension(extension))
    }

    /// Build the file. The end-of-file token terminates the last line.
    #[must_use]
    pub fn build(self) -> SourceFile {
        SourceFile {
            declarations: self.declarations,
            end_of_file: Token::end_of_file().with_leading(Trivia::newlines(1)),
        }
    }
}

/// Widest indent level accepted, in spaces.
pub const MAX_INDENT_WIDTH: usize = 16;

/// Builds declarations with consistent indentation.
///
/// Functions are laid out as extension members: one indent level for the
/// signature and two for body statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclBuilder {
    indent_width: usize,
}

impl Default for DeclBuilder {
    fn default() -> Self {
        Self::new(2)
    }
}

impl DeclBuilder {
    /// Create a builder indenting by `indent_width` spaces per level,
    /// capped at [`MAX_INDENT_WIDTH`].
    #[must_use]
    pub const fn new(indent_width: usize) -> Self {
        let indent_width = if indent_width > MAX_INDENT_WIDTH {
            MAX_INDENT_WIDTH
        } else {
            indent_width
        };
        Self { indent_width }
    }

    const fn indent(&self, level: usize) -> usize {
        self.indent_width * level
    }

    /// `import module` on its own line.
    #[must_use]
    pub fn import(&self, module: &Identifier) -> ImportDecl {
        ImportDecl {
            import_keyword: Token::keyword(Keyword::Import)
                .with_leading(Trivia::newlines(1))
                .with_trailing(Trivia::spaces(1)),
            path: Token::ident(module),
        }
    }

    /// `import module` preceded by the file header.
    #[must_use]
    pub fn import_with_header(&self, module: &Identifier, header: Trivia) -> ImportDecl {
        self.import(module).with_leading_trivia(header)
    }

    /// `func name(_ param: ParamType) -> ReturnType { body }`
    #[must_use]
    pub fn function(
        &self,
        name: &Identifier,
        param_name: &Identifier,
        param_type: &Identifier,
        return_type: &Identifier,
        body: Vec<Stmt>,
    ) -> FunctionDecl {
        let statements = body
            .into_iter()
            .map(|stmt| stmt.with_leading_trivia(Trivia::line(1, self.indent(2))))
            .collect();

        FunctionDecl {
            func_keyword: Token::keyword(Keyword::Func)
                .with_leading(Trivia::line(2, self.indent(1)))
                .with_trailing(Trivia::spaces(1)),
            name: Token::ident(name),
            left_paren: Token::punct(Punct::LeftParen),
            parameter: Parameter {
                first_name: Token::wildcard().with_trailing(Trivia::spaces(1)),
                second_name: Token::ident(param_name),
                colon: Token::punct(Punct::Colon).with_trailing(Trivia::spaces(1)),
                ty: Token::ident(param_type),
            },
            right_paren: Token::punct(Punct::RightParen).with_trailing(Trivia::spaces(1)),
            arrow: Token::punct(Punct::Arrow).with_trailing(Trivia::spaces(1)),
            return_type: Token::ident(return_type).with_trailing(Trivia::spaces(1)),
            body: CodeBlock {
                left_brace: Token::punct(Punct::LeftBrace),
                statements,
                right_brace: Token::punct(Punct::RightBrace)
                    .with_leading(Trivia::line(1, self.indent(1))),
            },
        }
    }

    /// `extension TypeName { members }`, separated from what precedes it by
    /// a blank line.
    #[must_use]
    pub fn extension(&self, type_name: &Identifier, members: Vec<FunctionDecl>) -> ExtensionDecl {
        ExtensionDecl {
            extension_keyword: Token::keyword(Keyword::Extension)
                .with_leading(Trivia::newlines(2))
                .with_trailing(Trivia::spaces(1)),
            extended_type: Token::ident(type_name).with_trailing(Trivia::spaces(1)),
            members: MemberBlock {
                left_brace: Token::punct(Punct::LeftBrace),
                members,
                right_brace: Token::punct(Punct::RightBrace).with_leading(Trivia::newlines(1)),
            },
        }
    }

    /// `var name = initializer`
    #[must_use]
    pub fn variable_binding(&self, name: &Identifier, initializer: &Identifier) -> Stmt {
        Stmt::var_decl(name, Expr::ident(initializer))
    }

    /// `target = rule(context: context).method(node)`
    #[must_use]
    pub fn rule_invocation(
        &self,
        target: &AssignTarget,
        rule: &Identifier,
        context_arg: &Identifier,
        method: &Identifier,
        node_arg: &Identifier,
    ) -> Stmt {
        let target = match target {
            AssignTarget::Discard => Expr::discard(),
            AssignTarget::Binding(name) => Expr::ident(name),
        };
        let rule_instance =
            Expr::ident(rule).call(vec![Argument::labeled(context_arg, Expr::ident(context_arg))]);
        let value = rule_instance
            .dot(method)
            .call(vec![Argument::unlabeled(Expr::ident(node_arg))]);
        Stmt::assign(target, value)
    }

    /// `return value`
    #[must_use]
    pub fn return_statement(&self, value: Expr) -> Stmt {
        Stmt::ret(value)
    }
}

/// Expression builder helpers.
impl Expr {
    /// Identifier reference.
    #[must_use]
    pub fn ident(name: &Identifier) -> Self {
        Self::Identifier(Token::ident(name))
    }

    /// The discard marker `_`.
    #[must_use]
    pub const fn discard() -> Self {
        Self::Discard(Token::wildcard())
    }

    /// `.name` with the base left implicit.
    #[must_use]
    pub fn implicit_member(name: &Identifier) -> Self {
        Self::MemberAccess {
            base: None,
            period: Token::punct(Punct::Period),
            name: Token::ident(name),
        }
    }

    /// Member access: `self.name`
    #[must_use]
    pub fn dot(self, name: &Identifier) -> Self {
        Self::MemberAccess {
            base: Some(Box::new(self)),
            period: Token::punct(Punct::Period),
            name: Token::ident(name),
        }
    }

    /// Function call. Separators between arguments are filled in.
    #[must_use]
    pub fn call(self, arguments: Vec<Argument>) -> Self {
        let last = arguments.len().saturating_sub(1);
        let arguments = arguments
            .into_iter()
            .enumerate()
            .map(|(i, mut arg)| {
                arg.trailing_comma = (i < last)
                    .then(|| Token::punct(Punct::Comma).with_trailing(Trivia::spaces(1)));
                arg
            })
            .collect();
        Self::Call {
            callee: Box::new(self),
            left_paren: Token::punct(Punct::LeftParen),
            arguments,
            right_paren: Token::punct(Punct::RightParen),
        }
    }
}

impl Argument {
    /// `label: value`
    #[must_use]
    pub fn labeled(label: &Identifier, value: Expr) -> Self {
        Self {
            label: Some((
                Token::ident(label),
                Token::punct(Punct::Colon).with_trailing(Trivia::spaces(1)),
            )),
            value,
            trailing_comma: None,
        }
    }

    /// `value`
    #[must_use]
    pub const fn unlabeled(value: Expr) -> Self {
        Self {
            label: None,
            value,
            trailing_comma: None,
        }
    }
}

/// Statement builder helpers. Statements carry no leading trivia until they
/// are placed in a body.
impl Stmt {
    /// `target = value`
    #[must_use]
    pub fn assign(target: Expr, value: Expr) -> Self {
        let mut target = target;
        target.last_token_mut().trailing = Trivia::spaces(1);
        Self::Assignment {
            target,
            equal: Token::punct(Punct::Equal).with_trailing(Trivia::spaces(1)),
            value,
        }
    }

    /// `var name = initializer`
    #[must_use]
    pub fn var_decl(name: &Identifier, initializer: Expr) -> Self {
        Self::VariableDecl {
            var_keyword: Token::keyword(Keyword::Var).with_trailing(Trivia::spaces(1)),
            name: Token::ident(name).with_trailing(Trivia::spaces(1)),
            equal: Token::punct(Punct::Equal).with_trailing(Trivia::spaces(1)),
            initializer,
        }
    }

    /// `return value`
    #[must_use]
    pub fn ret(value: Expr) -> Self {
        Self::Return {
            return_keyword: Token::keyword(Keyword::Return).with_trailing(Trivia::spaces(1)),
            value,
        }
    }
}

impl Expr {
    fn last_token_mut(&mut self) -> &mut Token {
        match self {
            Self::Identifier(token) | Self::Discard(token) => token,
            Self::MemberAccess { name, .. } => name,
            Self::Call { right_paren, .. } => right_paren,
        }
    }
}
