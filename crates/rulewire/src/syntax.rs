//! Syntax node model for generated pipeline declarations.
//!
//! # Design Principles
//!
//! 1. **Shape Safety**: every node kind is a typed struct or enum variant, so a
//!    tree assembled from these types always renders to well-formed source
//! 2. **Explicit Trivia**: whitespace and comments are data on tokens, never
//!    implicit formatter state
//! 3. **Determinism**: the same tree always renders to the same bytes
//!
//! Nodes own their children. Nothing is shared and nothing points back up the
//! tree, so a node is a plain value: "modifying" one means consuming it and
//! returning a new value (see [`Syntax::with_leading_trivia`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of non-semantic source text attached to a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriviaPiece {
    /// `n` line feeds
    Newlines(usize),
    /// `n` spaces
    Spaces(usize),
    /// A `//` comment; the text includes the leading slashes
    LineComment(String),
}

impl TriviaPiece {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Newlines(n) => out.extend(std::iter::repeat('\n').take(*n)),
            Self::Spaces(n) => out.extend(std::iter::repeat(' ').take(*n)),
            Self::LineComment(text) => out.push_str(text),
        }
    }
}

/// An ordered run of trivia pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trivia(Vec<TriviaPiece>);

impl Trivia {
    /// Empty trivia.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// `n` newlines.
    #[must_use]
    pub fn newlines(n: usize) -> Self {
        Self::new().newline(n)
    }

    /// `n` spaces.
    #[must_use]
    pub fn spaces(n: usize) -> Self {
        Self::new().space(n)
    }

    /// Newlines followed by indentation, the usual leading trivia of a line.
    #[must_use]
    pub fn line(newlines: usize, indent: usize) -> Self {
        Self::new().newline(newlines).space(indent)
    }

    /// Append newlines. Zero counts are dropped.
    #[must_use]
    pub fn newline(self, n: usize) -> Self {
        if n == 0 {
            return self;
        }
        self.piece(TriviaPiece::Newlines(n))
    }

    /// Append spaces. Zero counts are dropped.
    #[must_use]
    pub fn space(self, n: usize) -> Self {
        if n == 0 {
            return self;
        }
        self.piece(TriviaPiece::Spaces(n))
    }

    /// Append a line comment.
    #[must_use]
    pub fn line_comment(self, text: impl Into<String>) -> Self {
        self.piece(TriviaPiece::LineComment(text.into()))
    }

    /// Append an arbitrary piece.
    #[must_use]
    pub fn piece(mut self, piece: TriviaPiece) -> Self {
        self.0.push(piece);
        self
    }

    /// Append the rendered trivia to `out`.
    pub fn write_to(&self, out: &mut String) {
        for piece in &self.0 {
            piece.write_to(out);
        }
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

/// A validated identifier in the generated language.
///
/// Identifiers are validated at construction time to ensure they:
/// - Are not empty and are not the bare wildcard `_`
/// - Are not reserved words
/// - Contain only ASCII letters, digits and underscores
/// - Don't start with a digit
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Keywords that cannot be used as bare identifiers.
    pub const RESERVED_WORDS: &'static [&'static str] = &[
        "associatedtype",
        "class",
        "deinit",
        "enum",
        "extension",
        "fileprivate",
        "func",
        "import",
        "init",
        "inout",
        "internal",
        "let",
        "open",
        "operator",
        "precedencegroup",
        "private",
        "protocol",
        "public",
        "rethrows",
        "static",
        "struct",
        "subscript",
        "typealias",
        "var",
        "break",
        "case",
        "catch",
        "continue",
        "default",
        "defer",
        "do",
        "else",
        "fallthrough",
        "for",
        "guard",
        "if",
        "in",
        "repeat",
        "return",
        "throw",
        "switch",
        "where",
        "while",
        "Any",
        "as",
        "await",
        "false",
        "is",
        "nil",
        "self",
        "Self",
        "super",
        "throws",
        "true",
        "try",
        "any",
        "some",
        "Type",
        "Protocol",
        "associativity",
        "async",
        "actor",
        "macro",
        "nonisolated",
    ];

    /// Create a new identifier, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty, the wildcard, a reserved
    /// word, starts with a digit or contains invalid characters.
    pub fn new(name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();

        let reason = if name.is_empty() {
            Some("identifier cannot be empty".to_string())
        } else if name == "_" {
            Some("'_' is the discard marker".to_string())
        } else if name.starts_with(|c: char| c.is_ascii_digit()) {
            Some("identifier cannot start with a digit".to_string())
        } else if let Some(c) = name.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
            Some(format!("invalid character '{c}'"))
        } else if Self::RESERVED_WORDS.contains(&name.as_str()) {
            Some("reserved word".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(crate::GenError::InvalidIdentifier { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// Create an identifier without validation, for names fixed in source.
    ///
    /// This bypasses validation; only use it for literals known to be valid.
    #[must_use]
    pub fn new_unchecked(name: &'static str) -> Self {
        Self(name.to_string())
    }

    /// Get the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = crate::GenError;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keywords the generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// `import`
    Import,
    /// `extension`
    Extension,
    /// `func`
    Func,
    /// `var`
    Var,
    /// `return`
    Return,
}

impl Keyword {
    /// Source text of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Extension => "extension",
            Self::Func => "func",
            Self::Var => "var",
            Self::Return => "return",
        }
    }
}

/// Punctuation the generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Punct {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `->`
    Arrow,
    /// `=`
    Equal,
    /// `.`
    Period,
}

impl Punct {
    /// Source text of the punctuation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Arrow => "->",
            Self::Equal => "=",
            Self::Period => ".",
        }
    }
}

/// What a token is, independent of its trivia.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Keyword
    Keyword(Keyword),
    /// Identifier or type name
    Identifier(Identifier),
    /// `_`, used both as the discard marker and as an omitted argument label
    Wildcard,
    /// Punctuation
    Punct(Punct),
    /// Zero-width token that carries the file's trailing trivia
    EndOfFile,
}

/// A leaf of the tree: one piece of source text plus its trivia.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Trivia rendered before the text
    pub leading: Trivia,
    /// Trivia rendered after the text
    pub trailing: Trivia,
}

impl Token {
    /// A token with no trivia.
    #[must_use]
    pub const fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            leading: Trivia::new(),
            trailing: Trivia::new(),
        }
    }

    /// Keyword token.
    #[must_use]
    pub const fn keyword(keyword: Keyword) -> Self {
        Self::new(TokenKind::Keyword(keyword))
    }

    /// Identifier token.
    #[must_use]
    pub fn ident(name: &Identifier) -> Self {
        Self::new(TokenKind::Identifier(name.clone()))
    }

    /// Punctuation token.
    #[must_use]
    pub const fn punct(punct: Punct) -> Self {
        Self::new(TokenKind::Punct(punct))
    }

    /// `_` token.
    #[must_use]
    pub const fn wildcard() -> Self {
        Self::new(TokenKind::Wildcard)
    }

    /// End-of-file token.
    #[must_use]
    pub const fn end_of_file() -> Self {
        Self::new(TokenKind::EndOfFile)
    }

    /// Replace the leading trivia.
    #[must_use]
    pub fn with_leading(mut self, trivia: Trivia) -> Self {
        self.leading = trivia;
        self
    }

    /// Replace the trailing trivia.
    #[must_use]
    pub fn with_trailing(mut self, trivia: Trivia) -> Self {
        self.trailing = trivia;
        self
    }

    /// The token's own text, without trivia.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.kind {
            TokenKind::Keyword(k) => k.as_str(),
            TokenKind::Identifier(id) => id.as_str(),
            TokenKind::Wildcard => "_",
            TokenKind::Punct(p) => p.as_str(),
            TokenKind::EndOfFile => "",
        }
    }

    /// Append leading trivia, text and trailing trivia to `out`.
    pub fn write_to(&self, out: &mut String) {
        self.leading.write_to(out);
        out.push_str(self.text());
        self.trailing.write_to(out);
    }
}

/// Behaviour shared by every node: in-order token traversal.
pub trait Syntax {
    /// Visit every token in source order.
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token));

    /// The first token in source order.
    fn first_token_mut(&mut self) -> &mut Token;

    /// Replace the leading trivia of the first token.
    fn with_leading_trivia(mut self, trivia: Trivia) -> Self
    where
        Self: Sized,
    {
        self.first_token_mut().leading = trivia;
        self
    }
}

/// `import Module`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// `import`
    pub import_keyword: Token,
    /// Module name
    pub path: Token,
}

/// `_ node: NodeType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// External label (`_` for unlabeled)
    pub first_name: Token,
    /// Local name
    pub second_name: Token,
    /// `:`
    pub colon: Token,
    /// Parameter type
    pub ty: Token,
}

/// `func name(param) -> Return { body }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// `func`
    pub func_keyword: Token,
    /// Function name
    pub name: Token,
    /// `(`
    pub left_paren: Token,
    /// The single parameter
    pub parameter: Parameter,
    /// `)`
    pub right_paren: Token,
    /// `->`
    pub arrow: Token,
    /// Return type
    pub return_type: Token,
    /// Body
    pub body: CodeBlock,
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// `{`
    pub left_brace: Token,
    /// Statements in order
    pub statements: Vec<Stmt>,
    /// `}`
    pub right_brace: Token,
}

/// `{ members }` of an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBlock {
    /// `{`
    pub left_brace: Token,
    /// Member functions in order
    pub members: Vec<FunctionDecl>,
    /// `}`
    pub right_brace: Token,
}

/// `extension Type { members }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDecl {
    /// `extension`
    pub extension_keyword: Token,
    /// Extended type name
    pub extended_type: Token,
    /// Member block
    pub members: MemberBlock,
}

/// Statements that can appear in a function body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// `target = value`
    Assignment {
        /// Assigned expression or discard marker
        target: Expr,
        /// `=`
        equal: Token,
        /// Assigned value
        value: Expr,
    },
    /// `var name = initializer`
    VariableDecl {
        /// `var`
        var_keyword: Token,
        /// Bound name
        name: Token,
        /// `=`
        equal: Token,
        /// Initial value
        initializer: Expr,
    },
    /// `return value`
    Return {
        /// `return`
        return_keyword: Token,
        /// Returned expression
        value: Expr,
    },
}

/// Expressions that can appear in statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Bare name reference
    Identifier(Token),
    /// `base.name`, or `.name` with an implicit base
    MemberAccess {
        /// Explicit base, if any
        base: Option<Box<Expr>>,
        /// `.`
        period: Token,
        /// Member name
        name: Token,
    },
    /// `callee(arguments)`
    Call {
        /// Called expression
        callee: Box<Expr>,
        /// `(`
        left_paren: Token,
        /// Arguments in order
        arguments: Vec<Argument>,
        /// `)`
        right_paren: Token,
    },
    /// `_`, a value that is intentionally unused
    Discard(Token),
}

/// One call argument: `label: value` or `value`, plus its separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Label and its colon
    pub label: Option<(Token, Token)>,
    /// Argument value
    pub value: Expr,
    /// `,` when another argument follows
    pub trailing_comma: Option<Token>,
}

/// Top-level declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decl {
    /// Import
    Import(ImportDecl),
    /// Free function
    Function(FunctionDecl),
    /// Extension block
    Extension(ExtensionDecl),
}

/// An ordered sequence of top-level declarations plus the end-of-file token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Declarations in output order
    pub declarations: Vec<Decl>,
    /// Carries trailing whitespace of the file
    pub end_of_file: Token,
}

impl Syntax for Token {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        visit(self);
    }

    fn first_token_mut(&mut self) -> &mut Token {
        self
    }
}

impl Syntax for ImportDecl {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        visit(&self.import_keyword);
        visit(&self.path);
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.import_keyword
    }
}

impl Syntax for Parameter {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        visit(&self.first_name);
        visit(&self.second_name);
        visit(&self.colon);
        visit(&self.ty);
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.first_name
    }
}

impl Syntax for FunctionDecl {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        visit(&self.func_keyword);
        visit(&self.name);
        visit(&self.left_paren);
        self.parameter.walk_tokens(visit);
        visit(&self.right_paren);
        visit(&self.arrow);
        visit(&self.return_type);
        self.body.walk_tokens(visit);
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.func_keyword
    }
}

impl Syntax for CodeBlock {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        visit(&self.left_brace);
        for stmt in &self.statements {
            stmt.walk_tokens(visit);
        }
        visit(&self.right_brace);
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.left_brace
    }
}

impl Syntax for MemberBlock {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        visit(&self.left_brace);
        for member in &self.members {
            member.walk_tokens(visit);
        }
        visit(&self.right_brace);
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.left_brace
    }
}

impl Syntax for ExtensionDecl {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        visit(&self.extension_keyword);
        visit(&self.extended_type);
        self.members.walk_tokens(visit);
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.extension_keyword
    }
}

impl Syntax for Stmt {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        match self {
            Self::Assignment {
                target,
                equal,
                value,
            } => {
                target.walk_tokens(visit);
                visit(equal);
                value.walk_tokens(visit);
            }
            Self::VariableDecl {
                var_keyword,
                name,
                equal,
                initializer,
            } => {
                visit(var_keyword);
                visit(name);
                visit(equal);
                initializer.walk_tokens(visit);
            }
            Self::Return {
                return_keyword,
                value,
            } => {
                visit(return_keyword);
                value.walk_tokens(visit);
            }
        }
    }

    fn first_token_mut(&mut self) -> &mut Token {
        match self {
            Self::Assignment { target, .. } => target.first_token_mut(),
            Self::VariableDecl { var_keyword, .. } => var_keyword,
            Self::Return { return_keyword, .. } => return_keyword,
        }
    }
}

impl Syntax for Expr {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        match self {
            Self::Identifier(token) | Self::Discard(token) => visit(token),
            Self::MemberAccess { base, period, name } => {
                if let Some(base) = base {
                    base.walk_tokens(visit);
                }
                visit(period);
                visit(name);
            }
            Self::Call {
                callee,
                left_paren,
                arguments,
                right_paren,
            } => {
                callee.walk_tokens(visit);
                visit(left_paren);
                for arg in arguments {
                    arg.walk_tokens(visit);
                }
                visit(right_paren);
            }
        }
    }

    fn first_token_mut(&mut self) -> &mut Token {
        match self {
            Self::Identifier(token) | Self::Discard(token) => token,
            Self::MemberAccess {
                base: Some(base), ..
            } => base.first_token_mut(),
            Self::MemberAccess { period, .. } => period,
            Self::Call { callee, .. } => callee.first_token_mut(),
        }
    }
}

impl Syntax for Argument {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        if let Some((label, colon)) = &self.label {
            visit(label);
            visit(colon);
        }
        self.value.walk_tokens(visit);
        if let Some(comma) = &self.trailing_comma {
            visit(comma);
        }
    }

    fn first_token_mut(&mut self) -> &mut Token {
        match &mut self.label {
            Some((label, _)) => label,
            None => self.value.first_token_mut(),
        }
    }
}

impl Syntax for Decl {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        match self {
            Self::Import(d) => d.walk_tokens(visit),
            Self::Function(d) => d.walk_tokens(visit),
            Self::Extension(d) => d.walk_tokens(visit),
        }
    }

    fn first_token_mut(&mut self) -> &mut Token {
        match self {
            Self::Import(d) => d.first_token_mut(),
            Self::Function(d) => d.first_token_mut(),
            Self::Extension(d) => d.first_token_mut(),
        }
    }
}

impl Syntax for SourceFile {
    fn walk_tokens<'a>(&'a self, visit: &mut dyn FnMut(&'a Token)) {
        for decl in &self.declarations {
            decl.walk_tokens(visit);
        }
        visit(&self.end_of_file);
    }

    fn first_token_mut(&mut self) -> &mut Token {
        match self.declarations.first_mut() {
            Some(decl) => decl.first_token_mut(),
            None => &mut self.end_of_file,
        }
    }
}

impl FunctionDecl {
    /// The function's name.
    #[must_use]
    pub fn name_text(&self) -> &str {
        self.name.text()
    }

    /// The declared parameter type.
    #[must_use]
    pub fn parameter_type(&self) -> &str {
        self.parameter.ty.text()
    }
}

impl ExtensionDecl {
    /// The member functions in order.
    #[must_use]
    pub fn functions(&self) -> &[FunctionDecl] {
        &self.members.members
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn collect_tokens<S: Syntax>(node: &S) -> Vec<&Token> {
        let mut tokens = Vec::new();
        node.walk_tokens(&mut |t| tokens.push(t));
        tokens
    }

    #[test]
    fn identifier_valid() {
        assert!(Identifier::new("node").is_ok());
        assert!(Identifier::new("_context").is_ok());
        assert!(Identifier::new("ForStmtSyntax").is_ok());
        assert!(Identifier::new("Rule2").is_ok());
    }

    #[test]
    fn identifier_invalid_reserved() {
        let err = Identifier::new("func").unwrap_err();
        assert!(err.to_string().contains("reserved word"));
    }

    #[test]
    fn identifier_rejects_contextual_keywords() {
        for word in ["some", "any", "precedencegroup", "Type", "Protocol"] {
            let err = Identifier::new(word).unwrap_err();
            assert!(err.to_string().contains("reserved word"), "{word} accepted");
        }
    }

    #[test]
    fn identifier_invalid_starts_digit() {
        let err = Identifier::new("2Rule").unwrap_err();
        assert!(err.to_string().contains("cannot start with a digit"));
    }

    #[test]
    fn identifier_invalid_empty() {
        let err = Identifier::new("").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn identifier_rejects_wildcard() {
        let err = Identifier::new("_").unwrap_err();
        assert!(err.to_string().contains("discard"));
    }

    #[test]
    fn identifier_invalid_chars() {
        let err = Identifier::new("Rule-A").unwrap_err();
        assert!(err.to_string().contains("invalid character '-'"));
    }

    #[test]
    fn identifier_orders_by_bytes() {
        let mut names: Vec<_> = ["b", "B", "a", "A"]
            .into_iter()
            .map(|n| Identifier::new(n).unwrap())
            .collect();
        names.sort();
        let names: Vec<_> = names.iter().map(Identifier::as_str).collect();
        assert_eq!(names, ["A", "B", "a", "b"]);
    }

    #[test]
    fn identifier_deserialize_validates() {
        let ok: Identifier = serde_json::from_str("\"RuleA\"").unwrap();
        assert_eq!(ok.as_str(), "RuleA");
        assert!(serde_json::from_str::<Identifier>("\"return\"").is_err());
    }

    #[test]
    fn trivia_drops_zero_counts() {
        assert_eq!(Trivia::line(0, 0), Trivia::new());
        assert_eq!(Trivia::line(1, 4).to_string(), "\n    ");
    }

    #[test]
    fn trivia_renders_pieces_in_order() {
        let trivia = Trivia::new()
            .line_comment("// header")
            .newline(2)
            .space(2);
        assert_eq!(trivia.to_string(), "// header\n\n  ");
    }

    #[test]
    fn token_write_includes_trivia() {
        let token = Token::keyword(Keyword::Return)
            .with_leading(Trivia::line(1, 4))
            .with_trailing(Trivia::spaces(1));
        let mut out = String::new();
        token.write_to(&mut out);
        assert_eq!(out, "\n    return ");
    }

    #[test]
    fn expr_first_token_follows_base() {
        let base = Expr::Identifier(Token::ident(&Identifier::new_unchecked("Rule")));
        let expr = Expr::MemberAccess {
            base: Some(Box::new(base)),
            period: Token::punct(Punct::Period),
            name: Token::ident(&Identifier::new_unchecked("visit")),
        };
        let expr = expr.with_leading_trivia(Trivia::spaces(4));
        let tokens = collect_tokens(&expr);
        assert_eq!(tokens[0].text(), "Rule");
        assert_eq!(tokens[0].leading, Trivia::spaces(4));
        assert_eq!(tokens[1].leading, Trivia::new());
    }

    #[test]
    fn implicit_member_access_starts_at_period() {
        let mut expr = Expr::MemberAccess {
            base: None,
            period: Token::punct(Punct::Period),
            name: Token::ident(&Identifier::new_unchecked("visitChildren")),
        };
        assert_eq!(expr.first_token_mut().text(), ".");
    }

    #[test]
    fn keyword_and_punct_text() {
        assert_eq!(Keyword::Extension.as_str(), "extension");
        assert_eq!(Punct::Arrow.as_str(), "->");
        assert_eq!(Token::wildcard().text(), "_");
        assert_eq!(Token::end_of_file().text(), "");
    }
}
