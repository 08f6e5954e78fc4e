//! Serializer: syntax tree to source text.
//!
//! Rendering is an in-order walk over tokens, emitting each token's leading
//! trivia, text and trailing trivia. No whitespace is invented here; the
//! output is exactly what the tree carries.

use crate::syntax::{Decl, SourceFile, Syntax};
use crate::Result;
use std::io::Write;

/// Render any node to text.
#[must_use]
pub fn render<S: Syntax + ?Sized>(node: &S) -> String {
    let mut out = String::new();
    node.walk_tokens(&mut |token| token.write_to(&mut out));
    out
}

/// Render a complete file to text.
#[must_use]
pub fn generate(file: &SourceFile) -> String {
    render(file)
}

/// Stream a file to `sink`, one write per top-level declaration.
///
/// Each declaration is rendered in full before it is written, so a sink
/// failure never leaves half a declaration interleaved with another. The
/// first failure aborts; nothing already written is rolled back.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`crate::GenError::Io`] if the sink rejects a write.
pub fn write_source<W: Write + ?Sized>(file: &SourceFile, sink: &mut W) -> Result<usize> {
    let mut written = 0;
    for decl in &file.declarations {
        let text = render(decl);
        sink.write_all(text.as_bytes())?;
        tracing::trace!(kind = decl_kind(decl), bytes = text.len(), "wrote declaration");
        written += text.len();
    }
    let tail = render(&file.end_of_file);
    sink.write_all(tail.as_bytes())?;
    sink.flush()?;
    Ok(written + tail.len())
}

const fn decl_kind(decl: &Decl) -> &'static str {
    match decl {
        Decl::Import(_) => "import",
        Decl::Function(_) => "function",
        Decl::Extension(_) => "extension",
    }
}
