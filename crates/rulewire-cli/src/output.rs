//! Status messages on stderr
//!
//! Generated code may go to stdout, so everything human-facing is written
//! to stderr.

use console::{style, Term};

/// Prints status lines to stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        // Status lines are best effort; a closed stderr is not an error.
        self.term.write_line(&self.success_line(message)).ok();
    }

    /// Print a failure message, even in quiet mode
    pub fn failure(&self, message: &str) {
        self.term.write_line(&self.failure_line(message)).ok();
    }

    fn success_line(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        format!("{prefix} {message}")
    }

    fn failure_line(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        format!("{prefix} {message}")
    }
}
