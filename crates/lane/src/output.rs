//! Terminal output for the CLI.
//!
//! Everything goes to stderr so stdout stays pipeable.

use console::{Style, Term};

/// Styled stderr writer shared by the commands.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Plain line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Green line for a completed action.
    pub(crate) fn success(&self, msg: &str) {
        self.styled(&Style::new().green(), msg);
    }

    /// Yellow line for something worth a second look.
    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&Style::new().yellow(), msg);
    }

    /// Red line for a failure.
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&Style::new().red(), msg);
    }
}
