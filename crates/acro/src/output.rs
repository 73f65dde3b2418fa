//! Diagnostics for the `acro` binary.
//!
//! Every message goes to stderr; stdout carries only the translated
//! document or the listing.

use console::{Style, Term};

/// Styled diagnostic writer bound to stderr.
pub(crate) struct Output {
    stderr: Term,
    warning_style: Style,
    error_style: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            warning_style: Style::new().yellow().bold(),
            error_style: Style::new().red().bold(),
        }
    }

    /// Report a condition that does not stop the run.
    pub(crate) fn warning(&self, msg: &str) {
        self.emit(&self.warning_style, "warning", msg);
    }

    /// Report the error that ended the run.
    pub(crate) fn error(&self, msg: &str) {
        self.emit(&self.error_style, "error", msg);
    }

    fn emit(&self, style: &Style, label: &str, msg: &str) {
        // A closed stderr must not replace the exit status.
        let _ = self
            .stderr
            .write_line(&format!("{}: {msg}", style.apply_to(label)));
    }
}
