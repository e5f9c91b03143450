//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Content goes to stdout; status messages go to stderr.
pub(crate) struct Output {
    out: Term,
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Print a content line.
    pub(crate) fn line(&self, msg: &str) {
        let _ = self.out.write_line(msg);
    }

    /// Print a content line with a dimmed suffix.
    pub(crate) fn line_with_note(&self, msg: &str, note: &str) {
        let _ = self
            .out
            .write_line(&format!("{msg}  {}", self.dim.apply_to(note)));
    }

    /// Print a section heading (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        let _ = self.out.write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print an error in place of content (red, on stdout).
    pub(crate) fn notice(&self, msg: &str) {
        let _ = self.out.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a separator line.
    pub(crate) fn separator(&self) {
        let _ = self.out.write_line(&"=".repeat(70));
    }
}
