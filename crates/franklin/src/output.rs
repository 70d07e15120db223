//! Styled status lines for the `franklin` CLI.

use console::{Style, Term};

/// Status printer.
///
/// Everything goes to stderr; stdout is reserved for converted HTML.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Plain status line.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Completed step, green.
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    /// Render warnings, one yellow line each, followed by a count.
    pub(crate) fn warnings(&self, warnings: &[String]) {
        if warnings.is_empty() {
            return;
        }
        for warning in warnings {
            self.line(&self.yellow.apply_to(format!("Warning: {warning}")).to_string());
        }
        self.line(&self.yellow.apply_to(warning_summary(warnings.len())).to_string());
    }

    /// Fatal error, red.
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

fn warning_summary(count: usize) -> String {
    let noun = if count == 1 { "warning" } else { "warnings" };
    format!("Converted with {count} {noun}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_warning_summary() {
        assert_eq!(warning_summary(1), "Converted with 1 warning");
        assert_eq!(warning_summary(3), "Converted with 3 warnings");
    }
}
