//! The diagnostic message produced by a comparison.

use std::fmt::{self, Write as _};

/// Outcome of a single comparison: empty means the comparison passed,
/// populated means it failed and carries the failure text.
///
/// Extra context is attached with the chainable [`Diagnostic::append`]; the
/// assertion macros only call it on the failure path, so append expressions
/// cost nothing when the comparison passes.
#[derive(Debug, Default)]
pub struct Diagnostic {
    failed: bool,
    text: String,
}

impl Diagnostic {
    /// A passing outcome with no message.
    pub fn pass() -> Diagnostic {
        Diagnostic::default()
    }

    /// A failing outcome carrying the failure text.
    pub fn fail(text: String) -> Diagnostic {
        Diagnostic { failed: true, text }
    }

    pub fn is_pass(&self) -> bool {
        !self.failed
    }

    /// Appends ad-hoc context to the message.
    #[must_use]
    pub fn append(mut self, part: impl fmt::Display) -> Diagnostic {
        let _ = write!(self.text, "{part}");
        self
    }

    /// Hands the message out exactly once. The buffer is cleared so the same
    /// failure cannot be reported twice.
    pub fn take(&mut self) -> String {
        self.failed = false;
        std::mem::take(&mut self.text)
    }
}

#[cfg(test)]
mod test {
    use super::Diagnostic;

    #[test]
    fn pass_is_empty() {
        let mut diag = Diagnostic::pass();
        assert!(diag.is_pass());
        assert_eq!(diag.take(), "");
    }

    #[test]
    fn fail_carries_text_and_appends_chain() {
        let mut diag = Diagnostic::fail("left == right".into())
            .append(" i = ")
            .append(3);
        assert!(!diag.is_pass());
        assert_eq!(diag.take(), "left == right i = 3");
    }

    #[test]
    fn take_clears_the_message() {
        let mut diag = Diagnostic::fail("boom".into());
        assert_eq!(diag.take(), "boom");
        assert!(diag.is_pass());
        assert_eq!(diag.take(), "");
    }
}
