//! Test reporting infrastructure.
//!
//! The trait is based on the "template method" pattern: implement the hooks
//! you care about and leave the rest as no-ops. The runner drives every
//! hook; [`ConsoleReporter`] is the default line-oriented implementation and
//! [`NullReporter`] silences a run entirely.

use std::time::Duration;

use console::{style, Term};

pub trait Reporter {
    /// Called when a test case starts executing.
    fn test_started(&self, _name: &str) {}

    /// Called when a test case finishes without new failures.
    fn test_passed(&self, _name: &str, _elapsed: Duration) {}

    /// Called when a test case finishes with at least one failure.
    fn test_failed(&self, _name: &str, _elapsed: Duration) {}

    /// Called once per failed comparison, attributed to the call site.
    fn assertion_failed(&self, _file: &str, _line: u32, _message: &str) {}

    /// Informational notices (for example an explicitly empty filter).
    fn info(&self, _message: &str) {}

    /// Configuration and harness errors.
    fn error(&self, _message: &str) {}

    /// Called once at the end of a completed run.
    fn run_finished(&self, _ran: u32, _tests_failed: u32, _elapsed: Duration) {}
}

/// Writes styled, line-oriented output: progress and the run summary to
/// stdout, diagnostics and errors to stderr.
pub struct ConsoleReporter {
    stdout: Term,
    stderr: Term,
}

impl ConsoleReporter {
    pub fn new() -> ConsoleReporter {
        ConsoleReporter {
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> ConsoleReporter {
        ConsoleReporter::new()
    }
}

impl Reporter for ConsoleReporter {
    fn test_started(&self, name: &str) {
        write(&self.stdout, style(format!("Testing {name}")).green());
    }

    fn test_passed(&self, name: &str, elapsed: Duration) {
        let ms = elapsed.as_millis();
        write(&self.stdout, style(format!("PASSED  {name} ({ms}ms)")).green());
    }

    fn test_failed(&self, name: &str, elapsed: Duration) {
        let ms = elapsed.as_millis();
        write(&self.stdout, style(format!("FAILED  {name} ({ms}ms)")).red());
    }

    fn assertion_failed(&self, file: &str, line: u32, message: &str) {
        write(
            &self.stderr,
            style(format!("Test failed: {file}({line}): {message}")).red(),
        );
    }

    fn info(&self, message: &str) {
        write(&self.stderr, style(message));
    }

    fn error(&self, message: &str) {
        write(&self.stderr, style(message).red());
    }

    fn run_finished(&self, ran: u32, tests_failed: u32, elapsed: Duration) {
        let ms = elapsed.as_millis();
        let line = if tests_failed > 0 {
            style(format!("Ran {ran} tests and {tests_failed} failed ({ms}ms)")).red()
        } else {
            style(format!("Ran {ran} tests and none failed ({ms}ms)")).green()
        };
        write(&self.stdout, line);
    }
}

/// Discards everything. Useful when only the returned counts matter.
pub struct NullReporter;

impl Reporter for NullReporter {}

fn write(term: &Term, line: impl std::fmt::Display) {
    // Reporting is best-effort; a broken pipe must not fail the run.
    let _ = term.write_line(&line.to_string());
}
