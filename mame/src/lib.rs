//! # mame - a tiny self-registering unit-test harness
//!
//! mame is a minimal, synchronous unit-test harness: tests declare
//! themselves with `#[mame::test]`, [`harness()`] collects everything that
//! was declared, and [`Harness::run`] executes the selection with pass/fail
//! bookkeeping, per-test timing and styled line-oriented reporting.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mame::{check_eq, require_eq, TestContext, TestResult};
//!
//! fn times2(x: i32) -> i32 {
//!     x * 2
//! }
//!
//! #[mame::test]
//! fn doubling_works(t: &TestContext) -> TestResult {
//!     check_eq!(t, 4, times2(2));
//!     require_eq!(t, 6, times2(3));
//!     for i in 0..3 {
//!         require_eq!(t, i * 2, times2(i), " i = {i}");
//!     }
//!     Ok(())
//! }
//!
//! fn main() {
//!     let args: Vec<String> = std::env::args().skip(1).collect();
//!     let failed = mame::harness().run_simple(&args);
//!     std::process::exit(if failed > 0 { 1 } else { 0 });
//! }
//! ```
//!
//! ## Assertions
//!
//! Nine comparison kinds in two severities. The `check_*` macros record a
//! failure and let the test continue; the `require_*` macros record a
//! failure and end the current test body, resuming with the next test.
//! All of them accept optional trailing format arguments that are appended
//! to the diagnostic only when the comparison failed.
//!
//! ## Selecting tests
//!
//! [`Harness::run`] takes an already-tokenized argument list. The only
//! interpreted token is `--filter=`: `--filter=X` runs the tests whose name
//! contains `X`, `--filter=-X` runs everything except those. Filtering is a
//! plain substring match; at most one filter may be given.

// Re-export the attribute macro.
pub use mame_derive::test;

// Re-exported for the code generated by `#[mame::test]`.
pub use inventory;

// Re-export core functionality.
pub use mame_core::{
    check_eq, check_false, check_ge, check_gt, check_le, check_lt, check_ne, check_near,
    check_true, render, require_eq, require_false, require_ge, require_gt, require_le, require_lt,
    require_ne, require_near, require_true, Aborted, ConsoleReporter, Diagnostic, DuplicateName,
    FilterError, FilterSpec, Harness, NullReporter, Reporter, RunCounters, TestContext, TestResult,
};

/// A single `#[mame::test]` declaration, submitted to the process-wide
/// collection at static-initialization time.
pub struct TestRegistration {
    pub name: &'static str,
    pub test_fn: fn(&TestContext<'_>) -> TestResult,
}

inventory::collect!(TestRegistration);

/// Builds a [`Harness`] containing every test declared with
/// `#[mame::test]`, in registration order.
///
/// Registration happens before `main`, so the harness is complete no matter
/// where the declarations live. Duplicate names terminate the process here,
/// while the registry is assembled.
pub fn harness() -> Harness {
    let mut harness = Harness::new();
    let mut collected = 0usize;
    for test in inventory::iter::<TestRegistration> {
        harness.add_test(test.name, test.test_fn);
        collected += 1;
    }
    tracing::debug!("collected {collected} registered tests");
    harness
}
