//! mame's test runner: filter parsing, selection, execution and bookkeeping.

use std::{
    cell::Cell,
    time::Instant,
};

use tracing::debug;

use crate::{
    message::Diagnostic,
    registry::Registry,
    reporter::{ConsoleReporter, Reporter},
    self_test,
};

/// Signals that a hard assertion ended the current test body early.
///
/// The runner does not classify a test by this value; pass or fail is
/// decided solely by whether the failure counter grew during the body.
#[derive(thiserror::Error, Debug)]
#[error("test body aborted by a failed assertion")]
pub struct Aborted;

/// Return type of every test body.
pub type TestResult = Result<(), Aborted>;

/// Pass/fail bookkeeping for one run. Reset at the start of every
/// [`Harness::run`] call.
///
/// Interior mutability keeps the counters shareable between the runner and
/// the test bodies it invokes; the execution model is single-threaded by
/// design, so plain [`Cell`]s suffice.
#[derive(Debug, Default)]
pub struct RunCounters {
    failures: Cell<u32>,
    tests_failed: Cell<u32>,
    tests_ran: Cell<u32>,
}

impl RunCounters {
    /// Total failed comparisons; a single test may contribute several.
    pub fn failures(&self) -> u32 {
        self.failures.get()
    }

    /// Tests with at least one failed comparison.
    pub fn tests_failed(&self) -> u32 {
        self.tests_failed.get()
    }

    /// Tests actually executed, i.e. that passed the filter.
    pub fn tests_ran(&self) -> u32 {
        self.tests_ran.get()
    }

    pub(crate) fn record_failure(&self) {
        self.failures.set(self.failures.get() + 1);
    }

    fn reset(&self) {
        self.failures.set(0);
        self.tests_failed.set(0);
        self.tests_ran.set(0);
    }
}

/// Handed to every test body; the assertion macros record failures and emit
/// diagnostics through it.
pub struct TestContext<'a> {
    counters: &'a RunCounters,
    reporter: &'a dyn Reporter,
}

impl<'a> TestContext<'a> {
    pub(crate) fn new(counters: &'a RunCounters, reporter: &'a dyn Reporter) -> TestContext<'a> {
        TestContext { counters, reporter }
    }

    pub(crate) fn record_failure(&self) {
        self.counters.record_failure();
    }

    /// Emits a failed comparison, attributed to the macro call site. A
    /// single trailing newline is stripped from the message.
    pub fn report(&self, file: &str, line: u32, mut diag: Diagnostic) {
        let mut message = diag.take();
        if message.ends_with('\n') {
            message.pop();
        }
        self.reporter.assertion_failed(file, line, &message);
    }
}

const FILTER_PREFIX: &str = "--filter=";

/// Which registered tests a run should execute, derived once per run from
/// the argument list. At most one of the two sides is ever set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    include: Option<String>,
    exclude: Option<String>,
}

impl FilterSpec {
    /// Whether a test with this name should run.
    pub fn selects(&self, name: &str) -> bool {
        if let Some(exclude) = &self.exclude {
            if name.contains(exclude.as_str()) {
                return false;
            }
        }
        if let Some(include) = &self.include {
            return name.contains(include.as_str());
        }
        true
    }

    fn is_set(&self) -> bool {
        self.include.is_some() || self.exclude.is_some()
    }
}

/// Invalid filter configurations. No tests run when one of these occurs;
/// the variants map to the distinct `failed` codes of the run contract.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("more than one instance of \"--filter=\", terminating")]
    MultipleFilters,
    #[error("\"--filter=-\" specified without a filter, terminating")]
    EmptyExclusion,
}

impl FilterError {
    fn failure_code(&self) -> u32 {
        match self {
            FilterError::MultipleFilters => 1,
            FilterError::EmptyExclusion => 2,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ParsedArgs {
    Filter(FilterSpec),
    /// `--filter=` with no value: informational, nothing to do.
    NothingToDo,
}

/// Scans the argument list for `--filter=` directives. Every other token is
/// ignored. An empty inclusion stops the scan benignly, so tokens after it
/// are never inspected.
fn parse_args<I, S>(args: I) -> Result<ParsedArgs, FilterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut spec = FilterSpec::default();
    for arg in args {
        let arg = arg.as_ref();
        let Some(value) = arg.strip_prefix(FILTER_PREFIX) else {
            debug!("ignoring argument {arg:?}");
            continue;
        };
        if spec.is_set() {
            return Err(FilterError::MultipleFilters);
        }
        if value.is_empty() {
            return Ok(ParsedArgs::NothingToDo);
        }
        if value == "-" {
            return Err(FilterError::EmptyExclusion);
        }
        match value.strip_prefix('-') {
            Some(exclude) => spec.exclude = Some(exclude.to_owned()),
            None => spec.include = Some(value.to_owned()),
        }
    }
    Ok(ParsedArgs::Filter(spec))
}

/// Owns the registry, the counters and the reporter for one independent
/// test universe. `#[mame::test]` declarations end up in the harness built
/// by `mame::harness()`; explicit [`Harness::add_test`] calls build isolated
/// instances, which is how the harness tests itself.
pub struct Harness {
    registry: Registry,
    counters: RunCounters,
    reporter: Box<dyn Reporter>,
}

impl Default for Harness {
    fn default() -> Harness {
        Harness::new()
    }
}

impl Harness {
    pub fn new() -> Harness {
        Harness::with_reporter(ConsoleReporter::new())
    }

    pub fn with_reporter(reporter: impl Reporter + 'static) -> Harness {
        Harness {
            registry: Registry::default(),
            counters: RunCounters::default(),
            reporter: Box::new(reporter),
        }
    }

    /// Registers a test case under a unique name.
    ///
    /// Registering the same name twice is a load-time programming error,
    /// not a recoverable runtime condition: the process terminates.
    pub fn add_test(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(&TestContext<'_>) -> TestResult + 'static,
    ) {
        let name = name.into();
        debug!("registering test {name:?}");
        if let Err(duplicate) = self.registry.insert(name, body) {
            self.reporter.error(&duplicate.to_string());
            std::process::exit(1);
        }
    }

    /// Runs the registered tests selected by `args`.
    ///
    /// Returns `(ran, failed)`: the number of tests executed and the number
    /// of failed comparisons. `ran == -1` signals an invalid argument
    /// configuration, distinct from `ran == 0` ("zero tests executed, no
    /// error"). The built-in self test always runs first; if it fails, the
    /// harness itself is broken and the run stops before any user test.
    pub fn run<I, S>(&self, args: I) -> (i32, u32)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.counters.reset();

        self.run_test(self_test::SELF_TEST_NAME, &self_test::self_test);
        if self.counters.failures() > 0 {
            self.reporter.error("self test failed, aborting the run");
            return (self.counters.tests_ran() as i32, self.counters.failures());
        }

        let spec = match parse_args(args) {
            Ok(ParsedArgs::Filter(spec)) => spec,
            Ok(ParsedArgs::NothingToDo) => {
                self.reporter
                    .info("\"--filter=\" specified without a filter, nothing to do");
                return (self.counters.tests_ran() as i32, self.counters.failures());
            }
            Err(e) => {
                self.reporter.error(&e.to_string());
                return (-1, e.failure_code());
            }
        };

        let start = Instant::now();
        for case in self.registry.iter() {
            if spec.selects(case.name()) {
                self.run_test(case.name(), case.body());
            } else {
                debug!("skipping test {:?}, filtered out", case.name());
            }
        }
        let elapsed = start.elapsed();

        self.reporter.run_finished(
            self.counters.tests_ran(),
            self.counters.tests_failed(),
            elapsed,
        );
        (self.counters.tests_ran() as i32, self.counters.failures())
    }

    /// Like [`Harness::run`] but returns only the failure count. Callers
    /// that need to distinguish configuration errors from failures must use
    /// the two-value form.
    pub fn run_simple<I, S>(&self, args: I) -> u32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (_, failed) = self.run(args);
        failed
    }

    /// The single-test execution path shared by the self test and every
    /// user test.
    fn run_test(&self, name: &str, body: &dyn Fn(&TestContext<'_>) -> TestResult) {
        self.counters.tests_ran.set(self.counters.tests_ran.get() + 1);
        let failures_before = self.counters.failures();
        self.reporter.test_started(name);

        let ctx = TestContext::new(&self.counters, self.reporter.as_ref());
        let start = Instant::now();
        // The returned value only signals an early exit; classification is
        // by counter growth.
        let _ = body(&ctx);
        let elapsed = start.elapsed();

        if self.counters.failures() > failures_before {
            self.counters
                .tests_failed
                .set(self.counters.tests_failed.get() + 1);
            self.reporter.test_failed(name, elapsed);
            debug!("{name} failed");
        } else {
            self.reporter.test_passed(name, elapsed);
            debug!("{name} ok");
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reporter::NullReporter;
    use crate::{check_eq, check_ne, check_true, require_eq, require_ne};

    /// Collects every assertion diagnostic the runner emits.
    #[derive(Default)]
    struct CaptureReporter {
        diagnostics: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl Reporter for Rc<CaptureReporter> {
        fn assertion_failed(&self, file: &str, line: u32, message: &str) {
            self.diagnostics
                .borrow_mut()
                .push(format!("{file}({line}): {message}"));
        }

        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    fn times2(x: i32) -> i32 {
        x * 2
    }

    /// The example registry: two healthy tests and one that always fails.
    fn example_harness() -> Harness {
        let mut harness = Harness::with_reporter(NullReporter);
        harness.add_test("testtimes2", |t: &TestContext| {
            check_eq!(t, 4, times2(2));
            require_eq!(t, 6, times2(3));
            for i in 0..3 {
                require_eq!(t, i * 2, times2(i), " i = {i}");
            }
            Ok(())
        });
        harness.add_test("testtimes2Wrong", |t: &TestContext| {
            require_ne!(t, 7, times2(3));
            check_ne!(t, 5, times2(2));
            for i in 1..3 {
                require_ne!(t, 0, times2(i), " i = {i}");
            }
            Ok(())
        });
        harness.add_test("ThisAlwaysFails", |t: &TestContext| {
            check_true!(t, false);
            Ok(())
        });
        harness
    }

    const NO_ARGS: [&str; 0] = [];

    #[test]
    fn full_run_counts_the_failing_test() {
        let harness = example_harness();
        // Self test plus three user tests, one failing comparison.
        assert_eq!(harness.run(NO_ARGS), (4, 1));
    }

    #[test]
    fn unrecognised_tokens_are_ignored() {
        let harness = example_harness();
        assert_eq!(harness.run(["p1", "p2"]), (4, 1));
        assert_eq!(harness.run(["abc"]), (4, 1));
        // No '=', so this is not a filter directive.
        assert_eq!(harness.run(["--filter"]), (4, 1));
    }

    #[test]
    fn exclusion_filter_skips_matching_tests() {
        let harness = example_harness();
        assert_eq!(harness.run(["--filter=-ThisAlwaysFails"]), (3, 0));
        assert_eq!(harness.run(["--filter=-Fails"]), (3, 0));
    }

    #[test]
    fn inclusion_filter_selects_by_substring() {
        let harness = example_harness();
        // Self test plus the one name containing the substring.
        assert_eq!(harness.run(["--filter=Wrong"]), (2, 0));
        assert_eq!(harness.run(["--filter=rong"]), (2, 0));
        // Nothing matches: only the self test runs.
        assert_eq!(harness.run(["--filter=abc"]), (1, 0));
    }

    #[test]
    fn multiple_filters_are_a_configuration_error() {
        let harness = example_harness();
        assert_eq!(harness.run(["--filter=abc", "--filter=def"]), (-1, 1));
        assert_eq!(harness.run(["--filter=abc", "--filter=-def"]), (-1, 1));
    }

    #[test]
    fn empty_exclusion_is_a_configuration_error() {
        let harness = example_harness();
        assert_eq!(harness.run(["--filter=-"]), (-1, 2));
    }

    #[test]
    fn empty_inclusion_is_benign() {
        let harness = example_harness();
        // Only the self test has run at that point.
        assert_eq!(harness.run(["--filter="]), (1, 0));
        // The benign early-out also hides later, otherwise invalid tokens.
        assert_eq!(harness.run(["--filter=", "--filter=-"]), (1, 0));
    }

    #[test]
    fn runs_are_idempotent() {
        let harness = example_harness();
        let first = harness.run(NO_ARGS);
        let second = harness.run(NO_ARGS);
        assert_eq!(first, second);
        assert_eq!(harness.run(["--filter=Wrong"]), harness.run(["--filter=Wrong"]));
    }

    #[test]
    fn soft_failure_continues_the_test_body() {
        let reached = Rc::new(Cell::new(false));
        let mut harness = Harness::with_reporter(NullReporter);
        {
            let reached = Rc::clone(&reached);
            harness.add_test("soft", move |t: &TestContext| {
                check_eq!(t, 1, 2);
                reached.set(true);
                Ok(())
            });
        }
        let (ran, failed) = harness.run(NO_ARGS);
        assert_eq!((ran, failed), (2, 1));
        assert!(reached.get(), "statements after a soft failure must run");
    }

    #[test]
    fn hard_failure_aborts_the_test_body_only() {
        let reached = Rc::new(Cell::new(false));
        let mut harness = Harness::with_reporter(NullReporter);
        {
            let reached = Rc::clone(&reached);
            harness.add_test("hard", move |t: &TestContext| {
                require_eq!(t, 1, 2);
                reached.set(true);
                Ok(())
            });
        }
        harness.add_test("after", |t: &TestContext| {
            check_eq!(t, 1, 1);
            Ok(())
        });

        let (ran, failed) = harness.run(NO_ARGS);
        // The aborted test still counts as ran, and the next test still runs.
        assert_eq!((ran, failed), (3, 1));
        assert!(!reached.get(), "statements after a hard failure must not run");
    }

    #[test]
    fn each_failed_comparison_counts_once() {
        let mut harness = Harness::with_reporter(NullReporter);
        harness.add_test("two_failures", |t: &TestContext| {
            check_eq!(t, 1, 2);
            check_eq!(t, 3, 4);
            Ok(())
        });
        let (ran, failed) = harness.run(NO_ARGS);
        assert_eq!((ran, failed), (2, 2));
    }

    #[test]
    fn diagnostics_carry_call_site_and_message() {
        let reporter = Rc::new(CaptureReporter::default());
        let mut harness = Harness::with_reporter(Rc::clone(&reporter));
        harness.add_test("diagnose", |t: &TestContext| {
            check_eq!(t, 4, times2(3), " while doubling 3");
            Ok(())
        });
        harness.run(NO_ARGS);

        let diagnostics = reporter.diagnostics.borrow();
        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics[0];
        assert!(diag.contains("runner.rs("), "missing call site: {diag}");
        assert!(diag.contains("4 == times2(3)"), "missing expressions: {diag}");
        assert!(diag.contains("Expected: 4"), "missing expected value: {diag}");
        assert!(diag.contains("Actual: 6"), "missing actual value: {diag}");
        assert!(diag.contains("while doubling 3"), "missing appended context: {diag}");
        assert!(!diag.ends_with('\n'), "trailing newline must be stripped");
    }

    #[test]
    fn configuration_errors_are_reported() {
        let reporter = Rc::new(CaptureReporter::default());
        let harness = Harness::with_reporter(Rc::clone(&reporter));
        harness.run(["--filter=a", "--filter=b"]);
        harness.run(["--filter=-"]);

        let errors = reporter.errors.borrow();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("More than one") || errors[0].contains("more than one"));
        assert!(errors[1].contains("--filter=-"));
    }

    #[test]
    fn parse_accepts_a_single_inclusion() {
        let parsed = parse_args(["--filter=abc"]).unwrap();
        let ParsedArgs::Filter(spec) = parsed else {
            panic!("expected a filter spec");
        };
        assert_eq!(spec.include.as_deref(), Some("abc"));
        assert_eq!(spec.exclude, None);
    }

    #[test]
    fn parse_accepts_a_single_exclusion() {
        let parsed = parse_args(["--filter=-abc"]).unwrap();
        let ParsedArgs::Filter(spec) = parsed else {
            panic!("expected a filter spec");
        };
        assert_eq!(spec.include, None);
        assert_eq!(spec.exclude.as_deref(), Some("abc"));
    }

    #[test]
    fn parse_flags_invalid_configurations() {
        assert_eq!(
            parse_args(["--filter=a", "--filter=b"]),
            Err(FilterError::MultipleFilters)
        );
        assert_eq!(
            parse_args(["--filter=-a", "--filter=b"]),
            Err(FilterError::MultipleFilters)
        );
        assert_eq!(parse_args(["--filter=-"]), Err(FilterError::EmptyExclusion));
        assert_eq!(parse_args(["--filter="]), Ok(ParsedArgs::NothingToDo));
    }

    #[test]
    fn selects_applies_exclusion_before_inclusion_default() {
        let all = FilterSpec::default();
        assert!(all.selects("anything"));

        let include = FilterSpec {
            include: Some("times2".into()),
            ..Default::default()
        };
        assert!(include.selects("testtimes2"));
        assert!(include.selects("testtimes2Wrong"));
        assert!(!include.selects("ThisAlwaysFails"));

        let exclude = FilterSpec {
            exclude: Some("Wrong".into()),
            ..Default::default()
        };
        assert!(exclude.selects("testtimes2"));
        assert!(!exclude.selects("testtimes2Wrong"));
    }
}
