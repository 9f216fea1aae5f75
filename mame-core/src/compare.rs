//! The comparison engine behind the assertion macros.
//!
//! Each entry point takes the already-evaluated predicate outcome plus the
//! source expression texts, and returns a [`Diagnostic`]: empty on a pass,
//! populated (and the run's failure counter bumped) on a mismatch. Values
//! are rendered lazily through closures so nothing is formatted on the
//! passing path.

use crate::{message::Diagnostic, runner::TestContext};

/// The comparison kinds the harness understands, with their textual form as
/// it appears in failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Op {
    #[strum(serialize = "is true")]
    IsTrue,
    #[strum(serialize = "is false")]
    IsFalse,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "<=")]
    Le,
}

/// Builds the outcome of a comparison.
///
/// On failure the message has the shape
/// `"\n<left expr> <op> <right expr>\nExpected: <left>\nActual: <right>\n"`
/// and the context's failure counter is incremented.
pub fn compare<L, R>(
    ctx: &TestContext<'_>,
    pass: bool,
    op: Op,
    render_left: L,
    render_right: R,
    left_expr: &str,
    right_expr: &str,
) -> Diagnostic
where
    L: FnOnce() -> String,
    R: FnOnce() -> String,
{
    if pass {
        return Diagnostic::pass();
    }
    ctx.record_failure();
    Diagnostic::fail(format!(
        "\n{left_expr} {op} {right_expr}\nExpected: {}\nActual: {}\n",
        render_left(),
        render_right(),
    ))
}

/// Nearness comparison for floating-point values.
///
/// Passes iff `|left - right| < tolerance`. The inequality is strict: a
/// difference exactly equal to the tolerance fails.
pub fn compare_near(
    ctx: &TestContext<'_>,
    left: f64,
    right: f64,
    tolerance: f64,
    left_expr: &str,
    right_expr: &str,
    tolerance_expr: &str,
) -> Diagnostic {
    let diff = (left - right).abs();
    if diff < tolerance {
        return Diagnostic::pass();
    }
    ctx.record_failure();
    Diagnostic::fail(format!(
        "\n{left_expr} == {right_expr} (+/-{tolerance_expr})\nExpected: {left}\nActual: {right}\n"
    ))
}

#[cfg(test)]
mod test {
    use super::{compare, compare_near, Op};
    use crate::{
        reporter::NullReporter,
        runner::{RunCounters, TestContext},
    };
    use test_case::test_case;

    #[test_case(Op::IsTrue => "is true")]
    #[test_case(Op::IsFalse => "is false")]
    #[test_case(Op::Eq => "==")]
    #[test_case(Op::Ne => "!=")]
    #[test_case(Op::Gt => ">")]
    #[test_case(Op::Lt => "<")]
    #[test_case(Op::Ge => ">=")]
    #[test_case(Op::Le => "<=")]
    fn op_display(op: Op) -> String {
        op.to_string()
    }

    #[test]
    fn passing_comparison_is_silent() {
        let counters = RunCounters::default();
        let ctx = TestContext::new(&counters, &NullReporter);
        let diag = compare(&ctx, true, Op::Eq, || unreachable!(), || unreachable!(), "a", "b");
        assert!(diag.is_pass());
        assert_eq!(counters.failures(), 0);
    }

    #[test]
    fn failing_comparison_counts_and_formats() {
        let counters = RunCounters::default();
        let ctx = TestContext::new(&counters, &NullReporter);
        let mut diag = compare(
            &ctx,
            false,
            Op::Eq,
            || "4".to_string(),
            || "5".to_string(),
            "4",
            "times2(2)",
        );
        assert!(!diag.is_pass());
        assert_eq!(counters.failures(), 1);
        assert_eq!(diag.take(), "\n4 == times2(2)\nExpected: 4\nActual: 5\n");
    }

    #[test]
    fn near_passes_strictly_inside_the_tolerance() {
        let counters = RunCounters::default();
        let ctx = TestContext::new(&counters, &NullReporter);
        assert!(compare_near(&ctx, 1.0, 1.0001, 0.01, "l", "r", "tol").is_pass());
        assert!(compare_near(&ctx, 100.0, 101.0, 10.0, "l", "r", "tol").is_pass());
        assert_eq!(counters.failures(), 0);
    }

    #[test]
    fn near_fails_on_the_boundary() {
        let counters = RunCounters::default();
        let ctx = TestContext::new(&counters, &NullReporter);
        // |1.0 - 1.5| == 0.5 exactly: not strictly less than the tolerance.
        let diag = compare_near(&ctx, 1.0, 1.5, 0.5, "a", "b", "0.5");
        assert!(!diag.is_pass());
        assert_eq!(counters.failures(), 1);
    }

    #[test]
    fn near_failure_embeds_the_tolerance_expression() {
        let counters = RunCounters::default();
        let ctx = TestContext::new(&counters, &NullReporter);
        let mut diag = compare_near(&ctx, 1.0, 2.0, 0.1, "x", "y", "0.1");
        assert_eq!(diag.take(), "\nx == y (+/-0.1)\nExpected: 1\nActual: 2\n");
    }
}
