//! Built-in canary exercising every comparison kind.

use crate::runner::{TestContext, TestResult};
use crate::{
    check_eq, check_false, check_ge, check_gt, check_le, check_lt, check_ne, check_near,
    check_true, require_eq, require_false, require_ge, require_gt, require_le, require_lt,
    require_ne, require_near, require_true,
};

pub(crate) const SELF_TEST_NAME: &str = "mame::self_test";

/// Runs first on every [`crate::Harness::run`] invocation. If any of these
/// checks fail, the harness itself is broken and the run stops before any
/// user test executes.
pub(crate) fn self_test(t: &TestContext<'_>) -> TestResult {
    check_eq!(t, 1, 1);
    check_ne!(t, 1, 2);
    check_true!(t, 1 == 1);
    check_false!(t, 1 == 2);

    require_eq!(t, 1, 1);
    require_ne!(t, 1, 2);
    require_true!(t, 1 == 1);
    require_false!(t, 1 == 2);

    check_near!(t, 1, 1, 0.01);
    check_near!(t, 1.0, 1.0001, 0.01);
    check_near!(t, 1.01, 1.0, 0.1);
    check_near!(t, 100, 101, 10);

    require_near!(t, 1, 1, 0.01);
    require_near!(t, 1.0, 1.0001, 0.01);
    require_near!(t, 1.01, 1.0, 0.1);
    require_near!(t, 100, 101, 10);

    check_gt!(t, 2, 1);
    check_ge!(t, 2, 1);
    check_ge!(t, 2, 2);
    check_lt!(t, 1, 2);
    check_le!(t, 1, 2);
    check_le!(t, 2, 2);

    require_gt!(t, 2, 1);
    require_ge!(t, 2, 1);
    require_ge!(t, 2, 2);
    require_lt!(t, 1, 2);
    require_le!(t, 1, 2);
    require_le!(t, 2, 2);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::{self_test, SELF_TEST_NAME};
    use crate::{
        reporter::NullReporter,
        runner::{RunCounters, TestContext},
    };

    #[test]
    fn the_canary_is_healthy() {
        let counters = RunCounters::default();
        let ctx = TestContext::new(&counters, &NullReporter);
        let outcome = self_test(&ctx);
        assert!(outcome.is_ok());
        assert_eq!(counters.failures(), 0);
    }

    #[test]
    fn the_canary_has_a_stable_name() {
        assert_eq!(SELF_TEST_NAME, "mame::self_test");
    }
}
